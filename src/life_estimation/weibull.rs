//! Weibull median-rank regression and life projection
//!
//! Linearised two-parameter Weibull CDF:
//!
//! ```text
//! ln(−ln(1 − F)) = β·ln t − β·ln η
//! ```
//!
//! Each ordered failure gives a point (x = ln t, y = ln(−ln(1 − F))) with F
//! its median rank. A least-squares line through the points yields β and η
//! at the stress condition; η is then projected to use condition with the
//! total acceleration factor.

use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;
use tracing::debug;

use super::median_rank::{median_ranks, MedianRankMethod};
use crate::config::defaults::MIN_DISTINCT_FAILURES;
use crate::error::{EngineError, EngineResult};

/// Which variable the least-squares line is fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionMethod {
    /// Regress y on x (minimise vertical residuals).
    #[default]
    #[serde(alias = "rry")]
    OnY,
    /// Regress x on y (minimise horizontal residuals).
    #[serde(alias = "rrx")]
    OnX,
}

impl RegressionMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnY => "RRY",
            Self::OnX => "RRX",
        }
    }
}

impl std::str::FromStr for RegressionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rry" | "y" | "on_y" => Ok(Self::OnY),
            "rrx" | "x" | "on_x" => Ok(Self::OnX),
            other => Err(format!("unknown regression method '{other}' (expected rry or rrx)")),
        }
    }
}

/// Fit settings for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullOptions {
    pub median_rank: MedianRankMethod,
    pub regression: RegressionMethod,
    /// Bx percentile, strictly between 0 and 100
    pub bx_percent: f64,
    /// Total units on test; `None` means every unit failed
    pub sample_size: Option<usize>,
}

impl WeibullOptions {
    /// Label such as `"BERNARD + RRY"`.
    pub fn method_label(&self) -> String {
        format!("{} + {}", self.median_rank.label(), self.regression.label())
    }
}

/// One point of the Weibull probability plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityPoint {
    /// Failure time (hours at stress)
    pub time: f64,
    /// Median rank F
    pub rank: f64,
    /// ln t
    pub x: f64,
    /// ln(−ln(1 − F))
    pub y: f64,
}

/// Weibull parameters at the stress condition.
#[derive(Debug, Clone, PartialEq)]
pub struct WeibullFit {
    /// Shape β
    pub shape: f64,
    /// Scale η at stress (hours)
    pub scale: f64,
    /// Coefficient of determination of the probability-plot line
    pub r_squared: f64,
    /// Plot points in ascending time order
    pub points: Vec<ProbabilityPoint>,
}

/// Life metrics projected to the use condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullLife {
    pub eta_use: f64,
    pub mttf_use: f64,
    pub bx_life: f64,
    pub bx_percent: f64,
    pub r_mission: f64,
}

/// Fit β and η from failure times by median-rank regression.
///
/// Non-positive and non-finite times must already be removed. Order does not
/// matter; duplicates are allowed as long as at least two distinct times
/// remain.
#[allow(clippy::cast_precision_loss)]
pub fn fit_weibull(failures: &[f64], options: &WeibullOptions) -> EngineResult<WeibullFit> {
    let mut sorted: Vec<f64> = failures.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    if sorted.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        return Err(EngineError::fit("failure times must be positive and finite"));
    }
    let distinct = 1 + sorted.windows(2).filter(|w| w[1] > w[0]).count();
    if sorted.is_empty() || distinct < MIN_DISTINCT_FAILURES {
        return Err(EngineError::fit(format!(
            "need at least {MIN_DISTINCT_FAILURES} distinct positive failure times, got {}",
            if sorted.is_empty() { 0 } else { distinct }
        )));
    }

    let r = sorted.len();
    let n_units = options.sample_size.unwrap_or(r);
    let ranks = median_ranks(options.median_rank, r, n_units)?;

    let points: Vec<ProbabilityPoint> = sorted
        .iter()
        .zip(&ranks)
        .map(|(&t, &f)| ProbabilityPoint {
            time: t,
            rank: f,
            x: t.ln(),
            y: (-(1.0 - f).ln()).ln(),
        })
        .collect();

    let n = r as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    let sum_xy: f64 = points.iter().map(|p| p.x * p.y).sum();
    let sum_x2: f64 = points.iter().map(|p| p.x * p.x).sum();
    let sum_y2: f64 = points.iter().map(|p| p.y * p.y).sum();

    let sxx = n * sum_x2 - sum_x * sum_x;
    let syy = n * sum_y2 - sum_y * sum_y;
    let sxy = n * sum_xy - sum_x * sum_y;

    if sxx.abs() < 1e-30 || syy.abs() < 1e-30 {
        return Err(EngineError::fit("degenerate probability plot (zero variance)"));
    }

    let (shape, scale) = match options.regression {
        RegressionMethod::OnY => {
            // y = a + b·x  →  β = b, η = exp(−a/b)
            let b = sxy / sxx;
            let a = (sum_y - b * sum_x) / n;
            (b, (-a / b).exp())
        }
        RegressionMethod::OnX => {
            // x = a' + b'·y  →  β = 1/b', η = exp(a')
            let b = sxy / syy;
            let a = (sum_x - b * sum_y) / n;
            (1.0 / b, a.exp())
        }
    };

    if !shape.is_finite() || shape <= 0.0 {
        return Err(EngineError::fit(format!("non-positive or non-finite shape β = {shape}")));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(EngineError::fit(format!("non-positive or non-finite scale η = {scale}")));
    }

    let r_squared = (sxy * sxy) / (sxx * syy);

    debug!(
        shape,
        scale,
        r_squared,
        failures = r,
        sample_size = n_units,
        method = %options.method_label(),
        "Weibull fit complete"
    );

    Ok(WeibullFit {
        shape,
        scale,
        r_squared,
        points,
    })
}

/// Mean time to failure of a Weibull(β, η): η·Γ(1 + 1/β).
///
/// Evaluated as exp(ln η + ln Γ) so large η with moderate β does not
/// overflow early. Very small β still overflows to infinity.
pub fn mttf(shape: f64, scale: f64) -> f64 {
    (scale.ln() + ln_gamma(1.0 + 1.0 / shape)).exp()
}

/// Time by which `percent`% of the population has failed.
pub fn bx_life(shape: f64, scale: f64, percent: f64) -> f64 {
    scale * (-(1.0 - percent / 100.0).ln()).powf(1.0 / shape)
}

/// Survival probability at `hours`.
pub fn reliability_at(shape: f64, scale: f64, hours: f64) -> f64 {
    if hours <= 0.0 {
        return 1.0;
    }
    (-(hours / scale).powf(shape)).exp()
}

/// Project a stress-condition fit to use condition.
pub fn project_life(
    fit: &WeibullFit,
    af_total: f64,
    bx_percent: f64,
    mission_hours: f64,
) -> EngineResult<WeibullLife> {
    if !(bx_percent > 0.0 && bx_percent < 100.0) {
        return Err(EngineError::validation(
            "weibull_data.options.bx_life_percent",
            format!("must be strictly between 0 and 100, got {bx_percent}"),
        ));
    }

    let eta_use = fit.scale * af_total;
    let life = WeibullLife {
        eta_use,
        mttf_use: mttf(fit.shape, eta_use),
        bx_life: bx_life(fit.shape, eta_use, bx_percent),
        bx_percent,
        r_mission: reliability_at(fit.shape, eta_use, mission_hours),
    };

    let representable = |v: f64| v.is_finite() && v > 0.0;
    for (name, value) in [
        ("η_use", life.eta_use),
        ("MTTF", life.mttf_use),
        ("Bx life", life.bx_life),
    ] {
        if !representable(value) {
            return Err(EngineError::fit(format!(
                "{name} = {value} is not representable for β = {}, η = {}",
                fit.shape, fit.scale
            )));
        }
    }
    if !life.r_mission.is_finite() {
        return Err(EngineError::fit(format!("mission reliability is not finite for β = {}", fit.shape)));
    }

    debug!(
        eta_use = life.eta_use,
        mttf_use = life.mttf_use,
        bx_life = life.bx_life,
        r_mission = life.r_mission,
        "Weibull life projected to use condition"
    );
    Ok(life)
}
