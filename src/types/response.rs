//! Calculation response shapes
//!
//! Field names match the JSON contract existing callers consume. Views are
//! built from the engine's full-precision results through a `Precision`,
//! which applies the contract's rounding when enabled.

use serde::Serialize;

use crate::benchmark::Classification;
use crate::config::defaults::{AF_DECIMALS, LIFE_DECIMALS, RELIABILITY_DECIMALS};
use crate::error::EngineError;
use crate::life_estimation::{WeibullFit, WeibullLife, WeibullOptions, ZeroFailureBound};
use crate::physics_engine::{AfBreakdown, EquivalentFieldTime};
use crate::types::StressKind;

// ============================================================================
// Rounding
// ============================================================================

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// Output precision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub round: bool,
}

impl Precision {
    pub const FULL: Self = Self { round: false };
    pub const CONTRACT: Self = Self { round: true };

    fn apply(self, value: f64, decimals: i32) -> f64 {
        if self.round {
            round_to(value, decimals)
        } else {
            value
        }
    }

    /// Acceleration factors and fit parameters.
    pub fn af(self, value: f64) -> f64 {
        self.apply(value, AF_DECIMALS)
    }

    /// Hours, years and FIT figures.
    pub fn life(self, value: f64) -> f64 {
        self.apply(value, LIFE_DECIMALS)
    }

    /// Mission reliabilities.
    pub fn reliability(self, value: f64) -> f64 {
        self.apply(value, RELIABILITY_DECIMALS)
    }

    /// Mission reliability as a percentage, carrying the same significant
    /// digits as [`Precision::reliability`].
    pub fn reliability_percent(self, value: f64) -> f64 {
        self.apply(value * 100.0, RELIABILITY_DECIMALS - 2)
    }
}

// ============================================================================
// Acceleration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AfResult {
    pub af_t: f64,
    pub af_rh: f64,
    pub af_v: f64,
    pub af_tc: f64,
    pub af_vib: f64,
    pub af_uv: f64,
    pub af_chem: f64,
    pub af_rad: f64,
    pub af_total: f64,
    pub combination_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub af_eyring: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub af_eyring_correction: Option<f64>,
}

impl AfResult {
    pub fn from_breakdown(b: &AfBreakdown, p: Precision) -> Self {
        let f = |kind| p.af(b.factor(kind));
        Self {
            af_t: f(StressKind::Temperature),
            af_rh: f(StressKind::Humidity),
            af_v: f(StressKind::Voltage),
            af_tc: f(StressKind::ThermalCycling),
            af_vib: f(StressKind::Vibration),
            af_uv: f(StressKind::Ultraviolet),
            af_chem: f(StressKind::Chemical),
            af_rad: f(StressKind::Radiation),
            af_total: p.af(b.total),
            combination_mode: b.mode,
            af_eyring: b.eyring.map(|e| p.af(e.af)),
            af_eyring_correction: b.eyring.map(|e| p.af(e.correction)),
        }
    }
}

// ============================================================================
// Weibull
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    /// ln t
    pub x: Vec<f64>,
    /// ln(−ln(1 − F))
    pub y: Vec<f64>,
    /// Failure times, ascending
    pub t: Vec<f64>,
    /// Median ranks
    pub f: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeibullFitView {
    pub beta: f64,
    pub eta_alt: f64,
    pub r_squared: f64,
    pub method: String,
    pub n_failures: usize,
    pub failures_discarded: usize,
    pub plot_data: PlotData,
}

/// `weibull_result`: the fit, or the reason it failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeibullResult {
    Fit(WeibullFitView),
    Failed { error: String },
}

impl WeibullResult {
    pub fn from_fit(
        fit: &WeibullFit,
        options: &WeibullOptions,
        n_failures: usize,
        failures_discarded: usize,
        p: Precision,
    ) -> Self {
        let plot_data = PlotData {
            x: fit.points.iter().map(|pt| pt.x).collect(),
            y: fit.points.iter().map(|pt| pt.y).collect(),
            t: fit.points.iter().map(|pt| pt.time).collect(),
            f: fit.points.iter().map(|pt| pt.rank).collect(),
        };
        Self::Fit(WeibullFitView {
            beta: p.af(fit.shape),
            eta_alt: p.af(fit.scale),
            r_squared: p.af(fit.r_squared),
            method: options.method_label(),
            n_failures,
            failures_discarded,
            plot_data,
        })
    }

    pub fn from_error(err: &EngineError) -> Self {
        Self::Failed { error: err.to_string() }
    }

    pub fn is_fit(&self) -> bool {
        matches!(self, Self::Fit(_))
    }
}

// ============================================================================
// Reliability
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeibullReliability {
    pub eta_use: f64,
    pub mttf_use: f64,
    pub bx_life: f64,
    pub bx_percent: f64,
    pub r_mission: f64,
}

impl WeibullReliability {
    pub fn from_life(life: &WeibullLife, p: Precision) -> Self {
        Self {
            eta_use: p.life(life.eta_use),
            mttf_use: p.life(life.mttf_use),
            bx_life: p.life(life.bx_life),
            bx_percent: life.bx_percent,
            r_mission: p.reliability(life.r_mission),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZeroFailureReliability {
    pub total_hours_alt: f64,
    pub chi_sq: f64,
    pub mttf_alt_lower: f64,
    /// FIT at stress
    pub lambda_alt_upper: f64,
    pub mttf_use_lower: f64,
    /// FIT at use condition
    pub lambda_use_upper: f64,
    pub r_mission: f64,
}

impl ZeroFailureReliability {
    pub fn from_bound(b: &ZeroFailureBound, p: Precision) -> Self {
        Self {
            total_hours_alt: p.life(b.total_device_hours),
            chi_sq: p.af(b.chi_squared),
            mttf_alt_lower: p.life(b.mttf_stress_lower),
            lambda_alt_upper: p.life(b.lambda_stress_fit()),
            mttf_use_lower: p.life(b.mttf_use_lower),
            lambda_use_upper: p.life(b.lambda_use_fit()),
            r_mission: p.reliability(b.r_mission),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReliabilityResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weibull: Option<WeibullReliability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_failure: Option<ZeroFailureReliability>,
}

// ============================================================================
// Top-Level Response
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    Weibull,
    ZeroFailure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalculationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub af_result: Option<AfResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weibull_result: Option<WeibullResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability_result: Option<ReliabilityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_mode: Option<AnalysisMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equivalent_field_time: Option<EquivalentFieldTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Classification>,
}

impl CalculationResponse {
    /// Error-only response; no partial results accompany it.
    pub fn from_error(err: &EngineError) -> Self {
        Self {
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Mission reliability from whichever path produced one.
    pub fn r_mission(&self) -> Option<f64> {
        let rel = self.reliability_result.as_ref()?;
        rel.weibull
            .as_ref()
            .map(|w| w.r_mission)
            .or_else(|| rel.zero_failure.as_ref().map(|z| z.r_mission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!((round_to(1.234_56, 4) - 1.2346).abs() < 1e-12);
        assert!((round_to(-2.5, 0) + 3.0).abs() < f64::EPSILON);
        // Overflowing scale leaves the value untouched.
        assert!((round_to(1e305, 6) / 1e305 - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_precision_full_is_identity() {
        let v = 0.123_456_789;
        assert!((Precision::FULL.reliability(v) - v).abs() < f64::EPSILON);
        assert!((Precision::CONTRACT.reliability(v) - 0.123_457).abs() < 1e-12);
    }

    #[test]
    fn test_reliability_percent_matches_reported_fraction() {
        let r = 0.984_999_7;
        assert!((Precision::CONTRACT.reliability(r) - 0.985).abs() < 1e-12);
        assert!((Precision::CONTRACT.reliability_percent(r) - 98.5).abs() < f64::EPSILON);
        assert!(Precision::FULL.reliability_percent(r) < 98.5);
    }

    #[test]
    fn test_error_response_has_no_results() {
        let resp = CalculationResponse::from_error(&EngineError::domain("humidity", "rh must be > 0"));
        let json = serde_json::to_value(&resp).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2, "{json}");
        assert_eq!(obj["error_kind"], "domain");
    }

    #[test]
    fn test_failed_weibull_serializes_error_only() {
        let view = WeibullResult::from_error(&EngineError::fit("degenerate"));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["error"].as_str().unwrap().contains("degenerate"));
        assert!(json.get("beta").is_none());
    }
}
