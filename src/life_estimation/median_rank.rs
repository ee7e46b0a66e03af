//! Median-rank estimators for the Weibull probability plot
//!
//! For the i-th ordered failure out of N units on test the median rank is the
//! median of Beta(i, N − i + 1). Bernard's formula approximates it in closed
//! form; the exact variant inverts the regularized incomplete beta function.

use serde::{Deserialize, Serialize};
use statrs::function::beta::beta_reg;

use crate::config::defaults::MEDIAN_RANK_BISECTION_ITERATIONS;
use crate::error::{EngineError, EngineResult};

/// How unreliability is assigned to each ordered failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianRankMethod {
    /// (i − 0.3) / (N + 0.4)
    #[default]
    Bernard,
    /// Median of Beta(i, N − i + 1)
    #[serde(alias = "exact")]
    ExactBeta,
}

impl MedianRankMethod {
    /// Label used in the response's `method` string.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bernard => "BERNARD",
            Self::ExactBeta => "EXACT",
        }
    }

    /// Median rank of the `order`-th failure (1-based) among `sample_size` units.
    pub fn rank(self, order: usize, sample_size: usize) -> f64 {
        match self {
            Self::Bernard => bernard_rank(order, sample_size),
            Self::ExactBeta => exact_median_rank(order, sample_size),
        }
    }
}

impl std::str::FromStr for MedianRankMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bernard" | "benard" => Ok(Self::Bernard),
            "exact" | "exact_beta" | "beta" => Ok(Self::ExactBeta),
            other => Err(format!("unknown median rank method '{other}' (expected bernard or exact)")),
        }
    }
}

/// Bernard's approximation.
#[allow(clippy::cast_precision_loss)]
pub fn bernard_rank(order: usize, sample_size: usize) -> f64 {
    (order as f64 - 0.3) / (sample_size as f64 + 0.4)
}

/// Exact median rank: solves I_F(i, N − i + 1) = 0.5 for F by bisection.
///
/// `beta_reg` is monotone increasing in F on [0, 1], so bisection always
/// converges. `Beta::inverse_cdf` is not used: statrs 0.16 falls back to the
/// trait default, which stops after 16 halvings of [-2, 2] (about 3e-5).
#[allow(clippy::cast_precision_loss)]
pub fn exact_median_rank(order: usize, sample_size: usize) -> f64 {
    let a = order as f64;
    let b = (sample_size - order + 1) as f64;

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..MEDIAN_RANK_BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if beta_reg(a, b, mid) < 0.5 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Median ranks for `failures` ordered failures out of `sample_size` units.
///
/// `sample_size` must be at least `failures`; extra units are survivors
/// suspended beyond the last failure.
pub fn median_ranks(
    method: MedianRankMethod,
    failures: usize,
    sample_size: usize,
) -> EngineResult<Vec<f64>> {
    if failures == 0 {
        return Err(EngineError::fit("no failures to rank"));
    }
    if sample_size < failures {
        return Err(EngineError::validation(
            "weibull_data.options.sample_size",
            format!("sample size {sample_size} is smaller than the failure count {failures}"),
        ));
    }
    Ok((1..=failures).map(|i| method.rank(i, sample_size)).collect())
}
