//! Life estimation at use condition
//!
//! Two regimes:
//! - [`weibull`]: median-rank regression when failures were observed
//! - [`zero_failure`]: exponential confidence bound when none were

pub mod median_rank;
pub mod weibull;
pub mod zero_failure;

pub use median_rank::MedianRankMethod;
pub use weibull::{
    fit_weibull, project_life, ProbabilityPoint, RegressionMethod, WeibullFit, WeibullLife,
    WeibullOptions,
};
pub use zero_failure::{zero_failure_bound, ZeroFailureBound, ZeroFailureTest};
