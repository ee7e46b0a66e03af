//! Zero-failure (success-run) confidence bound
//!
//! With no failures in T = n·t device-hours under an exponential life model,
//! the one-sided upper bound on the failure rate at confidence c is
//!
//! ```text
//! λ_upper = χ²(c; 2) / (2T) = −ln(1 − c) / T
//! ```
//!
//! The bound is computed at the stress condition and projected to use
//! condition by dividing the rate (multiplying the MTTF) by the total AF.

use tracing::debug;

use crate::config::defaults::FIT_SCALE;
use crate::error::{EngineError, EngineResult};

/// Zero-failure test description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroFailureTest {
    /// Units on test
    pub units: u64,
    /// Test duration per unit (hours at stress)
    pub test_hours: f64,
    /// One-sided confidence level in (0, 1)
    pub confidence: f64,
}

/// Bound at stress and at use condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroFailureBound {
    /// n · t_test
    pub total_device_hours: f64,
    /// χ²(c; 2 dof)
    pub chi_squared: f64,
    /// Upper failure rate at stress (per hour)
    pub lambda_stress: f64,
    /// Lower MTTF bound at stress (hours)
    pub mttf_stress_lower: f64,
    /// Upper failure rate at use condition (per hour)
    pub lambda_use: f64,
    /// Lower MTTF bound at use condition (hours)
    pub mttf_use_lower: f64,
    /// exp(−λ_use · mission_hours)
    pub r_mission: f64,
}

impl ZeroFailureBound {
    /// Upper failure rate at stress in FIT.
    pub fn lambda_stress_fit(&self) -> f64 {
        self.lambda_stress * FIT_SCALE
    }

    /// Upper failure rate at use condition in FIT.
    pub fn lambda_use_fit(&self) -> f64 {
        self.lambda_use * FIT_SCALE
    }
}

impl ZeroFailureTest {
    fn check(&self) -> EngineResult<()> {
        if self.units < 1 {
            return Err(EngineError::domain("zero_fail_params.n", "sample size must be at least 1"));
        }
        if !self.test_hours.is_finite() || self.test_hours <= 0.0 {
            return Err(EngineError::domain(
                "zero_fail_params.t_test",
                format!("test duration must be > 0 hours, got {}", self.test_hours),
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(EngineError::domain(
                "zero_fail_params.cl",
                format!("confidence level must lie strictly between 0 and 1, got {}", self.confidence),
            ));
        }
        Ok(())
    }
}

/// Upper failure-rate bound at stress (per hour).
#[allow(clippy::cast_precision_loss)]
pub fn failure_rate_upper(test: &ZeroFailureTest) -> EngineResult<f64> {
    test.check()?;
    let total = test.units as f64 * test.test_hours;
    Ok(-(1.0 - test.confidence).ln() / total)
}

/// Full zero-failure bound projected to use condition.
#[allow(clippy::cast_precision_loss)]
pub fn zero_failure_bound(
    test: &ZeroFailureTest,
    af_total: f64,
    mission_hours: f64,
) -> EngineResult<ZeroFailureBound> {
    let lambda_stress = failure_rate_upper(test)?;
    let total_device_hours = test.units as f64 * test.test_hours;
    let chi_squared = -2.0 * (1.0 - test.confidence).ln();
    let lambda_use = lambda_stress / af_total;

    let bound = ZeroFailureBound {
        total_device_hours,
        chi_squared,
        lambda_stress,
        mttf_stress_lower: 1.0 / lambda_stress,
        lambda_use,
        mttf_use_lower: af_total / lambda_stress,
        r_mission: (-lambda_use * mission_hours.max(0.0)).exp(),
    };

    debug!(
        total_device_hours,
        chi_squared,
        lambda_stress_fit = bound.lambda_stress_fit(),
        lambda_use_fit = bound.lambda_use_fit(),
        r_mission = bound.r_mission,
        "Zero-failure bound computed"
    );
    Ok(bound)
}
