//! Request evaluation
//!
//! request → AF combinator → (failures ? Weibull : zero-failure)
//!         → equivalent field time + benchmark → response
//!
//! `evaluate` returns full-precision typed results; `calculate` wraps it into
//! the JSON response contract, turning any request-level error into an
//! error-only response.

use serde_json::Value;
use tracing::{debug, warn};

use crate::benchmark::{classify_percent, Classification};
use crate::config::{self, ReliabilityConfig};
use crate::error::{EngineError, EngineResult};
use crate::life_estimation::{
    fit_weibull, project_life, zero_failure_bound, WeibullFit, WeibullLife, WeibullOptions,
    ZeroFailureBound,
};
use crate::physics_engine::{combine, equivalent_field_time, AfBreakdown, EquivalentFieldTime};
use crate::types::{
    AfResult, AnalysisMode, CalculationRequest, CalculationResponse, FailureSample, Precision,
    ReliabilityResult, WeibullReliability, WeibullResult, ZeroFailureReliability,
};

/// Outcome of the life-estimation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum LifeEstimate {
    /// Failures observed and the fit succeeded.
    Weibull { fit: WeibullFit, life: WeibullLife },
    /// Failures observed but the sample could not be fitted.
    WeibullFailed(EngineError),
    /// No failures, or a failed fit with zero-failure fallback requested.
    ZeroFailure {
        bound: ZeroFailureBound,
        fit_error: Option<EngineError>,
    },
}

impl LifeEstimate {
    pub const fn mode(&self) -> AnalysisMode {
        match self {
            Self::Weibull { .. } | Self::WeibullFailed(_) => AnalysisMode::Weibull,
            Self::ZeroFailure { .. } => AnalysisMode::ZeroFailure,
        }
    }

    pub const fn r_mission(&self) -> Option<f64> {
        match self {
            Self::Weibull { life, .. } => Some(life.r_mission),
            Self::WeibullFailed(_) => None,
            Self::ZeroFailure { bound, .. } => Some(bound.r_mission),
        }
    }
}

/// Full-precision result of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub acceleration: AfBreakdown,
    pub mission_years: f64,
    pub options: WeibullOptions,
    pub sample: FailureSample,
    pub estimate: LifeEstimate,
    pub equivalent_field_time: EquivalentFieldTime,
    /// Verdict on the mission reliability at the configured output precision
    pub benchmark: Option<Classification>,
}

impl Evaluation {
    /// Render into the response contract.
    pub fn to_response(&self, p: Precision) -> CalculationResponse {
        let weibull_result = match &self.estimate {
            LifeEstimate::Weibull { fit, .. } => Some(WeibullResult::from_fit(
                fit,
                &self.options,
                self.sample.len(),
                self.sample.discarded,
                p,
            )),
            LifeEstimate::WeibullFailed(err) => Some(WeibullResult::from_error(err)),
            LifeEstimate::ZeroFailure { fit_error, .. } => fit_error.as_ref().map(WeibullResult::from_error),
        };

        let reliability_result = match &self.estimate {
            LifeEstimate::Weibull { life, .. } => Some(ReliabilityResult {
                weibull: Some(WeibullReliability::from_life(life, p)),
                zero_failure: None,
            }),
            LifeEstimate::WeibullFailed(_) => None,
            LifeEstimate::ZeroFailure { bound, .. } => Some(ReliabilityResult {
                weibull: None,
                zero_failure: Some(ZeroFailureReliability::from_bound(bound, p)),
            }),
        };

        CalculationResponse {
            error: None,
            error_kind: None,
            af_result: Some(AfResult::from_breakdown(&self.acceleration, p)),
            weibull_result,
            reliability_result,
            analysis_mode: Some(self.estimate.mode()),
            mission_years: Some(self.mission_years),
            equivalent_field_time: Some(EquivalentFieldTime {
                hours: p.life(self.equivalent_field_time.hours),
                years: p.life(self.equivalent_field_time.years),
            }),
            benchmark: self.benchmark.clone(),
        }
    }
}

/// Evaluate a request against explicit configuration.
pub fn evaluate(request: &CalculationRequest, config: &ReliabilityConfig) -> EngineResult<Evaluation> {
    let inputs = request.af_params.to_inputs()?;
    let acceleration = combine(&inputs, config.physics.boltzmann_ev_per_k)?;
    let af_total = acceleration.total;

    let mission_years = request.mission_years_or(config.analysis.default_mission_years);
    let mission_hours = mission_years * config.physics.hours_per_year;
    let options = request.weibull_data.options.resolve(&config.analysis)?;
    let fallback = request.weibull_data.options.fallback_to_zero_failure()?;
    let sample = request.weibull_data.failure_sample()?;

    let estimate = if sample.is_empty() {
        debug!("No failures supplied, using zero-failure bound");
        LifeEstimate::ZeroFailure {
            bound: zero_failure_estimate(request, af_total, mission_hours)?,
            fit_error: None,
        }
    } else {
        match weibull_estimate(&sample, &options, af_total, mission_hours) {
            Ok((fit, life)) => LifeEstimate::Weibull { fit, life },
            Err(err @ EngineError::Fit(_)) if fallback => {
                warn!(error = %err, "Weibull fit failed, falling back to zero-failure bound");
                LifeEstimate::ZeroFailure {
                    bound: zero_failure_estimate(request, af_total, mission_hours)?,
                    fit_error: Some(err),
                }
            }
            Err(err @ EngineError::Fit(_)) => {
                warn!(error = %err, failures = sample.len(), "Weibull fit failed");
                LifeEstimate::WeibullFailed(err)
            }
            Err(err) => return Err(err),
        }
    };

    // The verdict must agree with the reliability figure the response reports.
    let precision = Precision {
        round: config.output.round_results,
    };
    let benchmark = estimate.r_mission().map(|r| {
        classify_percent(&config.benchmarks.tiers, mission_years, precision.reliability_percent(r))
    });

    let equivalent = equivalent_field_time(request.test_hours(), af_total, config.physics.hours_per_year);

    debug!(
        af_total,
        mission_years,
        mode = ?estimate.mode(),
        r_mission = ?estimate.r_mission(),
        verdict = ?benchmark.as_ref().map(|b| b.verdict),
        "Request evaluated"
    );

    Ok(Evaluation {
        acceleration,
        mission_years,
        options,
        sample,
        estimate,
        equivalent_field_time: equivalent,
        benchmark,
    })
}

fn weibull_estimate(
    sample: &FailureSample,
    options: &WeibullOptions,
    af_total: f64,
    mission_hours: f64,
) -> EngineResult<(WeibullFit, WeibullLife)> {
    let fit = fit_weibull(&sample.times, options)?;
    let life = project_life(&fit, af_total, options.bx_percent, mission_hours)?;
    Ok((fit, life))
}

fn zero_failure_estimate(
    request: &CalculationRequest,
    af_total: f64,
    mission_hours: f64,
) -> EngineResult<ZeroFailureBound> {
    let params = request.zero_fail_params.as_ref().ok_or_else(|| {
        EngineError::validation("zero_fail_params", "required when no failures are supplied")
    })?;
    zero_failure_bound(&params.to_test()?, af_total, mission_hours)
}

/// Evaluate a request into the response contract using explicit configuration.
pub fn calculate_with(request: &CalculationRequest, config: &ReliabilityConfig) -> CalculationResponse {
    match evaluate(request, config) {
        Ok(evaluation) => evaluation.to_response(Precision {
            round: config.output.round_results,
        }),
        Err(err) => {
            warn!(error = %err, kind = err.kind(), "Request rejected");
            CalculationResponse::from_error(&err)
        }
    }
}

/// Evaluate a request using the global configuration.
pub fn calculate(request: &CalculationRequest) -> CalculationResponse {
    calculate_with(request, config::get())
}

/// Evaluate a raw JSON request; a structurally invalid document becomes a
/// validation error response.
pub fn calculate_value(value: Value, config: &ReliabilityConfig) -> CalculationResponse {
    match serde_json::from_value::<CalculationRequest>(value) {
        Ok(request) => calculate_with(&request, config),
        Err(e) => {
            let err = EngineError::validation("request", e.to_string());
            warn!(error = %err, "Malformed request document");
            CalculationResponse::from_error(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AfParams;
    use serde_json::json;

    fn temp_humidity() -> AfParams {
        AfParams::new()
            .set("t_use", 32)
            .set("t_alt", 85)
            .set("ea", 0.7)
            .set("rh_use", 60)
            .set("rh_alt", 85)
            .set("n_hum", 2)
    }

    fn request(failures: Value) -> CalculationRequest {
        serde_json::from_value(json!({
            "weibull_data": { "failures": failures },
            "zero_fail_params": { "n": 10, "t_test": 1000, "cl": 0.9 },
        }))
        .map(|mut r: CalculationRequest| {
            r.af_params = temp_humidity();
            r
        })
        .unwrap()
    }

    #[test]
    fn test_empty_failures_use_zero_failure_path() {
        let ev = evaluate(&request(json!([])), &ReliabilityConfig::default()).unwrap();
        assert_eq!(ev.estimate.mode(), AnalysisMode::ZeroFailure);
        assert!(ev.benchmark.is_some());
    }

    #[test]
    fn test_failures_use_weibull_path() {
        let ev = evaluate(&request(json!([100, 500, 1200])), &ReliabilityConfig::default()).unwrap();
        assert!(matches!(ev.estimate, LifeEstimate::Weibull { .. }));
        assert_eq!(ev.sample.len(), 3);
    }

    #[test]
    fn test_single_failure_reports_fit_error_without_reliability() {
        let resp = calculate_with(&request(json!([250])), &ReliabilityConfig::default());
        assert!(!resp.is_error());
        assert!(resp.weibull_result.as_ref().is_some_and(|w| !w.is_fit()));
        assert!(resp.reliability_result.is_none());
        assert!(resp.benchmark.is_none());
        assert_eq!(resp.analysis_mode, Some(AnalysisMode::Weibull));
    }

    #[test]
    fn test_fallback_to_zero_failure() {
        let mut req = request(json!([250, 250]));
        req.weibull_data.options.fallback_to_zero_failure = Some(json!(true));
        let resp = calculate_with(&req, &ReliabilityConfig::default());
        assert_eq!(resp.analysis_mode, Some(AnalysisMode::ZeroFailure));
        assert!(resp.reliability_result.as_ref().is_some_and(|r| r.zero_failure.is_some()));
        assert!(resp.weibull_result.as_ref().is_some_and(|w| !w.is_fit()));
    }

    #[test]
    fn test_zero_failure_without_params_is_validation_error() {
        let mut req = request(json!([]));
        req.zero_fail_params = None;
        let resp = calculate_with(&req, &ReliabilityConfig::default());
        assert_eq!(resp.error_kind, Some("validation"));
        assert!(resp.af_result.is_none());
    }

    #[test]
    fn test_malformed_document() {
        let resp = calculate_value(json!({ "af_params": [1, 2, 3] }), &ReliabilityConfig::default());
        assert_eq!(resp.error_kind, Some("validation"));
    }

    #[test]
    fn test_unrounded_output_when_configured() {
        let mut config = ReliabilityConfig::default();
        config.output.round_results = false;
        let resp = calculate_with(&request(json!([])), &config);
        let af = resp.af_result.unwrap().af_total;
        let rounded = crate::types::round_to(af, 4);
        assert!((af - rounded).abs() > 0.0, "af_total {af} should carry full precision");
    }
}
