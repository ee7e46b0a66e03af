//! Calculation request and lenient field parsing
//!
//! Requests arrive as loosely-typed JSON: numbers may be sent as strings,
//! flags as strings or 0/1, and failure times as a delimited string. This
//! module turns that into the engine's typed inputs, reporting malformed or
//! missing fields as `Validation` errors that name the field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::stress::{
    AccelerationInputs, CombinationMode, DoseRateScaling, EyringModel, EyringStressType,
    StressCondition, StressKind, StressProfile,
};
use crate::config::defaults::{DEFAULT_DOSE_RATE_EXPONENT, MAX_EXACT_COUNT};
use crate::config::AnalysisConfig;
use crate::error::{EngineError, EngineResult};
use crate::life_estimation::{MedianRankMethod, RegressionMethod, WeibullOptions, ZeroFailureTest};

// ============================================================================
// Lenient Scalars
// ============================================================================

/// Parse a JSON number or numeric string. `null` and blank strings are absent.
pub fn lenient_number(field: &str, value: &Value) -> EngineResult<Option<f64>> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        Some(v) => Err(EngineError::validation(field, format!("must be a finite number, got {v}"))),
        None => Err(EngineError::validation(field, format!("expected a number, got {value}"))),
    }
}

/// Parse a JSON bool, 0/1, or a yes/no style string.
pub fn lenient_flag(field: &str, value: &Value) -> EngineResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Ok(Some(false)),
            Some(v) if (v - 1.0).abs() < f64::EPSILON => Ok(Some(true)),
            _ => Err(EngineError::validation(field, format!("expected a boolean, got {n}"))),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" | "" => Ok(Some(false)),
            other => Err(EngineError::validation(field, format!("expected a boolean, got '{other}'"))),
        },
        other => Err(EngineError::validation(field, format!("expected a boolean, got {other}"))),
    }
}

// ============================================================================
// Request
// ============================================================================

/// One engine request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub af_params: AfParams,

    #[serde(default)]
    pub weibull_data: WeibullData,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_fail_params: Option<ZeroFailParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_years: Option<Value>,
}

impl CalculationRequest {
    /// Mission duration in years, or `default` when absent or unusable.
    pub fn mission_years_or(&self, default: f64) -> f64 {
        let parsed = self
            .mission_years
            .as_ref()
            .map(|v| lenient_number("mission_years", v));
        match parsed {
            Some(Ok(Some(years))) if years > 0.0 => years,
            None | Some(Ok(None)) => default,
            Some(_) => {
                debug!(value = ?self.mission_years, default, "Unusable mission_years, using default");
                default
            }
        }
    }

    /// Test duration for equivalent field time; unparseable values count as
    /// zero exposure.
    pub fn test_hours(&self) -> f64 {
        self.zero_fail_params
            .as_ref()
            .and_then(|z| z.t_test.as_ref())
            .and_then(|v| lenient_number("zero_fail_params.t_test", v).ok().flatten())
            .unwrap_or(0.0)
    }
}

// ============================================================================
// Acceleration Parameters
// ============================================================================

/// Flat `af_params` object: enable flags plus every model's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AfParams(pub Map<String, Value>);

impl AfParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    fn field_path(key: &str) -> String {
        format!("af_params.{key}")
    }

    fn flag(&self, key: &str, default: bool) -> EngineResult<bool> {
        match self.0.get(key) {
            Some(v) => Ok(lenient_flag(&Self::field_path(key), v)?.unwrap_or(default)),
            None => Ok(default),
        }
    }

    fn number(&self, key: &str) -> EngineResult<Option<f64>> {
        match self.0.get(key) {
            Some(v) => lenient_number(&Self::field_path(key), v),
            None => Ok(None),
        }
    }

    fn require(&self, key: &str, kind: &str) -> EngineResult<f64> {
        self.number(key)?.ok_or_else(|| {
            EngineError::validation(Self::field_path(key), format!("required when {kind} is enabled"))
        })
    }

    /// Whether a stress type is switched on, honouring flag defaults.
    pub fn is_enabled(&self, kind: StressKind) -> EngineResult<bool> {
        self.flag(kind.enable_flag(), kind.enabled_by_default())
    }

    fn condition(&self, kind: StressKind) -> EngineResult<StressCondition> {
        let name = kind.name();
        let req = |key: &str| self.require(key, name);
        Ok(match kind {
            StressKind::Temperature => StressCondition::Temperature {
                use_celsius: req("t_use")?,
                stress_celsius: req("t_alt")?,
                activation_energy_ev: req("ea")?,
            },
            StressKind::Humidity => StressCondition::Humidity {
                use_rh: req("rh_use")?,
                stress_rh: req("rh_alt")?,
                exponent: req("n_hum")?,
            },
            StressKind::Voltage => StressCondition::Voltage {
                use_volts: req("v_use")?,
                stress_volts: req("v_alt")?,
                exponent: req("beta_v")?,
            },
            StressKind::ThermalCycling => StressCondition::ThermalCycling {
                use_delta_t: req("dt_use")?,
                stress_delta_t: req("dt_alt")?,
                use_frequency: req("f_use")?,
                stress_frequency: req("f_alt")?,
                delta_t_exponent: req("beta_tc")?,
                frequency_exponent: req("alpha_tc")?,
            },
            StressKind::Vibration => StressCondition::Vibration {
                use_g: req("g_use")?,
                stress_g: req("g_alt")?,
                exponent: req("n_vib")?,
            },
            StressKind::Ultraviolet => StressCondition::Ultraviolet {
                field_hours: req("t_field_uv")?,
                accelerated_hours: req("t_accel_uv")?,
            },
            StressKind::Chemical => StressCondition::Chemical {
                use_concentration: req("c_use")?,
                stress_concentration: req("c_alt")?,
                exponent: req("n_chem")?,
            },
            StressKind::Radiation => {
                // Legacy single `dose_rate` is informational only.
                let dose_rate = match (self.number("dose_rate_use")?, self.number("dose_rate_alt")?) {
                    (Some(use_rate), Some(stress_rate)) => Some(DoseRateScaling {
                        use_rate,
                        stress_rate,
                        exponent: self.number("n_dose_rate")?.unwrap_or(DEFAULT_DOSE_RATE_EXPONENT),
                    }),
                    _ => None,
                };
                StressCondition::Radiation {
                    use_dose: req("d_use")?,
                    stress_dose: req("d_alt")?,
                    exponent: req("n_rad")?,
                    dose_rate,
                }
            }
        })
    }

    fn eyring_model(&self) -> EngineResult<EyringModel> {
        let field = Self::field_path("eyring_stress_type");
        let stress_type: EyringStressType = match self.0.get("eyring_stress_type") {
            Some(Value::String(s)) => s
                .parse()
                .map_err(|msg: String| EngineError::validation(&field, msg))?,
            Some(other) => {
                return Err(EngineError::validation(&field, format!("expected a string, got {other}")))
            }
            None => return Err(EngineError::validation(&field, "required when eyring is enabled")),
        };

        let req = |key: &str| self.require(key, "eyring");
        let (use_key, alt_key, exp_key) = match stress_type {
            EyringStressType::Humidity => ("rh_use", "rh_alt", "n_hum"),
            EyringStressType::Voltage => ("v_use", "v_alt", "beta_v"),
        };

        Ok(EyringModel {
            stress_type,
            use_celsius: req("t_use")?,
            stress_celsius: req("t_alt")?,
            activation_energy_ev: req("ea")?,
            use_stress: req(use_key)?,
            stress_stress: req(alt_key)?,
            interaction: req("eyring_d")?,
            constant: req("eyring_a")?,
            stress_exponent: req("eyring_b")?,
            reference_exponent: req(exp_key)?,
        })
    }

    /// Build the typed stress profile and combination mode.
    pub fn to_inputs(&self) -> EngineResult<AccelerationInputs> {
        let mut stresses = StressProfile::new();
        for kind in StressKind::ALL {
            if self.is_enabled(kind)? {
                stresses.insert(self.condition(kind)?);
            }
        }
        let mode = if self.flag("enable_eyring", false)? {
            CombinationMode::EyringCombined(self.eyring_model()?)
        } else {
            CombinationMode::Additive
        };
        Ok(AccelerationInputs { stresses, mode })
    }
}

// ============================================================================
// Weibull Data
// ============================================================================

/// `weibull_data` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeibullData {
    /// Array of numbers / numeric strings, or one delimited string
    #[serde(default)]
    pub failures: Value,

    #[serde(default)]
    pub options: WeibullRequestOptions,
}

/// Cleaned failure times plus how many entries were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureSample {
    /// Positive finite times, in submission order
    pub times: Vec<f64>,
    pub discarded: usize,
}

impl FailureSample {
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }
}

impl WeibullData {
    /// Clean the failure list: drop non-positive, non-finite and
    /// non-numeric entries, keeping submission order.
    ///
    /// The field itself must be an array, a delimited string, a single
    /// number or null; anything else is a validation error.
    pub fn failure_sample(&self) -> EngineResult<FailureSample> {
        let raw: Vec<Option<f64>> = match &self.failures {
            Value::Array(items) => items.iter().map(parse_failure_entry).collect(),
            Value::String(s) => s
                .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|tok| !tok.is_empty())
                .map(|tok| tok.parse::<f64>().ok())
                .collect(),
            Value::Number(_) => vec![parse_failure_entry(&self.failures)],
            Value::Null => Vec::new(),
            other @ (Value::Bool(_) | Value::Object(_)) => {
                return Err(EngineError::validation(
                    "weibull_data.failures",
                    format!("expected an array, a delimited string or a number, got {other}"),
                ))
            }
        };

        let total = raw.len();
        let times: Vec<f64> = raw
            .into_iter()
            .flatten()
            .filter(|t| t.is_finite() && *t > 0.0)
            .collect();
        let discarded = total - times.len();
        if discarded > 0 {
            warn!(discarded, kept = times.len(), "Discarded non-positive or non-numeric failure entries");
        }
        Ok(FailureSample { times, discarded })
    }
}

fn parse_failure_entry(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `weibull_data.options` block as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeibullRequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_rank_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bx_life_percent: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_zero_failure: Option<Value>,
}

impl WeibullRequestOptions {
    /// Resolve against configured defaults, validating every supplied value.
    pub fn resolve(&self, defaults: &AnalysisConfig) -> EngineResult<WeibullOptions> {
        let median_rank = match self.median_rank_method.as_deref().map(str::trim) {
            None | Some("") => defaults.default_median_rank,
            Some(s) => s.parse::<MedianRankMethod>().map_err(|msg| {
                EngineError::validation("weibull_data.options.median_rank_method", msg)
            })?,
        };
        let regression = match self.regression_method.as_deref().map(str::trim) {
            None | Some("") => defaults.default_regression,
            Some(s) => s.parse::<RegressionMethod>().map_err(|msg| {
                EngineError::validation("weibull_data.options.regression_method", msg)
            })?,
        };

        let bx_field = "weibull_data.options.bx_life_percent";
        let bx_percent = match &self.bx_life_percent {
            Some(v) => lenient_number(bx_field, v)?.unwrap_or(defaults.default_bx_life_percent),
            None => defaults.default_bx_life_percent,
        };
        if !(bx_percent > 0.0 && bx_percent < 100.0) {
            return Err(EngineError::validation(
                bx_field,
                format!("must be strictly between 0 and 100, got {bx_percent}"),
            ));
        }

        let sample_size = match &self.sample_size {
            Some(v) => lenient_count("weibull_data.options.sample_size", v)?,
            None => None,
        };

        Ok(WeibullOptions {
            median_rank,
            regression,
            bx_percent,
            sample_size,
        })
    }

    /// Whether a failed fit should fall back to the zero-failure bound.
    pub fn fallback_to_zero_failure(&self) -> EngineResult<bool> {
        match &self.fallback_to_zero_failure {
            Some(v) => Ok(lenient_flag("weibull_data.options.fallback_to_zero_failure", v)?.unwrap_or(false)),
            None => Ok(false),
        }
    }
}

/// Parse a non-negative whole number (units on test).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count(field: &str, value: &Value) -> EngineResult<Option<usize>> {
    match lenient_number(field, value)? {
        None => Ok(None),
        Some(v) if v.fract() != 0.0 => {
            Err(EngineError::validation(field, format!("must be a whole number, got {v}")))
        }
        Some(v) if v < 0.0 => Err(EngineError::validation(field, format!("must not be negative, got {v}"))),
        Some(v) if v > MAX_EXACT_COUNT => Err(EngineError::validation(
            field,
            format!("must not exceed {MAX_EXACT_COUNT}, got {v}"),
        )),
        Some(v) => usize::try_from(v as u64)
            .map(Some)
            .map_err(|_| EngineError::validation(field, format!("{v} exceeds this platform's size limit"))),
    }
}

// ============================================================================
// Zero-Failure Parameters
// ============================================================================

/// `zero_fail_params` block as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZeroFailParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_test: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<Value>,
}

impl ZeroFailParams {
    fn required(field: &str, value: Option<&Value>) -> EngineResult<f64> {
        value
            .map(|v| lenient_number(field, v))
            .transpose()?
            .flatten()
            .ok_or_else(|| EngineError::validation(field, "required for zero-failure analysis"))
    }

    /// Parse into a typed test. Range checks happen in the estimator.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_test(&self) -> EngineResult<ZeroFailureTest> {
        let n = Self::required("zero_fail_params.n", self.n.as_ref())?;
        if n.fract() != 0.0 {
            return Err(EngineError::validation("zero_fail_params.n", format!("must be a whole number, got {n}")));
        }
        if n > MAX_EXACT_COUNT {
            return Err(EngineError::validation(
                "zero_fail_params.n",
                format!("must not exceed {MAX_EXACT_COUNT}, got {n}"),
            ));
        }
        let units = if n < 0.0 { 0 } else { n as u64 };
        Ok(ZeroFailureTest {
            units,
            test_hours: Self::required("zero_fail_params.t_test", self.t_test.as_ref())?,
            confidence: Self::required("zero_fail_params.cl", self.cl.as_ref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_number_accepts_strings() {
        assert_eq!(lenient_number("x", &json!("85")).unwrap(), Some(85.0));
        assert_eq!(lenient_number("x", &json!(" 0.7 ")).unwrap(), Some(0.7));
        assert_eq!(lenient_number("x", &json!(null)).unwrap(), None);
        assert_eq!(lenient_number("x", &json!("")).unwrap(), None);
    }

    #[test]
    fn test_lenient_number_rejects_garbage() {
        let err = lenient_number("af_params.t_use", &json!("hot")).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("af_params.t_use"));
        assert!(lenient_number("x", &json!("NaN")).is_err());
        assert!(lenient_number("x", &json!([1])).is_err());
    }

    #[test]
    fn test_lenient_flag_forms() {
        assert_eq!(lenient_flag("f", &json!(true)).unwrap(), Some(true));
        assert_eq!(lenient_flag("f", &json!(0)).unwrap(), Some(false));
        assert_eq!(lenient_flag("f", &json!("on")).unwrap(), Some(true));
        assert!(lenient_flag("f", &json!("maybe")).is_err());
    }

    #[test]
    fn test_default_flags_enable_temperature_and_humidity() {
        let params = AfParams::new()
            .set("t_use", 25)
            .set("t_alt", 85)
            .set("ea", 0.7)
            .set("rh_use", 60)
            .set("rh_alt", 85)
            .set("n_hum", 2);
        let inputs = params.to_inputs().unwrap();
        assert!(inputs.stresses.is_enabled(StressKind::Temperature));
        assert!(inputs.stresses.is_enabled(StressKind::Humidity));
        assert_eq!(inputs.stresses.enabled_count(), 2);
        assert_eq!(inputs.mode, CombinationMode::Additive);
    }

    #[test]
    fn test_missing_field_for_enabled_stress() {
        let params = AfParams::new()
            .set("enable_temp", false)
            .set("enable_hum", false)
            .set("enable_vib", true)
            .set("g_use", 1.0)
            .set("n_vib", 4.0);
        let err = params.to_inputs().unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("af_params.g_alt"), "{err}");
    }

    #[test]
    fn test_disabled_stress_ignores_its_fields() {
        let params = AfParams::new()
            .set("enable_temp", "false")
            .set("enable_hum", 0)
            .set("rh_use", "garbage");
        let inputs = params.to_inputs().unwrap();
        assert_eq!(inputs.stresses.enabled_count(), 0);
    }

    #[test]
    fn test_radiation_dose_rate_needs_both_rates() {
        let base = AfParams::new()
            .set("enable_temp", false)
            .set("enable_hum", false)
            .set("enable_rad", true)
            .set("d_use", 1.0)
            .set("d_alt", 10.0)
            .set("n_rad", 1.0)
            .set("dose_rate", 5.0);
        let only_one = base.clone().set("dose_rate_alt", 2.0).to_inputs().unwrap();
        assert!(matches!(
            only_one.stresses.get(StressKind::Radiation),
            Some(StressCondition::Radiation { dose_rate: None, .. })
        ));

        let both = base.set("dose_rate_use", 0.1).set("dose_rate_alt", 2.0).to_inputs().unwrap();
        match both.stresses.get(StressKind::Radiation) {
            Some(StressCondition::Radiation { dose_rate: Some(dr), .. }) => {
                assert!((dr.exponent - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected dose-rate scaling, got {other:?}"),
        }
    }

    #[test]
    fn test_eyring_mode_requires_stress_type() {
        let params = AfParams::new()
            .set("enable_temp", false)
            .set("enable_hum", false)
            .set("enable_eyring", true);
        let err = params.to_inputs().unwrap_err();
        assert!(err.to_string().contains("eyring_stress_type"));
    }

    #[test]
    fn test_failure_string_forms() {
        let data = WeibullData { failures: json!("100, 500;1200  abc -5"), ..Default::default() };
        let sample = data.failure_sample().unwrap();
        assert_eq!(sample.times, vec![100.0, 500.0, 1200.0]);
        assert_eq!(sample.discarded, 2);
    }

    #[test]
    fn test_failure_array_preserves_order() {
        let data = WeibullData { failures: json!([900, "300", 0, null, 450.5]), ..Default::default() };
        let sample = data.failure_sample().unwrap();
        assert_eq!(sample.times, vec![900.0, 300.0, 450.5]);
        assert_eq!(sample.discarded, 2);
    }

    #[test]
    fn test_missing_failures_is_empty() {
        assert!(WeibullData::default().failure_sample().unwrap().is_empty());
    }

    #[test]
    fn test_failures_of_wrong_type_rejected() {
        for bad in [json!({ "a": 1 }), json!(true)] {
            let data = WeibullData { failures: bad.clone(), ..Default::default() };
            let err = data.failure_sample().unwrap_err();
            assert_eq!(err.kind(), "validation", "{bad}");
            assert!(err.to_string().contains("weibull_data.failures"));
        }
    }

    #[test]
    fn test_counts_beyond_exact_range_rejected() {
        let params = ZeroFailParams { n: Some(json!(1e300)), t_test: Some(json!(1000)), cl: Some(json!(0.9)) };
        let err = params.to_test().unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("zero_fail_params.n"));

        let opts = WeibullRequestOptions { sample_size: Some(json!(1e20)), ..Default::default() };
        let err = opts.resolve(&AnalysisConfig::default()).unwrap_err();
        assert!(err.to_string().contains("sample_size"));

        let at_limit = ZeroFailParams { n: Some(json!(MAX_EXACT_COUNT)), ..params };
        assert_eq!(at_limit.to_test().unwrap().units, 9_007_199_254_740_992);
    }

    #[test]
    fn test_options_resolve_defaults() {
        let opts = WeibullRequestOptions::default().resolve(&AnalysisConfig::default()).unwrap();
        assert_eq!(opts.median_rank, MedianRankMethod::Bernard);
        assert_eq!(opts.regression, RegressionMethod::OnY);
        assert!((opts.bx_percent - 1.0).abs() < f64::EPSILON);
        assert_eq!(opts.sample_size, None);
    }

    #[test]
    fn test_options_reject_unknown_method_and_bad_bx() {
        let cfg = AnalysisConfig::default();
        let bad_method = WeibullRequestOptions { regression_method: Some("lsq".into()), ..Default::default() };
        assert_eq!(bad_method.resolve(&cfg).unwrap_err().kind(), "validation");
        let bad_bx = WeibullRequestOptions { bx_life_percent: Some(json!(150)), ..Default::default() };
        assert_eq!(bad_bx.resolve(&cfg).unwrap_err().kind(), "validation");
    }

    #[test]
    fn test_zero_fail_params_parse() {
        let params = ZeroFailParams { n: Some(json!("10")), t_test: Some(json!(1000)), cl: Some(json!(0.9)) };
        let test = params.to_test().unwrap();
        assert_eq!(test.units, 10);

        let fractional = ZeroFailParams { n: Some(json!(10.5)), ..params.clone() };
        assert_eq!(fractional.to_test().unwrap_err().kind(), "validation");

        let missing = ZeroFailParams { cl: None, ..params };
        assert!(missing.to_test().unwrap_err().to_string().contains("zero_fail_params.cl"));
    }

    #[test]
    fn test_mission_years_fallback() {
        let mut req = CalculationRequest::default();
        assert!((req.mission_years_or(2.0) - 2.0).abs() < f64::EPSILON);
        req.mission_years = Some(json!("3"));
        assert!((req.mission_years_or(2.0) - 3.0).abs() < f64::EPSILON);
        req.mission_years = Some(json!(-1));
        assert!((req.mission_years_or(2.0) - 2.0).abs() < f64::EPSILON);
        req.mission_years = Some(json!("soon"));
        assert!((req.mission_years_or(2.0) - 2.0).abs() < f64::EPSILON);
    }
}
