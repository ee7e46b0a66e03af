//! Reliability Configuration - physical constants, request defaults and
//! benchmark tiers as operator-tunable TOML values
//!
//! Each struct implements `Default` with the built-in values, so a missing
//! file or section changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::life_estimation::{MedianRankMethod, RegressionMethod};
use crate::types::{default_benchmark_tiers, BenchmarkTier};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the reliability engine.
///
/// Load with `ReliabilityConfig::load()` which searches:
/// 1. `$ALT_RELIABILITY_CONFIG` env var
/// 2. `./reliability.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    /// Physical constants
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Defaults applied when a request omits an option
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Response formatting
    #[serde(default)]
    pub output: OutputConfig,

    /// Warranty benchmark table
    #[serde(default)]
    pub benchmarks: BenchmarkConfig,
}

impl ReliabilityConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ALT_RELIABILITY_CONFIG` environment variable
    /// 2. `./reliability.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded reliability config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded reliability config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Two-pass: unknown keys are reported as warnings first, then the
    /// document is deserialized and range-checked.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate constants and the benchmark table for internal consistency.
    ///
    /// Rules:
    /// - Physical constants must be finite and positive
    /// - Default mission and Bx percentile must be usable as request values
    /// - Tier floors must satisfy 0 <= acceptable <= excellent <= 100
    /// - Tier bounds must ascend and only the last tier may be unbounded
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (mut errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        let tiers = &self.benchmarks.tiers;
        if tiers.is_empty() {
            errors.push("benchmarks.tiers: at least one tier is required".to_string());
        }
        for (i, tier) in tiers.iter().enumerate() {
            Self::check_floors(tier, i, &mut errors);
            let is_last = i + 1 == tiers.len();
            match tier.upper_years {
                None if !is_last => errors.push(format!(
                    "benchmarks.tiers[{i}]: only the last tier may omit upper_years"
                )),
                Some(upper) if !upper.is_finite() || upper <= 0.0 => errors.push(format!(
                    "benchmarks.tiers[{i}].upper_years = {upper} must be finite and > 0"
                )),
                _ => {}
            }
        }
        for (i, pair) in tiers.windows(2).enumerate() {
            if let (Some(a), Some(b)) = (pair[0].upper_years, pair[1].upper_years) {
                if b <= a {
                    errors.push(format!(
                        "benchmarks.tiers[{}].upper_years ({b}) must exceed the previous tier's ({a})",
                        i + 1
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_floors(tier: &BenchmarkTier, index: usize, errors: &mut Vec<String>) {
        let (excellent, acceptable) = (tier.excellent_floor, tier.acceptable_floor);
        // NaN comparisons silently pass, catch them explicitly
        if !excellent.is_finite() || !acceptable.is_finite() {
            errors.push(format!(
                "benchmarks.tiers[{index}]: floors must be finite (got excellent={excellent}, acceptable={acceptable})"
            ));
            return;
        }
        if !(0.0..=100.0).contains(&acceptable) || !(0.0..=100.0).contains(&excellent) {
            errors.push(format!(
                "benchmarks.tiers[{index}]: floors must lie within 0-100 %"
            ));
        }
        if excellent < acceptable {
            errors.push(format!(
                "benchmarks.tiers[{index}]: excellent_floor ({excellent:.2}) must be >= acceptable_floor ({acceptable:.2})"
            ));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Physics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Boltzmann constant (eV/K)
    #[serde(default = "default_boltzmann")]
    pub boltzmann_ev_per_k: f64,

    /// Hours per year for mission and field-time conversion
    #[serde(default = "default_hours_per_year")]
    pub hours_per_year: f64,
}

fn default_boltzmann() -> f64 { defaults::BOLTZMANN_EV_PER_K }
fn default_hours_per_year() -> f64 { defaults::HOURS_PER_YEAR }

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            boltzmann_ev_per_k: default_boltzmann(),
            hours_per_year: default_hours_per_year(),
        }
    }
}

// ============================================================================
// Analysis Defaults
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Mission duration when the request omits or garbles `mission_years`
    #[serde(default = "default_mission_years")]
    pub default_mission_years: f64,

    /// Bx percentile when the request omits `bx_life_percent`
    #[serde(default = "default_bx_life_percent")]
    pub default_bx_life_percent: f64,

    /// Median-rank method when the request omits it
    #[serde(default)]
    pub default_median_rank: MedianRankMethod,

    /// Regression method when the request omits it
    #[serde(default)]
    pub default_regression: RegressionMethod,
}

fn default_mission_years() -> f64 { defaults::DEFAULT_MISSION_YEARS }
fn default_bx_life_percent() -> f64 { defaults::DEFAULT_BX_LIFE_PERCENT }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_mission_years: default_mission_years(),
            default_bx_life_percent: default_bx_life_percent(),
            default_median_rank: MedianRankMethod::default(),
            default_regression: RegressionMethod::default(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Round response figures (AF 4 dp, life 2 dp, reliability 6 dp)
    #[serde(default = "default_round_results")]
    pub round_results: bool,
}

fn default_round_results() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            round_results: default_round_results(),
        }
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Ordered tiers, ascending by `upper_years`; last tier open-ended
    #[serde(default = "default_benchmark_tiers")]
    pub tiers: Vec<BenchmarkTier>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            tiers: default_benchmark_tiers(),
        }
    }
}
