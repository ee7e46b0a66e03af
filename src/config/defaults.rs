//! System-wide default constants.
//!
//! Centralises physical constants and request defaults. Grouped by subsystem
//! for easy discovery.

// ============================================================================
// Physics
// ============================================================================

/// Boltzmann constant (eV/K) used by the Arrhenius and Eyring models.
pub const BOLTZMANN_EV_PER_K: f64 = 8.617e-5;

/// Offset from degrees Celsius to Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Hours in a (non-leap) year, used for mission and field-time conversion.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Failures-in-time scale: failures per 10^9 device-hours.
pub const FIT_SCALE: f64 = 1e9;

// ============================================================================
// Analysis
// ============================================================================

/// Mission duration used when the request omits `mission_years` or sends an
/// unusable value.
pub const DEFAULT_MISSION_YEARS: f64 = 2.0;

/// Bx life percentile used when the request omits `bx_life_percent`.
pub const DEFAULT_BX_LIFE_PERCENT: f64 = 1.0;

/// Default exponent on the radiation dose-rate ratio.
pub const DEFAULT_DOSE_RATE_EXPONENT: f64 = 1.0;

/// Minimum distinct positive failure times for a Weibull fit.
pub const MIN_DISTINCT_FAILURES: usize = 2;

/// Largest count accepted from a request: 2^53, beyond which f64 no longer
/// holds every whole number.
pub const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Bisection iterations for the exact (Beta-median) rank.
///
/// 80 halvings of [0, 1] reach below f64 resolution.
pub const MEDIAN_RANK_BISECTION_ITERATIONS: usize = 80;

// ============================================================================
// Output
// ============================================================================

/// Decimal places for acceleration factors and fit parameters.
pub const AF_DECIMALS: i32 = 4;

/// Decimal places for life figures (hours, years, FIT).
pub const LIFE_DECIMALS: i32 = 2;

/// Decimal places for mission reliabilities.
pub const RELIABILITY_DECIMALS: i32 = 6;

// ============================================================================
// Configuration Loading
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ALT_RELIABILITY_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "reliability.toml";
