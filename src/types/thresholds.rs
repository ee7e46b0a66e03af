//! Warranty benchmark thresholds and classification verdicts

use serde::{Deserialize, Serialize};

/// Default warranty benchmark floors (reliability %, per mission bucket)
pub mod benchmark_thresholds {
    // === Up to 1 year ===
    /// Mission upper bound (years)
    pub const ONE_YEAR_UPPER: f64 = 1.0;
    /// Excellent floor (%)
    pub const ONE_YEAR_EXCELLENT: f64 = 99.5;
    /// Acceptable floor (%)
    pub const ONE_YEAR_ACCEPTABLE: f64 = 98.5;

    // === Up to 2 years ===
    pub const TWO_YEAR_UPPER: f64 = 2.0;
    pub const TWO_YEAR_EXCELLENT: f64 = 98.5;
    pub const TWO_YEAR_ACCEPTABLE: f64 = 97.0;

    // === Up to 3 years ===
    pub const THREE_YEAR_UPPER: f64 = 3.0;
    pub const THREE_YEAR_EXCELLENT: f64 = 90.0;
    pub const THREE_YEAR_ACCEPTABLE: f64 = 85.0;

    // === Beyond 3 years (4-5 year warranties) ===
    pub const EXTENDED_EXCELLENT: f64 = 85.0;
    pub const EXTENDED_ACCEPTABLE: f64 = 80.0;
}

/// One mission-duration bucket of the benchmark table.
///
/// A bucket applies to missions with `mission_years <= upper_years`; the last
/// bucket has no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTier {
    /// Inclusive upper bound in years; `None` for the open-ended last tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_years: Option<f64>,
    /// Reliability (%) at or above which the verdict is excellent
    pub excellent_floor: f64,
    /// Reliability (%) at or above which the verdict is acceptable
    pub acceptable_floor: f64,
    /// Industry average failure rate for this warranty length
    pub avg_failure_rate: String,
    /// Industry maximum tolerated failure rate
    pub max_failure_rate: String,
    /// Where the reference figures come from
    pub source: String,
}

impl BenchmarkTier {
    fn new(
        upper_years: Option<f64>,
        excellent_floor: f64,
        acceptable_floor: f64,
        avg_failure_rate: &str,
        max_failure_rate: &str,
        source: &str,
    ) -> Self {
        Self {
            upper_years,
            excellent_floor,
            acceptable_floor,
            avg_failure_rate: avg_failure_rate.to_string(),
            max_failure_rate: max_failure_rate.to_string(),
            source: source.to_string(),
        }
    }

    /// Whether this tier covers the given mission duration.
    pub fn covers(&self, mission_years: f64) -> bool {
        self.upper_years.map_or(true, |upper| mission_years <= upper)
    }
}

/// Built-in consumer-electronics warranty benchmark table.
pub fn default_benchmark_tiers() -> Vec<BenchmarkTier> {
    use benchmark_thresholds::*;
    vec![
        BenchmarkTier::new(
            Some(ONE_YEAR_UPPER),
            ONE_YEAR_EXCELLENT,
            ONE_YEAR_ACCEPTABLE,
            "0.5%",
            "1.5%",
            "1-year warranty standard (expert consensus)",
        ),
        BenchmarkTier::new(
            Some(TWO_YEAR_UPPER),
            TWO_YEAR_EXCELLENT,
            TWO_YEAR_ACCEPTABLE,
            "1.5%",
            "3%",
            "2-year warranty standard (US electronics industry average)",
        ),
        BenchmarkTier::new(
            Some(THREE_YEAR_UPPER),
            THREE_YEAR_EXCELLENT,
            THREE_YEAR_ACCEPTABLE,
            "10%",
            "15%",
            "3-year warranty standard (notebook field study data)",
        ),
        extended_warranty_tier(),
    ]
}

/// Open-ended tier for missions beyond three years.
pub fn extended_warranty_tier() -> BenchmarkTier {
    use benchmark_thresholds::{EXTENDED_ACCEPTABLE, EXTENDED_EXCELLENT};
    BenchmarkTier::new(
        None,
        EXTENDED_EXCELLENT,
        EXTENDED_ACCEPTABLE,
        "15%",
        "20%",
        "4-5 year warranty standard (enterprise / extended warranty)",
    )
}

/// Three-tier benchmark verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Insufficient = 0,
    Acceptable = 1,
    Excellent = 2,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Excellent => write!(f, "excellent"),
            Verdict::Acceptable => write!(f, "acceptable"),
            Verdict::Insufficient => write!(f, "insufficient"),
        }
    }
}
