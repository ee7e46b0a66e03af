//! Warranty benchmark classification
//!
//! Maps a mission duration and its reliability onto the first tier whose
//! upper bound covers the mission, then compares reliability (%) against the
//! tier's floors.

use serde::Serialize;

use crate::types::{default_benchmark_tiers, extended_warranty_tier, BenchmarkTier, Verdict};

/// Verdict plus the tier data that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub reliability_percent: f64,
    pub excellent_floor: f64,
    pub acceptable_floor: f64,
    pub avg_failure_rate: String,
    pub max_failure_rate: String,
    pub source: String,
}

/// Classify using the built-in table.
pub fn classify(mission_years: f64, reliability: f64) -> Classification {
    classify_with(&default_benchmark_tiers(), mission_years, reliability)
}

/// Classify against an explicit ordered tier table.
pub fn classify_with(tiers: &[BenchmarkTier], mission_years: f64, reliability: f64) -> Classification {
    classify_percent(tiers, mission_years, reliability * 100.0)
}

/// Classify a reliability already expressed in percent.
///
/// Missions beyond every bounded tier fall into the last tier; an empty table
/// falls back to the built-in extended-warranty tier.
pub fn classify_percent(tiers: &[BenchmarkTier], mission_years: f64, reliability_percent: f64) -> Classification {
    let tier = tiers
        .iter()
        .find(|t| t.covers(mission_years))
        .or_else(|| tiers.last())
        .cloned()
        .unwrap_or_else(extended_warranty_tier);

    let verdict = if reliability_percent >= tier.excellent_floor {
        Verdict::Excellent
    } else if reliability_percent >= tier.acceptable_floor {
        Verdict::Acceptable
    } else {
        Verdict::Insufficient
    };

    Classification {
        verdict,
        reliability_percent,
        excellent_floor: tier.excellent_floor,
        acceptable_floor: tier.acceptable_floor,
        avg_failure_rate: tier.avg_failure_rate,
        max_failure_rate: tier.max_failure_rate,
        source: tier.source,
    }
}
