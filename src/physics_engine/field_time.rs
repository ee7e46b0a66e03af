//! Equivalent field time
//!
//! Hours at the stress condition × total AF = hours of use-condition exposure.

use serde::Serialize;

/// Field exposure represented by an accelerated test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquivalentFieldTime {
    pub hours: f64,
    pub years: f64,
}

/// Convert test hours to equivalent field hours and years.
///
/// A non-positive or non-finite test duration is zero exposure.
pub fn equivalent_field_time(test_hours: f64, af_total: f64, hours_per_year: f64) -> EquivalentFieldTime {
    let hours = if test_hours.is_finite() && test_hours > 0.0 {
        test_hours * af_total
    } else {
        0.0
    };
    EquivalentFieldTime {
        hours,
        years: hours / hours_per_year,
    }
}
