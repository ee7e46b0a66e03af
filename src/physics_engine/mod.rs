//! Physics Engine Module
//!
//! Deterministic acceleration-factor calculations. Everything here is a pure
//! function of its inputs.
//!
//! - `acceleration_models` - one AF model per stress type, plus Eyring
//! - `combinator` - composes enabled AFs into the total
//! - `field_time` - test hours → equivalent field hours/years

pub mod acceleration_models;
pub mod combinator;
pub mod field_time;

pub use acceleration_models::{
    arrhenius_af, chemical_af, coffin_manson_af, condition_af, eyring_af, peck_af, radiation_af,
    uv_af, vibration_af, voltage_af, EyringOutcome,
};
pub use combinator::{combine, AfBreakdown, EyringContribution};
pub use field_time::{equivalent_field_time, EquivalentFieldTime};
