//! Shared data structures for the reliability engine
//!
//! - `stress`: stress conditions, Eyring model, combination mode
//! - `request`: loosely-typed request JSON and its lenient parsing
//! - `response`: response JSON shapes and output precision
//! - `thresholds`: warranty benchmark tiers and verdicts

mod stress;
mod request;
mod response;
// Public so the default floors stay reachable as `types::thresholds::benchmark_thresholds`.
pub mod thresholds;

pub use stress::*;
pub use request::*;
pub use response::*;
pub use thresholds::*;
