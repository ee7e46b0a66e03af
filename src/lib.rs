//! ALT Reliability: Accelerated Life Test reliability engine
//!
//! Turns accelerated-test conditions and observed failures into use-condition
//! life estimates.
//!
//! ## Architecture
//!
//! - **Physics Engine**: per-stress acceleration factors (Arrhenius, Peck,
//!   Coffin-Manson, Eyring, ...) and their combination
//! - **Life Estimation**: Weibull median-rank regression, or a chi-squared
//!   bound when no unit failed
//! - **Benchmark**: warranty-tier verdict on the mission reliability
//! - **Engine**: request → response orchestration

pub mod benchmark;
pub mod config;
pub mod engine;
pub mod error;
pub mod life_estimation;
pub mod physics_engine;
pub mod types;

// Re-export configuration
pub use config::ReliabilityConfig;

// Re-export the request/response contract
pub use types::{
    AfParams, CalculationRequest, CalculationResponse, StressCondition, StressKind,
    StressProfile, Verdict, WeibullData, ZeroFailParams,
};

// Re-export engine entry points
pub use engine::{calculate, calculate_value, calculate_with, evaluate, Evaluation, LifeEstimate};
pub use error::{EngineError, EngineResult};
