// 8.0: trade engine. runs a proposal through resolution, simulation and classification.
// stateless between calls and free of I/O: a snapshot and a proposal in, a verdict out.

mod config;
mod core;
mod evaluate;
mod results;

pub use config::EngineConfig;
pub use core::TradeEngine;
pub use results::{EngineError, EvaluationRequest, ValidationResult};
