/// Runtime layer: runs parsed programs on the simulator.
///
/// Architecture:
///   circuit text → Compiler (lexer+parser+IR) → Runtime Executor → Result
pub mod executor;

pub use executor::{execute, ExecutionResult, MeasurementRecord};
