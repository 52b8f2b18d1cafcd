/// Circuit front-end.
///
/// Pipeline: circuit text → Lexer → Parser → IR → Runtime Executor → Result
///
/// Each stage is a separate module with a clean boundary.
/// Errors carry source line numbers for precise diagnostics.
pub mod ir;
pub mod lexer;
pub mod list;
pub mod parser;

pub use crate::error::CircuitError;
pub use crate::runtime::{execute, ExecutionResult, MeasurementRecord};
pub use ir::{Instruction, Program, SingleGate};
pub use list::{parse_index_list, ListError};
pub use parser::parse;

use crate::config::SimConfig;

/// One-shot: lex + parse circuit text, return the validated Program.
pub fn parse_source(source: &str) -> Result<Program, CircuitError> {
    let tokens = lexer::tokenize(source)?;
    parser::parse(tokens)
}

/// One-shot: lex + parse + execute under `config`.
pub fn run(source: &str, config: &SimConfig) -> Result<ExecutionResult, CircuitError> {
    let program = parse_source(source)?;
    crate::runtime::execute(&program, config)
}
