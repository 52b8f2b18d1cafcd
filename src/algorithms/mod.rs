/// Algorithms composed from the gate engine.
pub mod grover;

pub use grover::{diffusion, optimal_iterations, oracle, run_grover, GroverOutcome, GroverSearch};
