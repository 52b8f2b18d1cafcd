//! # astragate
//!
//! State-vector gate engine for multi-controlled gates and the Quantum
//! Fourier Transform, with a Grover search built on top and a small
//! circuit-text front-end.
//!
//! ## Quick Start
//!
//! ```rust
//! use astragate::core::Simulator;
//!
//! # fn main() -> Result<(), astragate::error::GateError> {
//! let mut sim = Simulator::with_seed(3, 42)?;
//!
//! // |011⟩ → Toffoli(0, 1 → 2) → |111⟩
//! sim.x(0)?.x(1)?.toffoli(0, 1, 2)?;
//! assert_eq!(sim.most_probable(), 0b111);
//!
//! // QFT and its inverse cancel
//! sim.qft(&[0, 1, 2], false)?.qft(&[0, 1, 2], true)?;
//! assert_eq!(sim.most_probable(), 0b111);
//! # Ok(())
//! # }
//! ```
//!
//! Grover search:
//!
//! ```rust
//! let found = astragate::algorithms::run_grover(2, 3, 1).unwrap();
//! assert_eq!(found, 3);
//! ```

pub mod algorithms;
pub mod compiler;
pub mod config;
pub mod core;
pub mod error;
pub mod runtime;

pub use config::SimConfig;
pub use error::{CircuitError, GateError, GateResult};
