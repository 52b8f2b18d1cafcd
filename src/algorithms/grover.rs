/// Grover search over an n-qubit register with a single marked basis state.
///
/// One iteration is a phase oracle (negate the marked amplitude) followed by
/// the diffusion operator H⊗ⁿ · (negate |0…0⟩) · H⊗ⁿ. The result is read out
/// deterministically as the most probable basis state; no sampling.
use crate::core::gates::{apply_single_qubit_gate, hadamard};
use crate::core::StateVector;
use crate::error::{GateError, GateResult};
use std::f64::consts::FRAC_PI_4;
use tracing::{debug, info, warn};

/// Negate the amplitude of basis state `target`.
pub fn oracle(state: &mut StateVector, target: usize) -> GateResult<()> {
    let dim = state.dim();
    let amp = state
        .amplitudes_mut()
        .get_mut(target)
        .ok_or(GateError::BasisStateOutOfRange { index: target, dim })?;
    *amp = -*amp;
    Ok(())
}

/// Inversion about the mean (up to a global phase).
pub fn diffusion(state: &mut StateVector) -> GateResult<()> {
    hadamard_all(state)?;
    let zero = &mut state.amplitudes_mut()[0];
    *zero = -*zero;
    hadamard_all(state)
}

fn hadamard_all(state: &mut StateVector) -> GateResult<()> {
    let h = hadamard();
    for qubit in 0..state.num_qubits() {
        apply_single_qubit_gate(state, &h, qubit)?;
    }
    Ok(())
}

/// ⌊π/4 · √(2^n)⌋, never less than one.
pub fn optimal_iterations(num_qubits: usize) -> usize {
    let space = (num_qubits as f64).exp2();
    ((FRAC_PI_4 * space.sqrt()).floor() as usize).max(1)
}

/// Run `iterations` Grover rounds from the uniform superposition and return
/// the most probable basis index.
pub fn run_grover(num_qubits: usize, target: usize, iterations: usize) -> GateResult<usize> {
    GroverSearch::new(num_qubits, target)
        .iterations(iterations)
        .run()
        .map(|outcome| outcome.index)
}

/// Result of a [`GroverSearch`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroverOutcome {
    /// Most probable basis state after the last iteration
    pub index: usize,
    /// Its probability
    pub probability: f64,
    pub iterations: usize,
}

impl GroverOutcome {
    pub fn found(&self, target: usize) -> bool {
        self.index == target
    }
}

/// Builder over [`run_grover`] that defaults to the optimal iteration count
/// and keeps the final probability.
#[derive(Debug, Clone)]
pub struct GroverSearch {
    num_qubits: usize,
    target: usize,
    iterations: Option<usize>,
}

impl GroverSearch {
    pub fn new(num_qubits: usize, target: usize) -> Self {
        Self { num_qubits, target, iterations: None }
    }

    /// Override the iteration count (default: [`optimal_iterations`]).
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn run(&self) -> GateResult<GroverOutcome> {
        let mut state = StateVector::new(self.num_qubits)?;
        if self.target >= state.dim() {
            return Err(GateError::BasisStateOutOfRange { index: self.target, dim: state.dim() });
        }

        let optimal = optimal_iterations(self.num_qubits);
        let iterations = self.iterations.unwrap_or(optimal);
        if iterations > optimal {
            warn!(
                iterations,
                optimal, "Grover iteration count exceeds the optimum; success probability oscillates"
            );
        }
        info!(num_qubits = self.num_qubits, target = self.target, iterations, "Grover search started");

        hadamard_all(&mut state)?;
        for round in 0..iterations {
            oracle(&mut state, self.target)?;
            diffusion(&mut state)?;
            debug!(round, p_target = state.probability(self.target), "Grover iteration");
        }

        let index = state.max_probability_index();
        let probability = state.probability(index);
        info!(index, probability, "Grover search finished");
        Ok(GroverOutcome { index, probability, iterations })
    }
}
