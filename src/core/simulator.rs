/// High-level simulator interface.
///
/// `Simulator` owns a register and a measurement RNG and exposes the gate
/// kernels as chainable calls:
///
/// ```ignore
/// let mut sim = Simulator::with_seed(3, 7)?;
/// sim.h(0)?.cnot(0, 1)?.toffoli(0, 1, 2)?;
/// let bit = sim.measure(2)?;
/// ```
///
/// Every gate call returns `GateResult<&mut Self>`; a rejected call leaves
/// the register unchanged.
use super::gates::{self, Matrix2x2};
use super::qft::{apply_qft_with, QftMode};
use super::state::StateVector;
use crate::error::GateResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

pub struct Simulator {
    state: StateVector,
    /// Last outcome per qubit (None = not measured since the last reset)
    measurements: Vec<Option<bool>>,
    seed: Option<u64>,
    rng: StdRng,
    qft_mode: QftMode,
}

impl Simulator {
    /// `num_qubits` qubits in |0...0⟩, measurement seeded from OS entropy.
    pub fn new(num_qubits: usize) -> GateResult<Self> {
        Self::build(num_qubits, None)
    }

    /// Fixed-seed simulator: identical gate sequences give identical outcomes.
    pub fn with_seed(num_qubits: usize, seed: u64) -> GateResult<Self> {
        Self::build(num_qubits, Some(seed))
    }

    fn build(num_qubits: usize, seed: Option<u64>) -> GateResult<Self> {
        Ok(Self {
            state: StateVector::new(num_qubits)?,
            measurements: vec![None; num_qubits],
            seed,
            rng: make_rng(seed),
            qft_mode: QftMode::default(),
        })
    }

    /// Select the construction used by [`Simulator::qft`].
    pub fn set_qft_mode(&mut self, mode: QftMode) -> &mut Self {
        self.qft_mode = mode;
        self
    }

    pub fn qft_mode(&self) -> QftMode {
        self.qft_mode
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Direct access to the register, e.g. to prepare a basis state.
    pub fn state_mut(&mut self) -> &mut StateVector {
        &mut self.state
    }

    pub fn measurements(&self) -> &[Option<bool>] {
        &self.measurements
    }

    // ── Single-Qubit Gates ────────────────────────────────────────────────

    pub fn h(&mut self, qubit: usize) -> GateResult<&mut Self> {
        self.apply(&gates::hadamard(), qubit)
    }

    pub fn x(&mut self, qubit: usize) -> GateResult<&mut Self> {
        self.apply(&gates::pauli_x(), qubit)
    }

    pub fn y(&mut self, qubit: usize) -> GateResult<&mut Self> {
        self.apply(&gates::pauli_y(), qubit)
    }

    pub fn z(&mut self, qubit: usize) -> GateResult<&mut Self> {
        self.apply(&gates::pauli_z(), qubit)
    }

    pub fn s(&mut self, qubit: usize) -> GateResult<&mut Self> {
        self.apply(&gates::s_gate(), qubit)
    }

    pub fn t(&mut self, qubit: usize) -> GateResult<&mut Self> {
        self.apply(&gates::t_gate(), qubit)
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> GateResult<&mut Self> {
        self.apply(&gates::rx(theta), qubit)
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> GateResult<&mut Self> {
        self.apply(&gates::ry(theta), qubit)
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> GateResult<&mut Self> {
        self.apply(&gates::rz(theta), qubit)
    }

    pub fn phase(&mut self, qubit: usize, theta: f64) -> GateResult<&mut Self> {
        self.apply(&gates::phase_gate(theta), qubit)
    }

    /// Apply an arbitrary 2×2 matrix.
    pub fn apply(&mut self, gate: &Matrix2x2, qubit: usize) -> GateResult<&mut Self> {
        gates::apply_single_qubit_gate(&mut self.state, gate, qubit)?;
        Ok(self)
    }

    // ── Multi-Qubit Gates ─────────────────────────────────────────────────

    pub fn cnot(&mut self, control: usize, target: usize) -> GateResult<&mut Self> {
        gates::apply_cnot(&mut self.state, control, target)?;
        Ok(self)
    }

    pub fn cz(&mut self, control: usize, target: usize) -> GateResult<&mut Self> {
        gates::apply_cz(&mut self.state, control, target)?;
        Ok(self)
    }

    pub fn swap(&mut self, qubit_a: usize, qubit_b: usize) -> GateResult<&mut Self> {
        gates::apply_swap(&mut self.state, qubit_a, qubit_b)?;
        Ok(self)
    }

    pub fn cphase(&mut self, control: usize, target: usize, theta: f64) -> GateResult<&mut Self> {
        gates::apply_controlled_phase(&mut self.state, control, target, theta)?;
        Ok(self)
    }

    pub fn toffoli(&mut self, control1: usize, control2: usize, target: usize) -> GateResult<&mut Self> {
        gates::apply_toffoli(&mut self.state, control1, control2, target)?;
        Ok(self)
    }

    pub fn fredkin(&mut self, control: usize, target1: usize, target2: usize) -> GateResult<&mut Self> {
        gates::apply_fredkin(&mut self.state, control, target1, target2)?;
        Ok(self)
    }

    pub fn mcx(&mut self, controls: &[usize], target: usize) -> GateResult<&mut Self> {
        gates::apply_multi_controlled_x(&mut self.state, controls, target)?;
        Ok(self)
    }

    pub fn mcz(&mut self, controls: &[usize], target: usize) -> GateResult<&mut Self> {
        gates::apply_multi_controlled_z(&mut self.state, controls, target)?;
        Ok(self)
    }

    /// QFT (or inverse) over `qubits` using the configured [`QftMode`].
    pub fn qft(&mut self, qubits: &[usize], inverse: bool) -> GateResult<&mut Self> {
        apply_qft_with(&mut self.state, qubits, inverse, self.qft_mode)?;
        Ok(self)
    }

    // ── Measurement ───────────────────────────────────────────────────────

    /// Measure a single qubit and collapse the register.
    /// Returns `true` for |1⟩.
    pub fn measure(&mut self, qubit: usize) -> GateResult<bool> {
        let sample: f64 = self.rng.gen();
        let outcome = self.state.collapse(qubit, sample)?;
        self.measurements[qubit] = Some(outcome);
        Ok(outcome)
    }

    /// Measure every qubit in ascending order.
    pub fn measure_all(&mut self) -> GateResult<Vec<bool>> {
        (0..self.num_qubits()).map(|q| self.measure(q)).collect()
    }

    /// Basis-state probabilities, without collapsing.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    pub fn qubit_probability_one(&self, qubit: usize) -> f64 {
        self.state.marginal_probability_one(qubit)
    }

    /// Most likely basis state (lowest index on ties).
    pub fn most_probable(&self) -> usize {
        self.state.max_probability_index()
    }

    // ── State Control ─────────────────────────────────────────────────────

    /// Back to |0...0⟩ with measurements cleared. A seeded simulator also
    /// rewinds its RNG, so a reset run replays the same outcomes.
    pub fn reset(&mut self) {
        self.state.reset();
        self.measurements.fill(None);
        if self.seed.is_some() {
            self.rng = make_rng(self.seed);
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl fmt::Display for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        write!(f, "Measurements: [")?;
        for (i, m) in self.measurements.iter().enumerate() {
            match m {
                Some(true) => write!(f, "q{}=1", i)?,
                Some(false) => write!(f, "q{}=0", i)?,
                None => write!(f, "q{}=?", i)?,
            }
            if i + 1 < self.measurements.len() {
                write!(f, ", ")?;
            }
        }
        writeln!(f, "]")
    }
}
