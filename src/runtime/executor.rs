/// Program executor.
///
/// Runs a validated `Program` top to bottom on a fresh `Simulator`:
///
///   - Gates dispatch to the engine kernels; a rejected operand aborts the
///     run with `CircuitError::Gate`
///   - `MeasureNth` collapses one qubit and appends a `MeasurementRecord`
///   - The probability distribution is snapshotted once, immediately
///     before the first measurement
///
/// The register width is checked against `SimConfig::max_qubits` before any
/// state is allocated.
use crate::compiler::ir::{Instruction, Program};
use crate::config::SimConfig;
use crate::core::Simulator;
use crate::error::CircuitError;
use tracing::{debug, info};

// ── Result types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub qubit: usize,
    pub outcome: bool,
    /// Instruction index at which this measurement occurred.
    pub step: usize,
}

#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub num_qubits: usize,
    /// All measurement outcomes in execution order.
    pub measurements: Vec<MeasurementRecord>,
    /// Probability snapshot taken before the first measurement (if any).
    pub pre_measurement_probs: Option<Vec<f64>>,
    /// Final probability distribution (post-collapse if measured).
    pub final_probabilities: Vec<f64>,
    /// Unitary operations applied.
    pub gate_count: usize,
    /// Most probable basis state of the final distribution (lowest index on ties).
    pub most_probable: usize,
}

impl ExecutionResult {
    /// Last measured outcome of qubit `q`. Returns `None` if never measured.
    pub fn outcome(&self, qubit: usize) -> Option<bool> {
        self.measurements.iter().rfind(|m| m.qubit == qubit).map(|m| m.outcome)
    }

    /// True if every qubit has at least one measurement record.
    pub fn fully_collapsed(&self) -> bool {
        (0..self.num_qubits).all(|q| self.outcome(q).is_some())
    }

    /// Measurement outcomes as a bit-string, qubit 0 first.
    /// Returns `None` if not all qubits were measured.
    pub fn bitstring(&self) -> Option<String> {
        (0..self.num_qubits)
            .map(|q| self.outcome(q).map(|bit| if bit { '1' } else { '0' }))
            .collect()
    }

    /// The distribution worth reporting: the pre-measurement snapshot when
    /// the program measured, the final state otherwise.
    pub fn report_probabilities(&self) -> &[f64] {
        self.pre_measurement_probs.as_deref().unwrap_or(&self.final_probabilities)
    }

    /// Basis states of [`report_probabilities`](Self::report_probabilities)
    /// above `threshold`, as `(ket label, probability)` sorted by index.
    /// Labels put qubit 0 rightmost.
    pub fn significant_states(&self, threshold: f64) -> Vec<(String, f64)> {
        let n = self.num_qubits;
        self.report_probabilities()
            .iter()
            .enumerate()
            .filter(|(_, &p)| p > threshold)
            .map(|(i, &p)| (format!("{i:0>n$b}"), p))
            .collect()
    }
}

// ── Execution ─────────────────────────────────────────────────────────────

/// Execute `program` on a fresh simulator configured by `config`.
pub fn execute(program: &Program, config: &SimConfig) -> Result<ExecutionResult, CircuitError> {
    config.check_width(program.num_qubits)?;

    let mut sim = match config.seed {
        Some(seed) => Simulator::with_seed(program.num_qubits, seed)?,
        None => Simulator::new(program.num_qubits)?,
    };
    sim.set_qft_mode(config.qft_mode);

    let mut measurements: Vec<MeasurementRecord> = Vec::new();
    let mut pre_measurement_probs: Option<Vec<f64>> = None;
    let mut gate_count = 0usize;

    for (step, instr) in program.instructions.iter().enumerate() {
        debug!(step, gate = instr.mnemonic(), qubits = ?instr.qubits(), "apply");

        match instr {
            Instruction::Single { gate, qubit, theta } => {
                sim.apply(&gate.matrix(*theta), *qubit)?;
            }
            Instruction::Cnot { control, target } => {
                sim.cnot(*control, *target)?;
            }
            Instruction::Cz { control, target } => {
                sim.cz(*control, *target)?;
            }
            Instruction::Swap { qubit_a, qubit_b } => {
                sim.swap(*qubit_a, *qubit_b)?;
            }
            Instruction::Toffoli { control1, control2, target } => {
                sim.toffoli(*control1, *control2, *target)?;
            }
            Instruction::Fredkin { control, target1, target2 } => {
                sim.fredkin(*control, *target1, *target2)?;
            }
            Instruction::MultiControlledX { controls, target } => {
                sim.mcx(controls, *target)?;
            }
            Instruction::MultiControlledZ { controls, target } => {
                sim.mcz(controls, *target)?;
            }
            Instruction::Qft { qubits, inverse } => {
                sim.qft(qubits, *inverse)?;
            }
            Instruction::MeasureNth(qubit) => {
                if pre_measurement_probs.is_none() {
                    pre_measurement_probs = Some(sim.probabilities());
                }
                let outcome = sim.measure(*qubit)?;
                debug!(qubit, outcome, "measured");
                measurements.push(MeasurementRecord { qubit: *qubit, outcome, step });
                continue;
            }
        }
        gate_count += 1;
    }

    let most_probable = sim.most_probable();
    info!(
        num_qubits = program.num_qubits,
        gate_count,
        measurements = measurements.len(),
        most_probable,
        "program executed"
    );

    Ok(ExecutionResult {
        num_qubits: program.num_qubits,
        measurements,
        pre_measurement_probs,
        final_probabilities: sim.probabilities(),
        gate_count,
        most_probable,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────
