/// Circuit intermediate representation.
///
/// A parsed circuit is a flat, ordered sequence of `Instruction`s wrapped in
/// a validated `Program`. The executor dispatches on the enum directly.
///
/// Design principles:
///   - One enum variant per gate kind, exhaustive `match` everywhere
///   - Angles stored as f64 radians
///   - Qubit indices as usize, validated against the register at parse time
///   - `Display` produces the one-line debug form of each instruction
use crate::core::gates::{self, Matrix2x2};
use std::fmt;

// ── SingleGate ────────────────────────────────────────────────────────────

/// Named single-qubit gates accepted in `gateType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    /// √X
    V,
    /// √X†
    Vdg,
    Rx,
    Ry,
    Rz,
    Phase,
}

impl SingleGate {
    /// Case-insensitive lookup, including the visualizer's `adj*` spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let gate = match name.to_ascii_lowercase().as_str() {
            "i" | "id" => Self::I,
            "x" => Self::X,
            "y" => Self::Y,
            "z" => Self::Z,
            "h" => Self::H,
            "s" => Self::S,
            "sdg" | "adjs" => Self::Sdg,
            "t" => Self::T,
            "tdg" | "adjt" => Self::Tdg,
            "v" | "sx" => Self::V,
            "vdg" | "adjv" | "sxdg" => Self::Vdg,
            "rx" => Self::Rx,
            "ry" => Self::Ry,
            "rz" => Self::Rz,
            "p" | "phase" => Self::Phase,
            _ => return None,
        };
        Some(gate)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::H => "H",
            Self::S => "S",
            Self::Sdg => "Sdg",
            Self::T => "T",
            Self::Tdg => "Tdg",
            Self::V => "V",
            Self::Vdg => "Vdg",
            Self::Rx => "Rx",
            Self::Ry => "Ry",
            Self::Rz => "Rz",
            Self::Phase => "P",
        }
    }

    /// True if the gate reads `theta`.
    pub fn is_parametric(&self) -> bool {
        matches!(self, Self::Rx | Self::Ry | Self::Rz | Self::Phase)
    }

    /// The 2×2 matrix for this gate. `theta` is ignored by fixed gates.
    pub fn matrix(&self, theta: f64) -> Matrix2x2 {
        match self {
            Self::I => gates::identity(),
            Self::X => gates::pauli_x(),
            Self::Y => gates::pauli_y(),
            Self::Z => gates::pauli_z(),
            Self::H => gates::hadamard(),
            Self::S => gates::s_gate(),
            Self::Sdg => gates::s_dagger(),
            Self::T => gates::t_gate(),
            Self::Tdg => gates::t_dagger(),
            Self::V => gates::sqrt_x(),
            Self::Vdg => gates::sqrt_x_dagger(),
            Self::Rx => gates::rx(theta),
            Self::Ry => gates::ry(theta),
            Self::Rz => gates::rz(theta),
            Self::Phase => gates::phase_gate(theta),
        }
    }
}

impl fmt::Display for SingleGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Instruction ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    // ── Single-qubit gates ──────────────────────────────────────────────
    Single { gate: SingleGate, qubit: usize, theta: f64 },

    // ── Two-qubit gates ─────────────────────────────────────────────────
    Cnot { control: usize, target: usize },
    Cz { control: usize, target: usize },
    Swap { qubit_a: usize, qubit_b: usize },

    // ── Measurement ─────────────────────────────────────────────────────
    MeasureNth(usize),

    // ── Multi-controlled gates ──────────────────────────────────────────
    Toffoli { control1: usize, control2: usize, target: usize },
    Fredkin { control: usize, target1: usize, target2: usize },
    MultiControlledX { controls: Vec<usize>, target: usize },
    MultiControlledZ { controls: Vec<usize>, target: usize },

    // ── Transforms ──────────────────────────────────────────────────────
    /// `qubits[k]` carries bit k of the transform's sub-space index.
    Qft { qubits: Vec<usize>, inverse: bool },
}

impl Instruction {
    /// Kind tag used in debug output and diagnostics.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Single { .. } => "SINGLE_GATE",
            Self::Cnot { .. } => "CNOT_GATE",
            Self::Cz { .. } => "CZ_GATE",
            Self::Swap { .. } => "SWAP_GATE",
            Self::MeasureNth(_) => "MEASURE_NTH",
            Self::Toffoli { .. } => "TOFFOLI_GATE",
            Self::Fredkin { .. } => "FREDKIN_GATE",
            Self::MultiControlledX { .. } => "MULTI_CONTROLLED_X_GATE",
            Self::MultiControlledZ { .. } => "MULTI_CONTROLLED_Z_GATE",
            Self::Qft { .. } => "QFT_GATE",
        }
    }

    /// True for everything that applies a unitary (all but measurement).
    pub fn is_gate(&self) -> bool {
        !self.is_measurement()
    }

    pub fn is_measurement(&self) -> bool {
        matches!(self, Self::MeasureNth(_))
    }

    /// Qubit indices referenced by this instruction, in operand order.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Self::Single { qubit, .. } | Self::MeasureNth(qubit) => vec![*qubit],
            Self::Cnot { control, target } | Self::Cz { control, target } => vec![*control, *target],
            Self::Swap { qubit_a, qubit_b } => vec![*qubit_a, *qubit_b],
            Self::Toffoli { control1, control2, target } => vec![*control1, *control2, *target],
            Self::Fredkin { control, target1, target2 } => vec![*control, *target1, *target2],
            Self::MultiControlledX { controls, target }
            | Self::MultiControlledZ { controls, target } => {
                let mut all = controls.clone();
                all.push(*target);
                all
            }
            Self::Qft { qubits, .. } => qubits.clone(),
        }
    }

    /// Engine gate name and the smallest register it runs on, for kinds
    /// that have one.
    pub fn register_requirement(&self) -> Option<(&'static str, usize)> {
        match self {
            Self::Cnot { .. } => Some(("CNOT", 2)),
            Self::Cz { .. } => Some(("CZ", 2)),
            Self::Swap { .. } => Some(("SWAP", 2)),
            Self::Toffoli { .. } => Some(("Toffoli", 3)),
            Self::Fredkin { .. } => Some(("Fredkin", 3)),
            Self::MultiControlledX { controls, .. } => Some(("Multi-controlled X", controls.len() + 1)),
            Self::MultiControlledZ { controls, .. } => Some(("Multi-controlled Z", controls.len() + 1)),
            Self::Single { .. } | Self::MeasureNth(_) | Self::Qft { .. } => None,
        }
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices.iter().map(|q| q.to_string()).collect::<Vec<_>>().join(",")
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.mnemonic();
        match self {
            Self::Single { gate, qubit, theta } => {
                write!(f, "{tag}: [GATE: {gate}, QUBIT: {qubit}, THETA: {theta:.6}]")
            }
            Self::Cnot { control, target } | Self::Cz { control, target } => {
                write!(f, "{tag}: [CONTROL: {control}, TARGET: {target}]")
            }
            Self::Swap { qubit_a, qubit_b } => write!(f, "{tag}: [QUBIT1: {qubit_a}, QUBIT2: {qubit_b}]"),
            Self::MeasureNth(qubit) => write!(f, "{tag}: [QUBIT: {qubit}]"),
            Self::Toffoli { control1, control2, target } => {
                write!(f, "{tag}: [CTRL1: {control1}, CTRL2: {control2}, TARGET: {target}]")
            }
            Self::Fredkin { control, target1, target2 } => {
                write!(f, "{tag}: [CTRL: {control}, TARGET1: {target1}, TARGET2: {target2}]")
            }
            Self::MultiControlledX { controls, target }
            | Self::MultiControlledZ { controls, target } => {
                write!(f, "{tag}: [CONTROLS: {}, TARGET: {target}]", join_indices(controls))
            }
            Self::Qft { qubits, inverse } => {
                write!(f, "{tag}: [QUBITS: {}, INVERSE: {inverse}]", join_indices(qubits))
            }
        }
    }
}

// ── Program ───────────────────────────────────────────────────────────────

/// A validated, ready-to-execute circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Register width declared by `n:`.
    pub num_qubits: usize,
    pub instructions: Vec<Instruction>,
    /// Number of unitary operations (excludes measurements).
    pub gate_count: usize,
    pub measure_count: usize,
}

impl Program {
    pub fn new(num_qubits: usize, instructions: Vec<Instruction>) -> Self {
        let gate_count = instructions.iter().filter(|i| i.is_gate()).count();
        let measure_count = instructions.iter().filter(|i| i.is_measurement()).count();
        Self { num_qubits, instructions, gate_count, measure_count }
    }

    /// One debug line per instruction, in program order.
    pub fn debug_lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "QUBITS: {}", self.num_qubits)?;
        for line in self.debug_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
