/// Error types shared by the gate engine, the circuit front-end and the runtime.
///
/// Engine failures are structural: a gate asked for more qubits than the
/// register holds, or an operand that cannot address the register. None of
/// them are transient, so nothing in the crate retries.
use thiserror::Error;

/// Failure raised by a gate kernel before it touches the state vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The register is smaller than the gate's structural minimum.
    #[error("{gate} gate requires at least {required} qubits, but the register has {actual}")]
    InsufficientQubits {
        gate: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{gate}: qubit index {qubit} is out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange {
        gate: &'static str,
        qubit: usize,
        num_qubits: usize,
    },

    /// Two operands of one gate call name the same qubit.
    #[error("{gate}: qubit {qubit} appears more than once in the operand list")]
    DuplicateQubit { gate: &'static str, qubit: usize },

    #[error("{gate}: control set must contain at least one qubit")]
    EmptyControls { gate: &'static str },

    /// Amplitude buffers must hold 2^n entries with n >= 1.
    #[error("state vector length {0} is not a power of two >= 2")]
    InvalidLength(usize),

    #[error("register of {requested} qubits exceeds the limit of {limit}")]
    TooManyQubits { requested: usize, limit: usize },

    #[error("basis state {index} is out of range for a state vector of dimension {dim}")]
    BasisStateOutOfRange { index: usize, dim: usize },
}

/// Result alias for engine operations.
pub type GateResult<T> = Result<T, GateError>;

/// Error type shared across the circuit pipeline stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    /// Malformed line in the circuit text
    #[error("Lex error   line {line}: {msg}")]
    Lex { line: usize, msg: String },

    /// Record with a missing, unknown or non-numeric field
    #[error("Parse error line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// Semantically invalid program (e.g. out-of-range qubit)
    #[error("Validation error: {msg}")]
    Validation { msg: String },

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    #[error("Config error: {0}")]
    Config(String),
}

impl CircuitError {
    pub(crate) fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse { line, msg: msg.into() }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation { msg: msg.into() }
    }
}
