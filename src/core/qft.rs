/// Quantum Fourier Transform over an arbitrary subset of register qubits.
///
/// `qubits[k]` carries bit `k` of the transform's sub-space index, so the
/// list order (not register order) defines the transform's bit order.
///
/// Three constructions are provided:
///
/// - [`apply_qft`]: one dense pass of the 2^m × 2^m DFT matrix (m = |qubits|)
///   into a scratch buffer. O(2^(n-m) · 4^m) work, O(2^n) extra memory.
///   This is the semantic reference.
/// - [`apply_qft_controlled`]: Hadamard and controlled-phase layers followed
///   by a bit reversal. Equal to [`apply_qft`] within floating-point tolerance.
/// - [`apply_qft_decomposed`]: the same skeleton with *uncontrolled* phase
///   shifts. Not the Fourier transform.
use super::bits::{qubit_mask, scatter_bits, transform_phase_factor};
use super::gates::{
    apply_controlled_phase, apply_single_qubit_gate, apply_swap, check_operands, hadamard,
    phase_gate,
};
use super::state::StateVector;
use crate::error::GateResult;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Which construction `QFT` instructions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QftMode {
    /// Dense DFT matrix pass.
    #[default]
    Matrix,
    /// Hadamard + uncontrolled phase shifts (approximation).
    Decomposed,
    /// Hadamard + controlled-phase rotations (exact).
    Controlled,
}

impl fmt::Display for QftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matrix => write!(f, "matrix"),
            Self::Decomposed => write!(f, "decomposed"),
            Self::Controlled => write!(f, "controlled"),
        }
    }
}

/// Dispatch a (possibly inverse) QFT to the construction selected by `mode`.
pub fn apply_qft_with(
    state: &mut StateVector,
    qubits: &[usize],
    inverse: bool,
    mode: QftMode,
) -> GateResult<()> {
    match mode {
        QftMode::Matrix => apply_qft(state, qubits, inverse),
        QftMode::Decomposed => apply_qft_decomposed(state, qubits, inverse),
        QftMode::Controlled => apply_qft_controlled(state, qubits, inverse),
    }
}

/// Direct-matrix QFT on `qubits`; conjugated phases when `inverse`.
///
/// For every pattern of the spectator (non-participating) bits, each output
/// amplitude accumulates `state[in] · ω^(out·in) / √2^m` from every input of
/// the same spectator pattern. Reads come from the current amplitudes, writes
/// go to a separate scratch buffer that replaces them at the end.
/// An empty `qubits` list is a no-op.
pub fn apply_qft(state: &mut StateVector, qubits: &[usize], inverse: bool) -> GateResult<()> {
    if qubits.is_empty() {
        return Ok(());
    }
    check_operands(state, "QFT", qubits)?;

    let width = qubits.len();
    let sub_dim = 1usize << width;
    let norm = 1.0 / (sub_dim as f64).sqrt();
    let spectator_mask = !qubit_mask(qubits) & (state.dim() - 1);

    // Sub-space index → full register offset, computed once.
    let offsets: Vec<usize> = (0..sub_dim).map(|k| scatter_bits(k, qubits)).collect();

    let source = state.amplitudes();
    let mut scratch = vec![Complex64::new(0.0, 0.0); state.dim()];

    // Enumerate spectator patterns as the submasks of `spectator_mask`.
    let mut spectators = 0usize;
    loop {
        for (output, &out_offset) in offsets.iter().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (input, &in_offset) in offsets.iter().enumerate() {
                let amp = source[spectators | in_offset];
                if amp.re == 0.0 && amp.im == 0.0 {
                    continue;
                }
                let mut phase = transform_phase_factor(output, input, width);
                if inverse {
                    phase = phase.conj();
                }
                acc += amp * phase;
            }
            scratch[spectators | out_offset] = acc * norm;
        }

        if spectators == spectator_mask {
            break;
        }
        spectators = (spectators.wrapping_sub(spectator_mask)) & spectator_mask;
    }

    state.replace_amplitudes(scratch);
    Ok(())
}

/// Hadamard + uncontrolled phase-shift decomposition.
///
/// For position i: H on `qubits[i]`, then for every later j a phase shift of
/// ±π/2^(j−i) on `qubits[i]` itself. The forward transform ends with
/// pairwise SWAPs reversing `qubits`; the inverse skips them.
///
/// The phase shifts are not conditioned on `qubits[j]`, so this is not the
/// Fourier transform (nor, in general, the inverse of its own inverse mode).
/// Use [`apply_qft_controlled`] or [`apply_qft`] for the exact unitary.
pub fn apply_qft_decomposed(
    state: &mut StateVector,
    qubits: &[usize],
    inverse: bool,
) -> GateResult<()> {
    let n = qubits.len();
    if n == 0 {
        return Ok(());
    }
    check_operands(state, "QFT", qubits)?;
    debug!(?qubits, inverse, "decomposed QFT uses uncontrolled phase shifts");

    let sign = if inverse { -1.0 } else { 1.0 };
    let h = hadamard();
    for i in 0..n {
        apply_single_qubit_gate(state, &h, qubits[i])?;
        for j in (i + 1)..n {
            let angle = sign * PI / (1u64 << (j - i)) as f64;
            apply_single_qubit_gate(state, &phase_gate(angle), qubits[i])?;
        }
    }

    if !inverse {
        reverse_qubits(state, qubits)?;
    }
    Ok(())
}

/// Exact QFT circuit over `qubits` using controlled-phase rotations.
///
/// `qubits[n-1]` is the most significant sub-space bit, matching
/// [`apply_qft`]: process it first with H, then rotate it by π/2^(i−j)
/// conditioned on every less significant `qubits[j]`, and finally reverse
/// the order. The inverse runs the same circuit backwards with negated
/// angles.
pub fn apply_qft_controlled(
    state: &mut StateVector,
    qubits: &[usize],
    inverse: bool,
) -> GateResult<()> {
    let n = qubits.len();
    if n == 0 {
        return Ok(());
    }
    check_operands(state, "QFT", qubits)?;

    let h = hadamard();
    if inverse {
        reverse_qubits(state, qubits)?;
        for i in 0..n {
            for j in 0..i {
                let angle = -PI / (1u64 << (i - j)) as f64;
                apply_controlled_phase(state, qubits[j], qubits[i], angle)?;
            }
            apply_single_qubit_gate(state, &h, qubits[i])?;
        }
    } else {
        for i in (0..n).rev() {
            apply_single_qubit_gate(state, &h, qubits[i])?;
            for j in (0..i).rev() {
                let angle = PI / (1u64 << (i - j)) as f64;
                apply_controlled_phase(state, qubits[j], qubits[i], angle)?;
            }
        }
        reverse_qubits(state, qubits)?;
    }
    Ok(())
}

/// SWAP qubits[i] with qubits[n-1-i] for the first half of the list.
fn reverse_qubits(state: &mut StateVector, qubits: &[usize]) -> GateResult<()> {
    let n = qubits.len();
    for i in 0..n / 2 {
        apply_swap(state, qubits[i], qubits[n - 1 - i])?;
    }
    Ok(())
}
