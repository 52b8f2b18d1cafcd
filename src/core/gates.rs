/// Gate matrices and the gate-application kernels.
///
/// Single-qubit gates are 2×2 complex matrices applied to every amplitude
/// pair that differs only in the target bit. Controlled gates are index
/// permutations (swaps) or diagonal phase flips gated by
/// [`controls_satisfied`].
///
/// Every kernel checks the register-size precondition first, then operand
/// range and distinctness, and only then mutates the state. A failed check
/// leaves the state untouched.
///
/// Swap-based kernels act on each unordered pair `(i, paired)` exactly once
/// by letting the lower index drive the swap.
use super::bits::controls_satisfied;
use super::state::StateVector;
use crate::error::{GateError, GateResult};
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

/// A 2×2 complex unitary matrix representing a single-qubit gate.
/// Row-major: matrix[row][col]
pub type Matrix2x2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

// ── Standard Gate Matrices ─────────────────────────────────────────────────

pub fn identity() -> Matrix2x2 {
    [[ONE, ZERO], [ZERO, ONE]]
}

/// H = (1/√2) · [[1, 1], [1, -1]]
pub fn hadamard() -> Matrix2x2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// Quantum NOT.
pub fn pauli_x() -> Matrix2x2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

pub fn pauli_y() -> Matrix2x2 {
    [[ZERO, -I], [I, ZERO]]
}

pub fn pauli_z() -> Matrix2x2 {
    [[ONE, ZERO], [ZERO, -ONE]]
}

pub fn s_gate() -> Matrix2x2 {
    phase_gate(FRAC_PI_2)
}

pub fn s_dagger() -> Matrix2x2 {
    phase_gate(-FRAC_PI_2)
}

pub fn t_gate() -> Matrix2x2 {
    phase_gate(FRAC_PI_4)
}

pub fn t_dagger() -> Matrix2x2 {
    phase_gate(-FRAC_PI_4)
}

/// √X: V = ½ · [[1+i, 1-i], [1-i, 1+i]]
pub fn sqrt_x() -> Matrix2x2 {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    [[p, m], [m, p]]
}

/// V† = ½ · [[1-i, 1+i], [1+i, 1-i]]
pub fn sqrt_x_dagger() -> Matrix2x2 {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    [[m, p], [p, m]]
}

/// Rx(θ) = [[cos(θ/2), -i·sin(θ/2)], [-i·sin(θ/2), cos(θ/2)]]
pub fn rx(theta: f64) -> Matrix2x2 {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let i_sin = Complex64::new(0.0, -(theta / 2.0).sin());
    [[cos, i_sin], [i_sin, cos]]
}

/// Ry(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]
pub fn ry(theta: f64) -> Matrix2x2 {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let sin = Complex64::new((theta / 2.0).sin(), 0.0);
    [[cos, -sin], [sin, cos]]
}

/// Rz(θ) = diag(e^(-iθ/2), e^(iθ/2))
pub fn rz(theta: f64) -> Matrix2x2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// P(θ) = diag(1, e^(iθ))
pub fn phase_gate(theta: f64) -> Matrix2x2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

// ── Operand checks ─────────────────────────────────────────────────────────

fn require_qubits(state: &StateVector, gate: &'static str, required: usize) -> GateResult<()> {
    let actual = state.num_qubits();
    if actual < required {
        return Err(GateError::InsufficientQubits { gate, required, actual });
    }
    Ok(())
}

/// Every operand must address the register and no qubit may repeat.
pub(crate) fn check_operands(
    state: &StateVector,
    gate: &'static str,
    qubits: &[usize],
) -> GateResult<()> {
    let num_qubits = state.num_qubits();
    let mut seen = 0usize;
    for &qubit in qubits {
        if qubit >= num_qubits {
            return Err(GateError::QubitOutOfRange { gate, qubit, num_qubits });
        }
        if seen & (1 << qubit) != 0 {
            return Err(GateError::DuplicateQubit { gate, qubit });
        }
        seen |= 1 << qubit;
    }
    Ok(())
}

/// Controls then target, as one operand list.
fn control_operands(controls: &[usize], target: usize) -> Vec<usize> {
    let mut all = Vec::with_capacity(controls.len() + 1);
    all.extend_from_slice(controls);
    all.push(target);
    all
}

// ── Single- and two-qubit primitives ───────────────────────────────────────

/// Apply a 2×2 gate to `target`: O(2^n).
pub fn apply_single_qubit_gate(
    state: &mut StateVector,
    gate: &Matrix2x2,
    target: usize,
) -> GateResult<()> {
    check_operands(state, "Single-qubit", &[target])?;

    let dim = state.dim();
    let target_mask = 1 << target;
    let amps = state.amplitudes_mut();
    for i0 in (0..dim).filter(|i| i & target_mask == 0) {
        let i1 = i0 | target_mask;
        let a0 = amps[i0];
        let a1 = amps[i1];
        amps[i0] = gate[0][0] * a0 + gate[0][1] * a1;
        amps[i1] = gate[1][0] * a0 + gate[1][1] * a1;
    }
    Ok(())
}

/// Flip `target` when `control` is |1⟩.
pub fn apply_cnot(state: &mut StateVector, control: usize, target: usize) -> GateResult<()> {
    require_qubits(state, "CNOT", 2)?;
    check_operands(state, "CNOT", &[control, target])?;

    let control_mask = 1 << control;
    let target_mask = 1 << target;
    let dim = state.dim();
    let amps = state.amplitudes_mut();
    for i in 0..dim {
        // Only act on basis states where control = 1 and target = 0
        if (i & control_mask != 0) && (i & target_mask == 0) {
            amps.swap(i, i | target_mask);
        }
    }
    Ok(())
}

/// Phase flip on |11⟩ of (control, target).
pub fn apply_cz(state: &mut StateVector, control: usize, target: usize) -> GateResult<()> {
    require_qubits(state, "CZ", 2)?;
    check_operands(state, "CZ", &[control, target])?;

    let mask = (1 << control) | (1 << target);
    for (i, amp) in state.amplitudes_mut().iter_mut().enumerate() {
        if i & mask == mask {
            *amp = -*amp;
        }
    }
    Ok(())
}

/// Exchange the states of two qubits.
pub fn apply_swap(state: &mut StateVector, qubit_a: usize, qubit_b: usize) -> GateResult<()> {
    require_qubits(state, "SWAP", 2)?;
    check_operands(state, "SWAP", &[qubit_a, qubit_b])?;

    let mask_a = 1 << qubit_a;
    let mask_b = 1 << qubit_b;
    let dim = state.dim();
    let amps = state.amplitudes_mut();
    for i in 0..dim {
        // Bits differ with a = 1, b = 0: the partner has a = 0, b = 1
        if (i & mask_a != 0) && (i & mask_b == 0) {
            amps.swap(i, i ^ mask_a ^ mask_b);
        }
    }
    Ok(())
}

/// Multiply by e^(iθ) every amplitude where both `control` and `target` are |1⟩.
pub fn apply_controlled_phase(
    state: &mut StateVector,
    control: usize,
    target: usize,
    theta: f64,
) -> GateResult<()> {
    require_qubits(state, "Controlled-phase", 2)?;
    check_operands(state, "Controlled-phase", &[control, target])?;

    let phase = Complex64::from_polar(1.0, theta);
    let mask = (1 << control) | (1 << target);
    for (i, amp) in state.amplitudes_mut().iter_mut().enumerate() {
        if i & mask == mask {
            *amp *= phase;
        }
    }
    Ok(())
}

// ── Multi-qubit controlled gates ───────────────────────────────────────────

/// Toffoli (CCNOT): flip `target` when both controls are |1⟩.
///
/// Needs a register of at least 3 qubits.
pub fn apply_toffoli(
    state: &mut StateVector,
    ctrl1: usize,
    ctrl2: usize,
    target: usize,
) -> GateResult<()> {
    require_qubits(state, "Toffoli", 3)?;
    check_operands(state, "Toffoli", &[ctrl1, ctrl2, target])?;
    swap_controlled_pairs(state, &[ctrl1, ctrl2], 1 << target);
    Ok(())
}

/// Fredkin (CSWAP): exchange `target1` and `target2` when `ctrl` is |1⟩.
///
/// Needs a register of at least 3 qubits.
pub fn apply_fredkin(
    state: &mut StateVector,
    ctrl: usize,
    target1: usize,
    target2: usize,
) -> GateResult<()> {
    require_qubits(state, "Fredkin", 3)?;
    check_operands(state, "Fredkin", &[ctrl, target1, target2])?;
    swap_controlled_pairs(state, &[ctrl], (1 << target1) | (1 << target2));
    Ok(())
}

/// Flip `target` when every qubit in `controls` is |1⟩.
///
/// Needs `controls.len() + 1` qubits. The control set must be non-empty.
pub fn apply_multi_controlled_x(
    state: &mut StateVector,
    controls: &[usize],
    target: usize,
) -> GateResult<()> {
    const GATE: &str = "Multi-controlled X";
    require_qubits(state, GATE, controls.len() + 1)?;
    if controls.is_empty() {
        return Err(GateError::EmptyControls { gate: GATE });
    }
    check_operands(state, GATE, &control_operands(controls, target))?;
    swap_controlled_pairs(state, controls, 1 << target);
    Ok(())
}

/// Negate every amplitude whose controls and target are all |1⟩.
///
/// Diagonal: no index movement, so no pairing is needed.
pub fn apply_multi_controlled_z(
    state: &mut StateVector,
    controls: &[usize],
    target: usize,
) -> GateResult<()> {
    const GATE: &str = "Multi-controlled Z";
    require_qubits(state, GATE, controls.len() + 1)?;
    if controls.is_empty() {
        return Err(GateError::EmptyControls { gate: GATE });
    }
    check_operands(state, GATE, &control_operands(controls, target))?;

    let target_mask = 1 << target;
    for (i, amp) in state.amplitudes_mut().iter_mut().enumerate() {
        if i & target_mask != 0 && controls_satisfied(i, controls) {
            *amp = -*amp;
        }
    }
    Ok(())
}

/// Swap amplitude `i` with `i ^ flip_mask` for every `i` satisfying `controls`.
///
/// `flip_mask` must not touch a control bit, so `i` and its partner satisfy
/// the same controls; `i < paired` then visits each pair once.
fn swap_controlled_pairs(state: &mut StateVector, controls: &[usize], flip_mask: usize) {
    let dim = state.dim();
    let amps = state.amplitudes_mut();
    for i in 0..dim {
        if !controls_satisfied(i, controls) {
            continue;
        }
        let paired = i ^ flip_mask;
        if i < paired {
            amps.swap(i, paired);
        }
    }
}
