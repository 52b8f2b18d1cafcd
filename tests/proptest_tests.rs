//! Property-based tests for the gate engine using proptest
//!
//! Algebraic laws that must hold for arbitrary states and operand choices.

use astragate::compiler::parse_index_list;
use astragate::core::gates::{
    apply_fredkin, apply_multi_controlled_x, apply_multi_controlled_z, apply_toffoli,
};
use astragate::core::qft::{apply_qft, apply_qft_controlled};
use astragate::core::StateVector;
use num_complex::Complex64;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A random normalised register of 3–5 qubits plus a random ordering of its
/// qubit indices, so any prefix is a list of distinct operands.
fn state_and_qubits() -> impl Strategy<Value = (StateVector, Vec<usize>)> {
    (3usize..=5).prop_flat_map(|n| {
        let amps = prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1 << n);
        let order = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
        (amps, order).prop_map(|(raw, order)| {
            let mut amplitudes: Vec<Complex64> =
                raw.into_iter().map(|(re, im)| Complex64::new(re, im)).collect();
            // Keep the vector away from zero so normalisation is meaningful
            amplitudes[0] += Complex64::new(0.5, 0.0);
            let mut state = StateVector::from_amplitudes(amplitudes).unwrap();
            state.normalize();
            (state, order)
        })
    })
}

fn max_diff(a: &StateVector, b: &StateVector) -> f64 {
    a.amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

// ============================================================================
// Controlled gates
// ============================================================================

proptest! {
    /// Property: Toffoli applied twice is the identity
    #[test]
    fn toffoli_self_inverse((state, q) in state_and_qubits()) {
        let mut s = state.clone();
        apply_toffoli(&mut s, q[0], q[1], q[2]).unwrap();
        apply_toffoli(&mut s, q[0], q[1], q[2]).unwrap();
        prop_assert!(max_diff(&s, &state) < 1e-12);
    }

    /// Property: Fredkin applied twice is the identity
    #[test]
    fn fredkin_self_inverse((state, q) in state_and_qubits()) {
        let mut s = state.clone();
        apply_fredkin(&mut s, q[0], q[1], q[2]).unwrap();
        apply_fredkin(&mut s, q[0], q[1], q[2]).unwrap();
        prop_assert!(max_diff(&s, &state) < 1e-12);
    }

    /// Property: MCX and MCZ are self-inverse for any control count
    #[test]
    fn multi_controlled_self_inverse(
        (state, q) in state_and_qubits(),
        k in 1usize..4,
    ) {
        let k = k.min(q.len() - 1);
        let (controls, target) = (&q[..k], q[k]);

        let mut s = state.clone();
        apply_multi_controlled_x(&mut s, controls, target).unwrap();
        apply_multi_controlled_x(&mut s, controls, target).unwrap();
        prop_assert!(max_diff(&s, &state) < 1e-12);

        apply_multi_controlled_z(&mut s, controls, target).unwrap();
        apply_multi_controlled_z(&mut s, controls, target).unwrap();
        prop_assert!(max_diff(&s, &state) < 1e-12);
    }

    /// Property: Toffoli(c1, c2, t) == MCX({c1, c2}, t)
    #[test]
    fn toffoli_equals_two_control_mcx((state, q) in state_and_qubits()) {
        let mut a = state.clone();
        let mut b = state;
        apply_toffoli(&mut a, q[0], q[1], q[2]).unwrap();
        apply_multi_controlled_x(&mut b, &[q[0], q[1]], q[2]).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: unitary gates preserve the norm
    #[test]
    fn gates_preserve_norm((state, q) in state_and_qubits()) {
        let mut s = state;
        apply_toffoli(&mut s, q[0], q[1], q[2]).unwrap();
        apply_fredkin(&mut s, q[2], q[0], q[1]).unwrap();
        apply_multi_controlled_z(&mut s, &q[1..], q[0]).unwrap();
        apply_qft(&mut s, &q[..2], false).unwrap();
        prop_assert!((s.total_probability() - 1.0).abs() < 1e-10);
    }
}

// ============================================================================
// Quantum Fourier Transform
// ============================================================================

proptest! {
    /// Property: inverse QFT undoes QFT on any ordered subset
    #[test]
    fn qft_round_trip(
        (state, q) in state_and_qubits(),
        m in 1usize..=5,
    ) {
        let qubits = &q[..m.min(q.len())];
        let mut s = state.clone();
        apply_qft(&mut s, qubits, false).unwrap();
        apply_qft(&mut s, qubits, true).unwrap();
        prop_assert!(max_diff(&s, &state) < 1e-9);
    }

    /// Property: the controlled-phase circuit equals the direct matrix
    #[test]
    fn controlled_qft_matches_matrix(
        (state, q) in state_and_qubits(),
        m in 1usize..=5,
        inverse in any::<bool>(),
    ) {
        let qubits = &q[..m.min(q.len())];
        let mut a = state.clone();
        let mut b = state;
        apply_qft(&mut a, qubits, inverse).unwrap();
        apply_qft_controlled(&mut b, qubits, inverse).unwrap();
        prop_assert!(max_diff(&a, &b) < 1e-9, "diff {}", max_diff(&a, &b));
    }
}

// ============================================================================
// Index lists
// ============================================================================

proptest! {
    /// Property: a formatted list parses back to the same indices
    #[test]
    fn index_list_parses_formatted(indices in prop::collection::vec(0usize..64, 1..10)) {
        let text = indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
        prop_assert_eq!(parse_index_list(&text).unwrap(), indices);
    }
}
