//! End-to-end tests: engine scenarios, circuit text through the executor,
//! and Grover search through the public API.

use astragate::algorithms::{run_grover, GroverSearch};
use astragate::compiler::{self, Instruction};
use astragate::core::gates::{apply_multi_controlled_x, apply_toffoli};
use astragate::core::qft::{apply_qft_decomposed, QftMode};
use astragate::core::StateVector;
use astragate::{CircuitError, GateError, SimConfig};

// ── Engine scenarios ──────────────────────────────────────────────────────

#[test]
fn toffoli_sets_target_when_both_controls_are_one() {
    // Ket |110⟩ with q0 written first: q0 = q1 = 1, q2 = 0 → index 0b011
    let mut state = StateVector::basis(3, 0b011).unwrap();
    apply_toffoli(&mut state, 0, 1, 2).unwrap();
    assert_eq!(state.amplitudes()[0b111].re, 1.0);
    assert_eq!(state.probability(0b011), 0.0);
}

#[test]
fn toffoli_ignores_state_with_unset_control() {
    // Index 6 has q0 = 0, so the controls on q0 and q1 are not both set
    let mut state = StateVector::basis(3, 6).unwrap();
    apply_toffoli(&mut state, 0, 1, 2).unwrap();
    assert_eq!(state.max_probability_index(), 6);
}

#[test]
fn mcx_clears_target_of_all_ones_state() {
    let mut state = StateVector::basis(3, 0b111).unwrap();
    apply_multi_controlled_x(&mut state, &[0, 1], 2).unwrap();
    assert_eq!(state.amplitudes()[0b011].re, 1.0);
}

#[test]
fn toffoli_on_two_qubits_reports_requirement() {
    let mut state = StateVector::new(2).unwrap();
    let err = apply_toffoli(&mut state, 0, 1, 1).unwrap_err();
    assert_eq!(
        err,
        GateError::InsufficientQubits { gate: "Toffoli", required: 3, actual: 2 }
    );
    assert_eq!(
        err.to_string(),
        "Toffoli gate requires at least 3 qubits, but the register has 2"
    );
    // Nothing was touched
    assert_eq!(state.max_probability_index(), 0);
}

#[test]
fn decomposed_qft_on_basis_zero_spreads_evenly() {
    let mut state = StateVector::new(3).unwrap();
    apply_qft_decomposed(&mut state, &[0, 1, 2], false).unwrap();
    for p in state.probabilities() {
        assert!((p - 0.125).abs() < 1e-12);
    }
}

// ── Grover ────────────────────────────────────────────────────────────────

#[test]
fn grover_two_qubits_one_iteration_finds_target() {
    assert_eq!(run_grover(2, 3, 1).unwrap(), 3);
}

#[test]
fn grover_finds_every_target_on_four_qubits() {
    for target in 0..16 {
        let outcome = GroverSearch::new(4, target).run().unwrap();
        assert_eq!(outcome.index, target);
        assert!(outcome.probability > 0.9);
    }
}

// ── Circuit text ──────────────────────────────────────────────────────────

const PROGRAM: &str = "\
# exercise every multi-qubit record kind
n:4
@
type:single
gateType:X
qubit:0
theta:0
position:0
@
type:single
gateType:X
qubit:1
theta:0
position:1
@
type:toffoli
control1:0
control2:1
target:2
position:2
@
type:fredkin
control:2
target1:0
target2:3
position:3
@
type:mcnot
controls:1,2,3
target:0
position:4
@
type:mcz
controls:1,2
target:3
position:5
@
";

#[test]
fn parsed_program_prints_debug_lines() {
    let program = compiler::parse_source(PROGRAM).unwrap();
    assert_eq!(program.num_qubits, 4);
    assert_eq!(program.gate_count, 6);
    assert_eq!(
        program.debug_lines(),
        vec![
            "SINGLE_GATE: [GATE: X, QUBIT: 0, THETA: 0.000000]",
            "SINGLE_GATE: [GATE: X, QUBIT: 1, THETA: 0.000000]",
            "TOFFOLI_GATE: [CTRL1: 0, CTRL2: 1, TARGET: 2]",
            "FREDKIN_GATE: [CTRL: 2, TARGET1: 0, TARGET2: 3]",
            "MULTI_CONTROLLED_X_GATE: [CONTROLS: 1,2,3, TARGET: 0]",
            "MULTI_CONTROLLED_Z_GATE: [CONTROLS: 1,2, TARGET: 3]",
        ]
    );
}

#[test]
fn program_executes_to_expected_basis_state() {
    // X0 X1           → q0 q1        = 0b0011
    // Toffoli(0,1→2)  → q0 q1 q2     = 0b0111
    // Fredkin(2;0↔3)  → q1 q2 q3     = 0b1110
    // MCX(1,2,3→0)    → q0 q1 q2 q3  = 0b1111
    // MCZ(1,2,3)      → phase −1, same basis state
    let result = compiler::run(PROGRAM, &SimConfig::deterministic(1)).unwrap();
    assert_eq!(result.most_probable, 0b1111);
    assert!((result.final_probabilities[0b1111] - 1.0).abs() < 1e-12);
    assert_eq!(result.significant_states(1e-9), vec![("1111".to_string(), 1.0)]);
}

#[test]
fn qft_record_honours_configured_mode() {
    let source = "n:3\n@\ntype:single\ngateType:X\nqubit:2\n@\ntype:qft\nqubits:0,1,2\ninverse:false\n@";
    let program = compiler::parse_source(source).unwrap();
    assert_eq!(program.instructions[1], Instruction::Qft { qubits: vec![0, 1, 2], inverse: false });

    let matrix = compiler::execute(&program, &SimConfig::default()).unwrap();
    let controlled =
        compiler::execute(&program, &SimConfig::default().with_qft_mode(QftMode::Controlled)).unwrap();
    for (p, q) in matrix.final_probabilities.iter().zip(&controlled.final_probabilities) {
        assert!((p - 1.0 / 8.0).abs() < 1e-10);
        assert!((p - q).abs() < 1e-10);
    }
}

#[test]
fn measurement_snapshot_and_records() {
    let source = "n:2\n@\ntype:single\ngateType:H\nqubit:0\n@\ntype:cnot\ncontrol:0\ntarget:1\n@\n\
                  type:measurenth\nqubit:1\n@";
    let result = compiler::run(source, &SimConfig::deterministic(9)).unwrap();
    let snapshot = result.pre_measurement_probs.as_ref().unwrap();
    assert!((snapshot[0] - 0.5).abs() < 1e-10);
    assert!((snapshot[3] - 0.5).abs() < 1e-10);
    assert_eq!(result.measurements.len(), 1);
    assert_eq!(result.measurements[0].step, 2);

    // Post-collapse state agrees with the recorded outcome on both qubits
    let expected = if result.measurements[0].outcome { 3 } else { 0 };
    assert!((result.final_probabilities[expected] - 1.0).abs() < 1e-10);
}

#[test]
fn front_end_errors_are_staged() {
    assert!(matches!(
        compiler::parse_source("n:2\nnot a field"),
        Err(CircuitError::Lex { line: 2, .. })
    ));
    assert!(matches!(
        compiler::parse_source("n:2\n@\ntype:cnot\ncontrol:x\ntarget:1\n@"),
        Err(CircuitError::Parse { line: 4, .. })
    ));
    assert!(matches!(
        compiler::parse_source("n:2\n@\ntype:cnot\ncontrol:0\ntarget:5\n@"),
        Err(CircuitError::Validation { .. })
    ));
}

#[test]
fn toffoli_record_on_two_qubits_reports_requirement() {
    let source = "n:2\n@\ntype:toffoli\ncontrol1:0\ncontrol2:1\ntarget:2\n@";
    let err = compiler::run(source, &SimConfig::default()).unwrap_err();
    assert_eq!(
        err,
        CircuitError::Gate(GateError::InsufficientQubits { gate: "Toffoli", required: 3, actual: 2 })
    );
    assert_eq!(
        err.to_string(),
        "Gate error: Toffoli gate requires at least 3 qubits, but the register has 2"
    );
}

#[test]
fn config_limit_rejects_wide_program() {
    let config = SimConfig::from_json(r#"{ "max_qubits": 3 }"#).unwrap();
    let err = compiler::run("n:4", &config).unwrap_err();
    assert!(err.to_string().contains("limit is 3"));
}
