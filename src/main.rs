use astragate::algorithms::{optimal_iterations, GroverSearch};
use astragate::compiler;
use astragate::config::SimConfig;
use astragate::core::{QftMode, Simulator, StateVector};
use astragate::error::GateResult;
use std::process::exit;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "astragate=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    print_banner();

    match args.get(1).map(String::as_str) {
        None | Some("demo") => run_all_demos(),
        Some("run") => cli_run(&args[2..]),
        Some("grover") => cli_grover(&args[2..]),
        Some("help") | Some("--help") => print_help(),
        Some(unknown) => {
            eprintln!("Unknown command '{unknown}'. Run 'astragate help' for usage.");
            exit(1);
        }
    }
}

// ── CLI ───────────────────────────────────────────────────────────────────

fn cli_run(args: &[String]) {
    let (path, config_path) = match args {
        [path] => (path, None),
        [path, flag, cfg] if flag == "--config" => (path, Some(cfg)),
        _ => {
            eprintln!("Usage: astragate run <circuit.txt> [--config <config.json>]");
            exit(1);
        }
    };

    let config = match config_path {
        Some(cfg) => SimConfig::from_file(cfg).unwrap_or_else(|e| fail(e)),
        None => SimConfig::default(),
    };

    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read '{path}': {e}");
        exit(1);
    });

    println!("━━━ Circuit Runner ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("File: {path}\n");

    let program = compiler::parse_source(&source).unwrap_or_else(|e| fail(e));

    println!("Program IR ({} qubit(s)):", program.num_qubits);
    for line in program.debug_lines() {
        println!("  {line}");
    }
    println!();
    println!(
        "Circuit: {} gate(s) | {} measurement(s) | QFT mode: {}\n",
        program.gate_count, program.measure_count, config.qft_mode
    );

    let result = compiler::execute(&program, &config).unwrap_or_else(|e| fail(e));

    let label = if result.pre_measurement_probs.is_some() {
        "Pre-measurement state"
    } else {
        "Final state (no measurements)"
    };
    println!("{label}:");
    for (lbl, prob) in result.significant_states(config.probability_threshold) {
        println!("  |{lbl}⟩  {prob:.6}");
    }
    println!();

    if !result.measurements.is_empty() {
        println!("Measurement results:");
        for m in &result.measurements {
            println!("  q{}  →  {}", m.qubit, m.outcome as u8);
        }
        if let Some(bs) = result.bitstring() {
            println!("  Bitstring (q0…qN): {bs}");
        }
        println!();
    }
    println!("Most probable basis state: {}", result.most_probable);
}

fn cli_grover(args: &[String]) {
    let parsed: Result<Vec<usize>, _> = args.iter().map(|a| a.parse::<usize>()).collect();
    let (num_qubits, target, iterations) = match parsed.as_deref() {
        Ok([n, t]) => (*n, *t, None),
        Ok([n, t, k]) => (*n, *t, Some(*k)),
        _ => {
            eprintln!("Usage: astragate grover <qubits> <target> [iterations]");
            exit(1);
        }
    };

    SimConfig::default().check_width(num_qubits).unwrap_or_else(|e| fail(e));

    let mut search = GroverSearch::new(num_qubits, target);
    if let Some(k) = iterations {
        search = search.iterations(k);
    }
    let outcome = search.run().unwrap_or_else(|e| fail(e));

    println!("━━━ Grover Search ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Qubits     : {num_qubits}");
    println!("Target     : {target}");
    println!(
        "Iterations : {} (optimal {})",
        outcome.iterations,
        optimal_iterations(num_qubits)
    );
    println!("Found      : {}  P = {:.6}", outcome.index, outcome.probability);
    println!("Result     : {}", if outcome.found(target) { "SUCCESS" } else { "MISSED" });
}

fn fail<T>(err: impl std::fmt::Display) -> T {
    eprintln!("{err}");
    exit(1);
}

fn print_banner() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║          astragate v0.1.0                    ║");
    println!("║  Multi-Controlled Gate & QFT Engine          ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();
}

fn print_help() {
    println!("Usage: astragate [COMMAND] [ARGS]\n");
    println!("Commands:");
    println!("  demo                                 Run built-in demonstrations");
    println!("  run <file> [--config <json>]         Parse and execute a circuit file");
    println!("  grover <qubits> <target> [iters]     Grover search for one basis state");
    println!("  help                                 Show this message\n");
    println!("Circuit format (one 'key:value' per line, '@' ends a record):");
    println!("  n:<qubits>                           Register width (first field)");
    println!("  type:single     gateType qubit theta");
    println!("  type:cnot|cz    control target");
    println!("  type:swap       qubit1 qubit2");
    println!("  type:measurenth qubit");
    println!("  type:toffoli    control1 control2 target");
    println!("  type:fredkin    control target1 target2");
    println!("  type:mcnot|mcz  controls:<i,j,...> target");
    println!("  type:qft        qubits:<i,j,...> inverse:true|false\n");
    println!("Example:");
    for line in FORMAT_EXAMPLE.lines() {
        println!("  {line}");
    }
    println!();
    println!("Angles: radians, or PI, TAU, PI_2, PI_4, PI_8 (optionally negated)");
    println!("Comments: #   Logging: RUST_LOG=astragate=debug");
}

const FORMAT_EXAMPLE: &str = "\
n:3
@
type:mcnot
controls:0,1
target:2
@
type:qft
qubits:0,1,2
inverse:true
@";

// ── Demos ─────────────────────────────────────────────────────────────────

fn run_all_demos() {
    let demos: [(&str, fn() -> GateResult<()>); 4] = [
        ("Toffoli & Fredkin", demo_reversible_gates),
        ("Multi-Controlled Gates", demo_multi_controlled),
        ("Quantum Fourier Transform", demo_qft),
        ("Grover Search", demo_grover),
    ];
    for (i, (name, demo)) in demos.iter().enumerate() {
        println!("━━━ Demo {}: {name} ━━━━━━━━━━━━━━━━━━━━━━━━━━", i + 1);
        if let Err(e) = demo() {
            eprintln!("Error: {e}");
        }
        println!();
    }
    demo_circuit_pipeline();
}

fn demo_reversible_gates() -> GateResult<()> {
    let mut sim = Simulator::new(3)?;
    sim.x(0)?.x(1)?;
    println!("Prepared q0=q1=1:");
    print!("{}", sim.state());
    sim.toffoli(0, 1, 2)?;
    println!("After Toffoli(0, 1 → 2):");
    print!("{}", sim.state());
    sim.fredkin(0, 1, 2)?;
    println!("After Fredkin(0; 1 ↔ 2), q1 and q2 exchange nothing (both 1):");
    print!("{}", sim.state());
    Ok(())
}

fn demo_multi_controlled() -> GateResult<()> {
    let mut sim = Simulator::new(4)?;
    for q in 0..3 {
        sim.h(q)?;
    }
    sim.mcx(&[0, 1, 2], 3)?;
    println!("H on q0..q2 then MCX({{0,1,2}} → 3): q3 is set only for |0111⟩");
    print!("{}", sim.state());

    let mut sim = Simulator::new(3)?;
    for q in 0..3 {
        sim.h(q)?;
    }
    sim.mcz(&[0, 1], 2)?;
    println!("MCZ({{0,1}}, 2) on the uniform state negates |111⟩ only:");
    print!("{}", sim.state());
    Ok(())
}

fn demo_qft() -> GateResult<()> {
    let mut sim = Simulator::new(3)?;
    sim.x(0)?.qft(&[0, 1, 2], false)?;
    println!("QFT |001⟩ (uniform magnitudes, linear phase):");
    print!("{}", sim.state());

    let mut exact = StateVector::basis(3, 1)?;
    astragate::core::qft::apply_qft_with(&mut exact, &[0, 1, 2], false, QftMode::Controlled)?;
    let max_diff = exact
        .amplitudes()
        .iter()
        .zip(sim.state().amplitudes())
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    println!("Controlled-phase circuit vs direct matrix: max |Δ| = {max_diff:.2e}");

    sim.qft(&[0, 1, 2], true)?;
    println!("After inverse QFT, back to |{}⟩", sim.state().basis_label(sim.most_probable()));
    Ok(())
}

fn demo_grover() -> GateResult<()> {
    for (n, target) in [(2, 3), (3, 5), (5, 19)] {
        let outcome = GroverSearch::new(n, target).run()?;
        println!(
            "  n={n} target={target:>2}  →  found {:>2} after {} iteration(s), P = {:.4}",
            outcome.index, outcome.iterations, outcome.probability
        );
    }
    Ok(())
}

fn demo_circuit_pipeline() {
    println!("━━━ Demo 5: Circuit Text Pipeline ━━━━━━━━━━━━━━━━");

    let source = "\
# GHZ preparation followed by a Toffoli check
n:3
@
type:single
gateType:H
qubit:0
theta:0
position:0
@
type:cnot
control:0
target:1
position:1
@
type:mcnot
controls:0,1
target:2
position:2
@
type:measurenth
qubit:2
position:3
@
";

    let config = SimConfig::deterministic(7);
    match compiler::run(source, &config) {
        Ok(result) => {
            println!("Pre-measurement state:");
            for (label, prob) in result.significant_states(1e-6) {
                println!("  |{label}⟩  {prob:.4}");
            }
            for m in &result.measurements {
                println!("  q{}  →  {}", m.qubit, m.outcome as u8);
            }
        }
        Err(e) => eprintln!("Circuit error: {e}"),
    }
    println!();
}
