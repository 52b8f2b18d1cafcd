/// Circuit parser: converts the lexer's field stream into a validated Program.
///
/// Grammar:
///   circuit  := 'n' ':' INT '@'? record*
///   record   := field+ '@'?
///   field    := KEY ':' VALUE
///
/// Every record carries `type:` plus the operands of its kind:
///
/// | type         | fields                                   |
/// |--------------|------------------------------------------|
/// | `single`     | gateType, qubit, theta?, phi?, lambda?   |
/// | `cnot`, `cz` | control, target                          |
/// | `swap`       | qubit1/qubitA, qubit2/qubitB             |
/// | `measurenth` | qubit                                    |
/// | `toffoli`    | control1, control2, target               |
/// | `fredkin`    | control, target1, target2                |
/// | `mcnot`,`mcz`| controls (comma list), target            |
/// | `qft`        | qubits (comma list), inverse?            |
///
/// `position` is accepted on every record and ignored; `phi` and `lambda`
/// are accepted on `single` records and ignored. Any other field is an
/// error, as is a repeated field.
///
/// Validation:
///   - `n` declares 1–30 qubits
///   - Multi-qubit kinds fit the register (`InsufficientQubits` otherwise)
///   - All qubit indices in [0, n)
///   - No qubit appears twice in one instruction
use super::{
    ir::{Instruction, Program, SingleGate},
    lexer::{Spanned, Token},
    list::parse_index_list,
};
use crate::core::MAX_QUBITS;
use crate::error::{CircuitError, GateError};
use std::f64::consts;

// ── Public API ────────────────────────────────────────────────────────────

/// Parse a token stream (output of the lexer) into a validated Program.
pub fn parse(tokens: Vec<Spanned>) -> Result<Program, CircuitError> {
    let mut tokens = tokens.into_iter().peekable();

    // ── Header ────────────────────────────────────────────────────────────
    let num_qubits = match tokens.next() {
        Some(Spanned { token: Token::Field { key, value }, line }) if key == "n" => {
            parse_register_width(&value, line)?
        }
        Some(other) => {
            return Err(CircuitError::validation(format!(
                "line {}: expected 'n:<qubits>' as the first field, found '{}'",
                other.line,
                other.token.display()
            )))
        }
        None => return Err(CircuitError::validation("empty circuit: expected 'n:<qubits>'")),
    };
    if matches!(tokens.peek(), Some(Spanned { token: Token::Separator, .. })) {
        tokens.next();
    }

    // ── Records ───────────────────────────────────────────────────────────
    let mut instructions = Vec::new();
    for record in group_records(tokens)? {
        let line = record.line;
        let instr = parse_record(record)?;
        validate_operands(&instr, num_qubits, line)?;
        instructions.push(instr);
    }

    Ok(Program::new(num_qubits, instructions))
}

fn parse_register_width(value: &str, line: usize) -> Result<usize, CircuitError> {
    let n: usize = value
        .parse()
        .map_err(|_| CircuitError::parse(line, format!("'n' expects a qubit count, found '{value}'")))?;
    if n == 0 {
        return Err(CircuitError::validation("circuit must declare at least 1 qubit"));
    }
    if n > MAX_QUBITS {
        return Err(CircuitError::validation(format!(
            "n:{n} exceeds the maximum of {MAX_QUBITS} qubits"
        )));
    }
    Ok(n)
}

// ── Records ───────────────────────────────────────────────────────────────

/// The fields of one `@`-terminated block, in source order.
struct Record {
    /// Line of the first field
    line: usize,
    fields: Vec<(String, String, usize)>,
}

fn group_records(tokens: impl Iterator<Item = Spanned>) -> Result<Vec<Record>, CircuitError> {
    let mut records = Vec::new();
    let mut current: Option<Record> = None;

    for Spanned { token, line } in tokens {
        match token {
            Token::Separator => {
                // Consecutive separators are harmless
                if let Some(record) = current.take() {
                    records.push(record);
                }
            }
            Token::Field { key, value } => {
                let record = current.get_or_insert_with(|| Record { line, fields: Vec::new() });
                if record.fields.iter().any(|(k, _, _)| *k == key) {
                    return Err(CircuitError::parse(line, format!("duplicate field '{key}'")));
                }
                record.fields.push((key, value, line));
            }
        }
    }
    // A final record may omit its trailing '@'
    if let Some(record) = current {
        records.push(record);
    }
    Ok(records)
}

impl Record {
    /// Remove and return the first field named by any of `names`.
    fn take(&mut self, names: &[&str]) -> Option<(String, usize)> {
        let pos = self.fields.iter().position(|(k, _, _)| names.contains(&k.as_str()))?;
        let (_, value, line) = self.fields.remove(pos);
        Some((value, line))
    }

    fn required(&mut self, kind: &str, names: &[&str]) -> Result<(String, usize), CircuitError> {
        let line = self.line;
        self.take(names).ok_or_else(|| {
            CircuitError::parse(line, format!("'{kind}' record is missing field '{}'", names[0]))
        })
    }

    fn index(&mut self, kind: &str, names: &[&str]) -> Result<usize, CircuitError> {
        let (value, line) = self.required(kind, names)?;
        value.parse().map_err(|_| {
            CircuitError::parse(line, format!("'{}' expects a qubit index, found '{value}'", names[0]))
        })
    }

    fn index_list(&mut self, kind: &str, name: &str) -> Result<Vec<usize>, CircuitError> {
        let (value, line) = self.required(kind, &[name])?;
        parse_index_list(&value).map_err(|e| CircuitError::parse(line, format!("'{name}': {e}")))
    }

    fn angle(&mut self, name: &str) -> Result<Option<f64>, CircuitError> {
        match self.take(&[name]) {
            None => Ok(None),
            Some((value, line)) => parse_angle(&value).map(Some).ok_or_else(|| {
                CircuitError::parse(line, format!("'{name}' expects an angle, found '{value}'"))
            }),
        }
    }

    fn flag(&mut self, name: &str) -> Result<Option<bool>, CircuitError> {
        match self.take(&[name]) {
            None => Ok(None),
            Some((value, line)) => match value.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(CircuitError::parse(
                    line,
                    format!("'{name}' expects true or false, found '{value}'"),
                )),
            },
        }
    }

    /// Drop ignored fields and reject anything left over.
    fn finish(mut self, ignored: &[&str]) -> Result<(), CircuitError> {
        while self.take(ignored).is_some() {}
        match self.fields.first() {
            None => Ok(()),
            Some((key, _, line)) => Err(CircuitError::parse(*line, format!("unknown field '{key}'"))),
        }
    }
}

/// Float literal or a named constant: PI, TAU, PI_2, PI_4, PI_8, optionally negated.
fn parse_angle(text: &str) -> Option<f64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let named = match body.to_ascii_uppercase().as_str() {
        "PI" => Some(consts::PI),
        "TAU" => Some(consts::TAU),
        "PI_2" => Some(consts::FRAC_PI_2),
        "PI_4" => Some(consts::FRAC_PI_4),
        "PI_8" => Some(consts::FRAC_PI_8),
        _ => None,
    };
    match named {
        Some(v) if negative => Some(-v),
        Some(v) => Some(v),
        None => text.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

fn parse_record(mut record: Record) -> Result<Instruction, CircuitError> {
    let (kind, _) = record.required("gate", &["type"])?;
    let kind = kind.to_ascii_lowercase();
    let k = kind.as_str();

    let instr = match k {
        "single" => {
            let (name, name_line) = record.required(k, &["gateType"])?;
            let gate = SingleGate::from_name(&name).ok_or_else(|| {
                CircuitError::parse(name_line, format!("unknown gateType '{name}'"))
            })?;
            let qubit = record.index(k, &["qubit"])?;
            let theta = match record.angle("theta")? {
                Some(theta) => theta,
                None if gate.is_parametric() => {
                    return Err(CircuitError::parse(
                        record.line,
                        format!("gate '{gate}' requires field 'theta'"),
                    ))
                }
                None => 0.0,
            };
            record.angle("phi")?;
            record.angle("lambda")?;
            Instruction::Single { gate, qubit, theta }
        }
        "cnot" => Instruction::Cnot {
            control: record.index(k, &["control"])?,
            target: record.index(k, &["target"])?,
        },
        "cz" => Instruction::Cz {
            control: record.index(k, &["control"])?,
            target: record.index(k, &["target"])?,
        },
        "swap" => Instruction::Swap {
            qubit_a: record.index(k, &["qubit1", "qubitA"])?,
            qubit_b: record.index(k, &["qubit2", "qubitB"])?,
        },
        "measurenth" => Instruction::MeasureNth(record.index(k, &["qubit"])?),
        "toffoli" => Instruction::Toffoli {
            control1: record.index(k, &["control1"])?,
            control2: record.index(k, &["control2"])?,
            target: record.index(k, &["target"])?,
        },
        "fredkin" => Instruction::Fredkin {
            control: record.index(k, &["control"])?,
            target1: record.index(k, &["target1"])?,
            target2: record.index(k, &["target2"])?,
        },
        "mcnot" => Instruction::MultiControlledX {
            controls: record.index_list(k, "controls")?,
            target: record.index(k, &["target"])?,
        },
        "mcz" => Instruction::MultiControlledZ {
            controls: record.index_list(k, "controls")?,
            target: record.index(k, &["target"])?,
        },
        "qft" => Instruction::Qft {
            qubits: record.index_list(k, "qubits")?,
            inverse: record.flag("inverse")?.unwrap_or(false),
        },
        _ => return Err(CircuitError::parse(record.line, format!("unknown gate type '{kind}'"))),
    };

    record.finish(&["position"])?;
    Ok(instr)
}

// ── Validation ────────────────────────────────────────────────────────────

fn validate_operands(instr: &Instruction, num_qubits: usize, line: usize) -> Result<(), CircuitError> {
    // Register width first, so a narrow register reports the gate's minimum
    if let Some((gate, required)) = instr.register_requirement() {
        if num_qubits < required {
            return Err(GateError::InsufficientQubits { gate, required, actual: num_qubits }.into());
        }
    }

    let qubits = instr.qubits();
    for (i, &q) in qubits.iter().enumerate() {
        if q >= num_qubits {
            return Err(CircuitError::validation(format!(
                "line {line}: {} qubit index {q} is out of range for n:{num_qubits}",
                instr.mnemonic()
            )));
        }
        if qubits[..i].contains(&q) {
            return Err(CircuitError::validation(format!(
                "line {line}: {} uses qubit {q} more than once",
                instr.mnemonic()
            )));
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────
