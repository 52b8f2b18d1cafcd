/// Circuit-text lexer.
///
/// The format is line-oriented: every non-blank line is either a
/// `key:value` field or a lone `@` that closes the current gate record.
/// Comments begin with `#` and run to end of line.
///
/// ```text
/// n:3
/// @
/// type:toffoli
/// control1:0
/// control2:1
/// target:2
/// position:0
/// @
/// ```
///
/// Keys and values are trimmed; values keep their case. Interpretation of
/// keys is left to the parser.
use crate::error::CircuitError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `key:value`
    Field { key: String, value: String },
    /// `@` record terminator
    Separator,
}

impl Token {
    /// Return a display string, used in error messages.
    pub fn display(&self) -> String {
        match self {
            Token::Field { key, value } => format!("{key}:{value}"),
            Token::Separator => "@".into(),
        }
    }
}

// ── Spanned token ─────────────────────────────────────────────────────────

/// A token annotated with its source line number (1-based).
#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

// ── Public API ────────────────────────────────────────────────────────────

/// Tokenize circuit text into a flat stream of fields and separators.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, CircuitError> {
    let mut tokens = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line_num = idx + 1;

        let content = strip_comment(line).trim();
        if content.is_empty() {
            continue;
        }

        let token = lex_line(content, line_num)?;
        tokens.push(Spanned { token, line: line_num });
    }

    Ok(tokens)
}

// ── Internal helpers ──────────────────────────────────────────────────────

fn strip_comment(line: &str) -> &str {
    line.find('#').map_or(line, |p| &line[..p])
}

fn lex_line(content: &str, line: usize) -> Result<Token, CircuitError> {
    if content == "@" {
        return Ok(Token::Separator);
    }

    let (key, value) = content.split_once(':').ok_or_else(|| CircuitError::Lex {
        line,
        msg: format!("expected 'key:value' or '@', found '{content}'"),
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CircuitError::Lex { line, msg: format!("missing key in '{content}'") });
    }
    if key.contains(char::is_whitespace) {
        return Err(CircuitError::Lex { line, msg: format!("key '{key}' contains whitespace") });
    }

    Ok(Token::Field { key: key.to_string(), value: value.trim().to_string() })
}

// ── Tests ─────────────────────────────────────────────────────────────────
