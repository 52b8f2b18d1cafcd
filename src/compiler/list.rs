/// Comma-separated qubit index lists, as carried by `controls:` and `qubits:`.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index list is empty")]
    Empty,
    #[error("invalid index '{entry}' at position {position}")]
    InvalidEntry { entry: String, position: usize },
}

/// Parse `"0, 2,5"` into `[0, 2, 5]`.
///
/// Entries are trimmed. Order and duplicates are preserved; range and
/// distinctness are checked later against the register. An empty list, an
/// empty entry (`"1,,2"`, trailing comma) or a non-integer entry is an error.
pub fn parse_index_list(text: &str) -> Result<Vec<usize>, ListError> {
    if text.trim().is_empty() {
        return Err(ListError::Empty);
    }
    text.split(',')
        .enumerate()
        .map(|(position, entry)| {
            let entry = entry.trim();
            entry
                .parse::<usize>()
                .map_err(|_| ListError::InvalidEntry { entry: entry.to_string(), position })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry() {
        assert_eq!(parse_index_list("3"), Ok(vec![3]));
    }

    #[test]
    fn test_multiple_entries_keep_order() {
        assert_eq!(parse_index_list("2,0,1"), Ok(vec![2, 0, 1]));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_index_list(" 0 , 1,2 "), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_index_list(""), Err(ListError::Empty));
        assert_eq!(parse_index_list("   "), Err(ListError::Empty));
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(
            parse_index_list("0,1,"),
            Err(ListError::InvalidEntry { entry: String::new(), position: 2 })
        );
    }

    #[test]
    fn test_non_integer_entry() {
        assert_eq!(
            parse_index_list("0,x"),
            Err(ListError::InvalidEntry { entry: "x".into(), position: 1 })
        );
        assert!(parse_index_list("-1").is_err());
    }
}
