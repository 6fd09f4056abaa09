//! DIMACS CNF parsing (spec.md §5, §7). Clause boundaries are marked by `0`
//! tokens in the token stream, not by line breaks — a single line may hold
//! several clauses, or one clause may span several lines.

use std::fmt;

#[derive(Debug)]
pub enum DimacsError {
    /// A token outside a `c`/`p` line could not be parsed as an integer.
    BadLiteral {
        token: String,
        source: std::num::ParseIntError,
    },
    /// The token stream ended with literals accumulated but no closing `0`.
    UnterminatedClause,
}

impl fmt::Display for DimacsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimacsError::BadLiteral { token, source } => {
                write!(f, "invalid DIMACS token {token:?}: {source}")
            }
            DimacsError::UnterminatedClause => {
                write!(f, "input ended with a clause missing its trailing 0")
            }
        }
    }
}

impl std::error::Error for DimacsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsError::BadLiteral { source, .. } => Some(source),
            DimacsError::UnterminatedClause => None,
        }
    }
}

pub(crate) struct ParsedCnf {
    pub(crate) clauses: Vec<Vec<i32>>,
    pub(crate) num_vars: usize,
}

/// spec.md §5 — tokenizes the input, skipping `c` comment lines and the `p`
/// header line, and splits the remaining tokens into clauses on `0`.
///
/// spec.md §7 classifies a missing trailing `0` as malformed input: if
/// literals are still pending when the token stream ends, that is fatal,
/// matching `assert len(cnf[-1]) == 0` in the original parser.
pub(crate) fn parse(input: &str) -> Result<ParsedCnf, DimacsError> {
    let mut clauses = Vec::new();
    let mut current = Vec::new();
    let mut max_var = 0usize;

    for line in input.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None => continue,
            Some("c") | Some("p") => continue,
            Some(first) => {
                for token in std::iter::once(first).chain(tokens) {
                    let literal: i32 = token.parse().map_err(|source| DimacsError::BadLiteral {
                        token: token.to_string(),
                        source,
                    })?;
                    if literal == 0 {
                        clauses.push(std::mem::take(&mut current));
                    } else {
                        max_var = max_var.max(literal.unsigned_abs() as usize);
                        current.push(literal);
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }

    Ok(ParsedCnf {
        clauses,
        num_vars: max_var,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_clauses_per_line() {
        let input = "c a comment\np cnf 3 2\n1 -2 0 2 3 0\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.clauses, vec![vec![1, -2], vec![2, 3]]);
        assert_eq!(parsed.num_vars, 3);
    }

    #[test]
    fn clause_spans_multiple_lines() {
        let input = "p cnf 2 1\n1\n-2 0\n";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.clauses, vec![vec![1, -2]]);
    }

    #[test]
    fn missing_trailing_zero_is_fatal() {
        let input = "p cnf 1 1\n1\n";
        assert!(matches!(parse(input), Err(DimacsError::UnterminatedClause)));
    }

    #[test]
    fn rejects_non_numeric_token() {
        let input = "p cnf 1 1\n1 x 0\n";
        assert!(matches!(parse(input), Err(DimacsError::BadLiteral { .. })));
    }
}
