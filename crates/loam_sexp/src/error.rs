//! Error types for the s-expression notation.

use crate::sexp::Sexp;

/// Errors produced while parsing the textual form of an s-expression.
///
/// Byte offsets refer to positions in the input passed to
/// [`parse_str`](crate::parse_str).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input contained no s-expression at all.
    #[error("empty input")]
    Empty,

    /// The input ended inside an unfinished list.
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    /// A closing parenthesis appeared with no matching opener.
    #[error("unmatched ')' at byte {0}")]
    UnmatchedClose(usize),

    /// A quoted atom was not terminated before the end of input.
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    /// A quoted atom contained an escape other than `\"`, `\\`, `\n`, `\t`.
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),

    /// Extra content followed the first toplevel s-expression.
    #[error("trailing content at byte {0}")]
    Trailing(usize),
}

/// A structurally well-formed s-expression that does not match the shape a
/// codec expected.
///
/// Carries the offending sub-tree verbatim plus a short label naming the
/// decode context that rejected it, so a log line shows both what was read
/// and which decoder gave up on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid s-expression for {label}: {sexp}")]
pub struct InvalidSexp {
    /// The sub-tree that failed to decode.
    pub sexp: Sexp,

    /// Name of the decode context that rejected the sub-tree.
    pub label: &'static str,
}

impl InvalidSexp {
    /// Creates an invalid-tree error for the given sub-tree and context label.
    pub fn new(sexp: Sexp, label: &'static str) -> Self {
        Self { sexp, label }
    }
}
