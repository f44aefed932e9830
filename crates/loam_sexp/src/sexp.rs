//! The two-variant s-expression tree and its printer.

use std::fmt;

/// A generic s-expression: an atomic string leaf or an ordered list of
/// sub-trees.
///
/// All persisted build state is expressed in this notation. The `Display`
/// impl prints the canonical textual form, which [`parse_str`] reads back;
/// printing then parsing always reproduces the original tree.
///
/// [`parse_str`]: crate::parse_str
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sexp {
    /// An atomic string leaf. Any string is representable, including the
    /// empty string, which prints as `""`.
    Atom(String),

    /// An ordered list of sub-trees, printed as a parenthesized sequence.
    List(Vec<Sexp>),
}

/// Returns `true` if the atom text cannot be printed bare.
fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\\'))
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(text) => {
                if needs_quoting(text) {
                    write_quoted(f, text)
                } else {
                    f.write_str(text)
                }
            }
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
