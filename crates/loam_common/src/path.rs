//! Site-root-relative resource paths.

use std::fmt;

use loam_sexp::{InvalidSexp, Sexp};
use serde::{Deserialize, Serialize};

/// Identifier of a single source resource, as a normalized sequence of
/// path fragments relative to the site root.
///
/// Construction drops empty fragments, so `"/a.md"`, `"a.md"` and `"a.md/"`
/// all name the same resource. Paths order lexicographically fragment by
/// fragment, which makes them directly usable as sorted map keys. The
/// serde form is the rendered string (`"/posts/a.md"`), matching how the
/// rest of the pipeline spells resources in its metadata files.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ResourcePath {
    fragments: Vec<String>,
}

impl ResourcePath {
    /// Creates a path from an iterator of fragments, dropping empty ones.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(Into::into)
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Returns the path's fragments, site root first.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Encodes the path as a list of one atom per fragment.
    pub fn to_sexp(&self) -> Sexp {
        Sexp::List(
            self.fragments
                .iter()
                .map(|f| Sexp::Atom(f.clone()))
                .collect(),
        )
    }

    /// Decodes a path from its tree encoding.
    ///
    /// Accepts only a list whose every child is an atom; anything else is
    /// an invalid tree labeled `path`. The empty list decodes to the
    /// empty (site-root) path.
    pub fn from_sexp(sexp: &Sexp) -> Result<Self, InvalidSexp> {
        let Sexp::List(items) = sexp else {
            return Err(InvalidSexp::new(sexp.clone(), "path"));
        };
        let mut fragments = Vec::with_capacity(items.len());
        for item in items {
            let Sexp::Atom(fragment) = item else {
                return Err(InvalidSexp::new(sexp.clone(), "path"));
            };
            fragments.push(fragment.clone());
        }
        Ok(Self::new(fragments))
    }
}

impl From<&str> for ResourcePath {
    fn from(s: &str) -> Self {
        Self::new(s.split('/'))
    }
}

impl From<String> for ResourcePath {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragments.is_empty() {
            return f.write_str("/");
        }
        for fragment in &self.fragments {
            write!(f, "/{fragment}")?;
        }
        Ok(())
    }
}
