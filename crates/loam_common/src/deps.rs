//! Dependency sets discovered while building a resource.

use std::collections::BTreeSet;
use std::fmt;

use loam_sexp::{InvalidSexp, Sexp};
use serde::{Deserialize, Serialize};

use crate::path::ResourcePath;

/// Set of resources a build step turned out to depend on.
///
/// Holds the dependencies discovered *during* a build (template includes,
/// data files read by shortcodes, and the like) as opposed to dependencies
/// declared up front. Membership is a plain set: inserting a path twice is
/// a no-op, and iteration is in path order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepsSet {
    paths: BTreeSet<ResourcePath>,
}

impl DepsSet {
    /// Creates the empty dependency set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a dependency. Returns `false` if it was already present.
    pub fn insert(&mut self, path: ResourcePath) -> bool {
        self.paths.insert(path)
    }

    /// Returns `true` if `path` is a member.
    pub fn contains(&self, path: &ResourcePath) -> bool {
        self.paths.contains(path)
    }

    /// Returns `true` if no dependency has been recorded.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns the number of recorded dependencies.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Iterates over the member paths in path order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourcePath> {
        self.paths.iter()
    }

    /// Encodes the set as a list of path encodings, in path order.
    ///
    /// The empty set encodes as `()`.
    pub fn to_sexp(&self) -> Sexp {
        Sexp::List(self.paths.iter().map(ResourcePath::to_sexp).collect())
    }

    /// Decodes a set from its tree encoding.
    ///
    /// Accepts only a list of decodable path sub-trees; anything else is an
    /// invalid tree labeled `deps`.
    pub fn from_sexp(sexp: &Sexp) -> Result<Self, InvalidSexp> {
        let Sexp::List(items) = sexp else {
            return Err(InvalidSexp::new(sexp.clone(), "deps"));
        };
        let mut paths = BTreeSet::new();
        for item in items {
            let path = ResourcePath::from_sexp(item)
                .map_err(|_| InvalidSexp::new(sexp.clone(), "deps"))?;
            paths.insert(path);
        }
        Ok(Self { paths })
    }
}

impl FromIterator<ResourcePath> for DepsSet {
    fn from_iter<I: IntoIterator<Item = ResourcePath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for DepsSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{path}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let deps = DepsSet::empty();
        assert!(deps.is_empty());
        assert_eq!(deps.len(), 0);
        assert_eq!(deps.to_sexp(), Sexp::List(vec![]));
    }

    #[test]
    fn insert_deduplicates() {
        let mut deps = DepsSet::empty();
        assert!(deps.insert(ResourcePath::from("/a.md")));
        assert!(!deps.insert(ResourcePath::from("/a.md")));
        assert_eq!(deps.len(), 1);
        assert!(deps.contains(&ResourcePath::from("/a.md")));
    }

    #[test]
    fn from_iterator_collects_unique_paths() {
        let deps: DepsSet = ["/b.md", "/a.md", "/b.md"]
            .into_iter()
            .map(ResourcePath::from)
            .collect();
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn iteration_is_in_path_order() {
        let deps: DepsSet = ["/posts/z.md", "/a.md"]
            .into_iter()
            .map(ResourcePath::from)
            .collect();
        let rendered: Vec<String> = deps.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["/a.md", "/posts/z.md"]);
    }

    #[test]
    fn sexp_roundtrip() {
        let deps: DepsSet = ["/a.md", "/posts/b.md"]
            .into_iter()
            .map(ResourcePath::from)
            .collect();
        assert_eq!(DepsSet::from_sexp(&deps.to_sexp()), Ok(deps));
    }

    #[test]
    fn from_sexp_rejects_atom() {
        let err = DepsSet::from_sexp(&Sexp::Atom("a.md".to_string())).unwrap_err();
        assert_eq!(err.label, "deps");
    }

    #[test]
    fn from_sexp_rejects_bad_member() {
        let sexp = Sexp::List(vec![Sexp::Atom("not-a-path-tree".to_string())]);
        let err = DepsSet::from_sexp(&sexp).unwrap_err();
        assert_eq!(err.label, "deps");
        assert_eq!(err.sexp, sexp);
    }

    #[test]
    fn display_lists_members() {
        let deps: DepsSet = ["/b.md", "/a.md"].into_iter().map(ResourcePath::from).collect();
        assert_eq!(deps.to_string(), "{/a.md, /b.md}");
        assert_eq!(DepsSet::empty().to_string(), "{}");
    }

    #[test]
    fn serde_roundtrip() {
        let deps: DepsSet = ["/a.md"].into_iter().map(ResourcePath::from).collect();
        let json = serde_json::to_string(&deps).unwrap();
        let back: DepsSet = serde_json::from_str(&json).unwrap();
        assert_eq!(deps, back);
    }
}
