//! Conversion between cache values and the persisted tree notation.
//!
//! The persisted grammar, layered on the generic notation:
//!
//! ```text
//! cache       ::= ( entry-pair* )
//! entry-pair  ::= ( path entry )
//! entry       ::= ( digest-atom deps )
//!               | ( digest-atom deps date-atom )
//! ```
//!
//! `path` and `deps` are the encodings owned by [`ResourcePath`] and
//! [`DepsSet`]; `date-atom` is the decimal build timestamp. A missing
//! build date is represented by the two-element entry form, never by a
//! sentinel value. Encoding is total; decoding is a structural match over
//! the already-parsed tree and is all-or-nothing, aborting on the first
//! malformed sub-tree. Delegated path and deps failures are reported as
//! `cache`-labeled errors at this boundary.

use loam_common::{DepsSet, ResourcePath};
use loam_sexp::{InvalidSexp, Sexp};

use crate::cache::BuildCache;
use crate::entry::CacheEntry;

impl CacheEntry {
    /// Encodes the entry as `(digest deps)` or `(digest deps date)`.
    ///
    /// The trailing date atom is present exactly when the entry has a
    /// build date.
    pub fn to_sexp(&self) -> Sexp {
        let mut items = vec![
            Sexp::Atom(self.hashed_content.clone()),
            self.dynamic_deps.to_sexp(),
        ];
        if let Some(date) = self.last_build_date {
            items.push(Sexp::Atom(date.to_string()));
        }
        Sexp::List(items)
    }

    /// Decodes an entry from its tree encoding.
    ///
    /// Accepts the two-element form (no build date) and the three-element
    /// form (decimal build date). A third atom that does not parse as an
    /// integer is reported against `last_build_date`, carrying that atom;
    /// every other shape mismatch, an undecodable dependency sub-tree
    /// included, is reported against `cache` with the whole entry sub-tree.
    pub fn from_sexp(sexp: &Sexp) -> Result<Self, InvalidSexp> {
        let invalid = || InvalidSexp::new(sexp.clone(), "cache");
        let Sexp::List(items) = sexp else {
            return Err(invalid());
        };
        match items.as_slice() {
            [Sexp::Atom(digest), deps] => {
                let deps = DepsSet::from_sexp(deps).map_err(|_| invalid())?;
                Ok(Self::new(digest.clone(), deps, None))
            }
            [Sexp::Atom(digest), deps, Sexp::Atom(date)] => {
                let deps = DepsSet::from_sexp(deps).map_err(|_| invalid())?;
                let date: i64 = date.parse().map_err(|_| {
                    InvalidSexp::new(Sexp::Atom(date.clone()), "last_build_date")
                })?;
                Ok(Self::new(digest.clone(), deps, Some(date)))
            }
            _ => Err(invalid()),
        }
    }
}

impl BuildCache {
    /// Encodes the whole cache as a list of `(path entry)` pairs.
    ///
    /// Pairs appear in path order. The order is an artifact of the backing
    /// map, not part of the persisted contract.
    pub fn to_sexp(&self) -> Sexp {
        Sexp::List(
            self.iter()
                .map(|(path, entry)| Sexp::List(vec![path.to_sexp(), entry.to_sexp()]))
                .collect(),
        )
    }

    /// Decodes a cache from its tree encoding.
    ///
    /// Accepts only a list whose every child is a two-element
    /// `(path entry)` pair. The first malformed child aborts the whole
    /// decode with its error; no partial cache is ever returned.
    pub fn from_sexp(sexp: &Sexp) -> Result<Self, InvalidSexp> {
        let Sexp::List(items) = sexp else {
            return Err(InvalidSexp::new(sexp.clone(), "cache"));
        };
        let mut pairs = Vec::with_capacity(items.len());
        for item in items {
            let Sexp::List(pair) = item else {
                return Err(InvalidSexp::new(item.clone(), "cache"));
            };
            let [key, value] = pair.as_slice() else {
                return Err(InvalidSexp::new(item.clone(), "cache"));
            };
            let path = ResourcePath::from_sexp(key)
                .map_err(|_| InvalidSexp::new(item.clone(), "cache"))?;
            let entry = CacheEntry::from_sexp(value)?;
            pairs.push((path, entry));
        }
        Ok(Self::from_pairs(pairs))
    }
}
