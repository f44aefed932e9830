//! Per-resource cache records.

use loam_common::DepsSet;
use serde::{Deserialize, Serialize};

/// Cached record for a single resource.
///
/// Stores the opaque content digest from the resource's last build, the
/// dependencies discovered while building it, and the build timestamp.
/// The digest is never interpreted or validated at this layer; whatever
/// string the pipeline produced is stored as-is, the empty string included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Opaque digest of the resource's last built content.
    pub hashed_content: String,

    /// Dependencies discovered during the build rather than declared
    /// statically. May be empty.
    pub dynamic_deps: DepsSet,

    /// Timestamp of the last build, as supplied by the pipeline (e.g. Unix
    /// epoch seconds).
    ///
    /// `None` only for records deserialized from the dateless legacy form;
    /// entries written by [`BuildCache::update`](crate::BuildCache::update)
    /// always carry one.
    pub last_build_date: Option<i64>,
}

impl CacheEntry {
    /// Creates an entry. No validation is performed on any field.
    pub fn new(
        hashed_content: impl Into<String>,
        dynamic_deps: DepsSet,
        last_build_date: Option<i64>,
    ) -> Self {
        Self {
            hashed_content: hashed_content.into(),
            dynamic_deps,
            last_build_date,
        }
    }
}
