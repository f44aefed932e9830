//! The immutable mapping from resource paths to cache entries.

use std::collections::BTreeMap;
use std::fmt;

use loam_common::{DepsSet, ResourcePath};
use serde::{Deserialize, Serialize};

use crate::entry::CacheEntry;

/// The build cache: an immutable map from [`ResourcePath`] to [`CacheEntry`].
///
/// Never mutated in place. [`update`](BuildCache::update) returns a new
/// cache value and leaves the receiver untouched, so the cache loaded at
/// startup stays observable for the whole run while successive updates
/// accumulate in a fold. Any number of readers can share one value without
/// coordination; sequencing *which* value is current is the pipeline's
/// concern.
///
/// Two caches are equal when they hold the same paths and, per path, equal
/// entries. Iteration and the persisted form follow path order, which is
/// an artifact of the backing map and not a contract consumers may rely on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCache {
    entries: BTreeMap<ResourcePath, CacheEntry>,
}

impl BuildCache {
    /// Creates the cache with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a cache from `(path, entry)` pairs.
    ///
    /// When a path repeats, the later pair wins, matching left-to-right
    /// insertion into a map.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ResourcePath, CacheEntry)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Records a build result, returning the updated cache.
    ///
    /// The returned cache binds `path` to a fresh entry holding `content`
    /// as digest, `deps` as discovered dependencies, and `now` as the build
    /// date; every other binding is carried over unchanged. The receiver is
    /// not modified and remains fully usable.
    pub fn update(
        &self,
        path: ResourcePath,
        deps: DepsSet,
        now: i64,
        content: impl Into<String>,
    ) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(path, CacheEntry::new(content, deps, Some(now)));
        Self { entries }
    }

    /// Looks up the stored record for a resource.
    ///
    /// Returns the digest, the dependency set, and the optional build date,
    /// or `None` if the resource has never been recorded.
    pub fn get(&self, path: &ResourcePath) -> Option<(&str, &DepsSet, Option<i64>)> {
        self.entries
            .get(path)
            .map(|e| (e.hashed_content.as_str(), &e.dynamic_deps, e.last_build_date))
    }

    /// Returns the number of cached resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no resource has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(path, entry)` bindings in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourcePath, &CacheEntry)> {
        self.entries.iter()
    }
}

impl fmt::Display for BuildCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, entry) in &self.entries {
            write!(f, "{path}: {} deps={}", entry.hashed_content, entry.dynamic_deps)?;
            match entry.last_build_date {
                Some(date) => writeln!(f, " built={date}")?,
                None => writeln!(f, " built=never")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ResourcePath {
        ResourcePath::from(s)
    }

    fn entry(digest: &str, date: Option<i64>) -> CacheEntry {
        CacheEntry::new(digest, DepsSet::empty(), date)
    }

    #[test]
    fn empty_cache_misses_everything() {
        let cache = BuildCache::empty();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&path("/a.md")), None);
    }

    #[test]
    fn update_then_get_returns_the_recorded_triple() {
        let deps: DepsSet = [path("/t.html")].into_iter().collect();
        let cache = BuildCache::empty().update(path("/a.md"), deps.clone(), 1000, "abc123");
        assert_eq!(cache.get(&path("/a.md")), Some(("abc123", &deps, Some(1000))));
    }

    #[test]
    fn update_leaves_other_bindings_unchanged() {
        let c1 = BuildCache::empty().update(path("/a.md"), DepsSet::empty(), 1000, "aaa");
        let c2 = c1.update(path("/b.md"), DepsSet::empty(), 2000, "bbb");
        assert_eq!(c2.get(&path("/a.md")), c1.get(&path("/a.md")));
        assert_eq!(c2.len(), 2);
    }

    #[test]
    fn update_does_not_mutate_the_receiver() {
        let c1 = BuildCache::empty().update(path("/a.md"), DepsSet::empty(), 1000, "old");
        let c2 = c1.update(path("/a.md"), DepsSet::empty(), 2000, "new");
        assert_eq!(c1.get(&path("/a.md")), Some(("old", &DepsSet::empty(), Some(1000))));
        assert_eq!(c2.get(&path("/a.md")), Some(("new", &DepsSet::empty(), Some(2000))));
    }

    #[test]
    fn from_pairs_is_last_write_wins() {
        let c1 = BuildCache::from_pairs([
            (path("/a.md"), entry("first", Some(1))),
            (path("/a.md"), entry("second", Some(2))),
        ]);
        let c2 = BuildCache::from_pairs([(path("/a.md"), entry("second", Some(2)))]);
        assert_eq!(c1, c2);
    }

    #[test]
    fn equality_requires_identical_key_sets() {
        let a = BuildCache::from_pairs([(path("/a.md"), entry("x", None))]);
        let b = BuildCache::from_pairs([(path("/b.md"), entry("x", None))]);
        assert_ne!(a, b);
        assert_ne!(a, BuildCache::empty());
    }

    #[test]
    fn equality_is_sensitive_to_each_entry_field() {
        let base = BuildCache::from_pairs([(path("/a.md"), entry("x", Some(1)))]);
        assert_eq!(base, base.clone());

        let digest = BuildCache::from_pairs([(path("/a.md"), entry("y", Some(1)))]);
        assert_ne!(base, digest);

        let deps: DepsSet = [path("/t.html")].into_iter().collect();
        let with_deps = BuildCache::from_pairs([(
            path("/a.md"),
            CacheEntry::new("x", deps, Some(1)),
        )]);
        assert_ne!(base, with_deps);

        let dateless = BuildCache::from_pairs([(path("/a.md"), entry("x", None))]);
        assert_ne!(base, dateless);
    }

    #[test]
    fn display_renders_one_line_per_resource() {
        let deps: DepsSet = [path("/t.html")].into_iter().collect();
        let cache = BuildCache::from_pairs([
            (path("/a.md"), CacheEntry::new("abc123", deps, Some(1000))),
            (path("/b.md"), entry("def456", None)),
        ]);
        let rendered = cache.to_string();
        assert_eq!(
            rendered,
            "/a.md: abc123 deps={/t.html} built=1000\n/b.md: def456 deps={} built=never\n"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let cache = BuildCache::empty().update(path("/a.md"), DepsSet::empty(), 1000, "abc123");
        let json = serde_json::to_string(&cache).unwrap();
        let back: BuildCache = serde_json::from_str(&json).unwrap();
        assert_eq!(cache, back);
    }
}
