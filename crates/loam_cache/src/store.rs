//! Loading and saving the persisted cache file.
//!
//! The on-disk form is the printed s-expression of the whole cache.
//! Loading is fail-safe: a missing, unreadable, or malformed file yields
//! `None` and the pipeline starts from an empty cache, so a corrupt cache
//! file can cost a full rebuild but never fail one.

use std::path::Path;

use tracing::{debug, warn};

use crate::cache::BuildCache;
use crate::error::CacheError;

/// Loads a cache from the given file.
///
/// Returns `None` when no usable cache exists there, whatever the reason:
/// the file is missing, unreadable, not valid s-expression text, or does
/// not have the cache shape.
pub fn load(path: &Path) -> Option<BuildCache> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(path = %path.display(), %err, "no cache file, starting fresh");
            return None;
        }
    };
    let sexp = match loam_sexp::parse_str(&text) {
        Ok(sexp) => sexp,
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding unparseable cache file");
            return None;
        }
    };
    match BuildCache::from_sexp(&sexp) {
        Ok(cache) => Some(cache),
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding cache file with unexpected shape");
            None
        }
    }
}

/// Saves the cache to the given file, creating parent directories as needed.
pub fn save(cache: &BuildCache, path: &Path) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let text = format!("{}\n", cache.to_sexp());
    std::fs::write(path, text).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_common::{DepsSet, ResourcePath};

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cache.scm");
        let deps: DepsSet = [ResourcePath::from("/t.html")].into_iter().collect();
        let cache = BuildCache::empty()
            .update(ResourcePath::from("/a.md"), deps, 1000, "abc123")
            .update(ResourcePath::from("/b.md"), DepsSet::empty(), 2000, "def456");

        save(&cache, &file).unwrap();
        assert_eq!(load(&file), Some(cache));
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("cache.scm")), None);
    }

    #[test]
    fn load_unparseable_text_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cache.scm");
        std::fs::write(&file, "((((").unwrap();
        assert_eq!(load(&file), None);
    }

    #[test]
    fn load_wrong_shape_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cache.scm");
        // Valid s-expression text, but not a cache.
        std::fs::write(&file, "(just-an-atom)").unwrap();
        assert_eq!(load(&file), None);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join(".loam").join("cache.scm");
        save(&BuildCache::empty(), &file).unwrap();
        assert!(file.exists());
        assert_eq!(load(&file), Some(BuildCache::empty()));
    }

    #[test]
    fn saved_empty_cache_is_the_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cache.scm");
        save(&BuildCache::empty(), &file).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "()\n");
    }
}
