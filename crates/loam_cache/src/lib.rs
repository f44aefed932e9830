//! Persisted build cache for incremental site rebuilds.
//!
//! Between pipeline runs the cache remembers, for every source resource,
//! the content digest produced the last time that resource was built, the
//! dependencies discovered during that build, and the build timestamp. On
//! the next run the pipeline consults it to decide whether a resource's
//! output can be reused; the cache itself only stores and returns data,
//! it does not decide staleness.
//!
//! The cache is a pure immutable value: [`BuildCache::update`] returns a
//! new cache and leaves the old one untouched. Conversion to and from the
//! persisted s-expression form is exposed as `to_sexp`/`from_sexp` on the
//! cache and entry types, with file I/O confined to the [`store`] module.

#![warn(missing_docs)]

pub mod cache;
mod codec;
pub mod entry;
pub mod error;
pub mod store;

pub use cache::BuildCache;
pub use entry::CacheEntry;
pub use error::CacheError;
