//! Shared foundational types for the loam build pipeline.
//!
//! This crate provides site-root-relative resource paths, build-time
//! dependency sets, and content digesting, as consumed by the incremental
//! build cache and the rest of the pipeline.

#![warn(missing_docs)]

pub mod deps;
pub mod digest;
pub mod path;

pub use deps::DepsSet;
pub use digest::content_digest;
pub use path::ResourcePath;
