//! Content digesting for change detection.

/// Computes the content digest of a byte buffer.
///
/// Returns the lowercase hex form of the XXH3-128 hash of `data`. The
/// cache layer stores digests as opaque strings and never interprets them;
/// this function is the pipeline's producer side, run over a resource's
/// rendered output after each build.
pub fn content_digest(data: &[u8]) -> String {
    let hash = xxhash_rust::xxh3::xxh3_128(data);
    hash.to_le_bytes().iter().map(|b| format!("{b:02x}")).collect()
}
