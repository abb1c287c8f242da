//! SHA-256 digest of a normalized fact list
//!
//! The digest is taken over the compact serialization, so two fact lists
//! share a digest exactly when they would be written byte-identically.

use sha2::{Digest, Sha256};

use crate::normalizer::serialize_facts;
use crate::{NormalizedFact, OutputStyle, Result};

/// Hex-encoded SHA-256 of the compact JSON form of `facts`
pub fn digest_facts(facts: &[NormalizedFact]) -> Result<String> {
    let canonical = serialize_facts(facts, OutputStyle::Compact)?;
    Ok(digest_str(&canonical))
}

pub(crate) fn digest_str(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}
