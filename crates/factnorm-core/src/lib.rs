//! factnorm core - turns raw fact dumps into id-numbered fact lists
//!
//! Raw fact files come in one of two shapes: an array of objects carrying the
//! fact text under some field, or an array of bare strings. Both normalize to
//! the same output: an array of `{"id": n, "fact": "..."}` records where `id`
//! counts up from zero in input order.
//!
//! # Architecture
//!
//! ```text
//! raw JSON → Normalizer (Extraction rule) → Vec<NormalizedFact> → serialize
//!     ↑                                                              ↓
//!   Ingest (read whole file)                  Ingest (atomic write of whole file)
//!                                                                    ↓
//!                                              Verifier / Digest (check output)
//! ```
//!
//! # Guarantees
//!
//! - **Order preserving**: the i-th record in gets `id = i` out
//! - **Deterministic**: same input always produces byte-identical output
//! - **All or nothing**: a malformed element aborts the run before any write

pub mod config;
pub mod digest;
pub mod error;
pub mod ingest;
pub mod normalizer;
pub mod verifier;

pub use config::{Category, IngestConfig};
pub use error::{Error, ErrorKind, Result};
pub use ingest::IngestReport;

use serde::{Deserialize, Serialize};

/// Version of this library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One normalized fact as written to the output file
///
/// Field order is significant for the serialized form: `id` first, then `fact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFact {
    pub id: u64,
    pub fact: String,
}

/// How the fact text is pulled out of each element of the raw array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extraction {
    /// Element is an object; the fact is the string under this key
    Field(String),
    /// Element is itself the fact string
    Identity,
}

impl Extraction {
    /// The rule used by object-shaped sources: read the `fact` field
    pub fn fact_field() -> Self {
        Extraction::Field("fact".to_string())
    }
}

impl Default for Extraction {
    fn default() -> Self {
        Self::fact_field()
    }
}

impl std::fmt::Display for Extraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extraction::Field(name) => write!(f, "field `{}`", name),
            Extraction::Identity => write!(f, "identity"),
        }
    }
}

/// Output formatting for the normalized JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Single line, no whitespace
    #[default]
    Compact,
    /// Indented, one field per line
    Pretty,
}

impl OutputStyle {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            OutputStyle::Pretty
        } else {
            OutputStyle::Compact
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_serializes_id_first() {
        let fact = NormalizedFact {
            id: 0,
            fact: "Cats sleep 70% of their lives.".into(),
        };
        let json = serde_json::to_string(&fact).unwrap();
        assert_eq!(json, r#"{"id":0,"fact":"Cats sleep 70% of their lives."}"#);
    }

    #[test]
    fn test_extraction_serde_forms() {
        let field: Extraction = serde_json::from_str(r#"{"field":"fact"}"#).unwrap();
        assert_eq!(field, Extraction::fact_field());

        let identity: Extraction = serde_json::from_str(r#""identity""#).unwrap();
        assert_eq!(identity, Extraction::Identity);
    }

    #[test]
    fn test_extraction_display() {
        assert_eq!(Extraction::fact_field().to_string(), "field `fact`");
        assert_eq!(Extraction::Identity.to_string(), "identity");
    }
}
