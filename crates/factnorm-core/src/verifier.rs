//! Normalized fact verifier — checks that an output file holds ids 0..N in order
//!
//! Only the numbering is checked. Fact text is never inspected.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::{Error, NormalizedFact, Result};

/// A position whose id does not match its index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdMismatch {
    pub position: usize,
    pub expected: u64,
    pub found: u64,
}

/// Result of verifying a normalized fact list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub count: usize,
    pub mismatches: Vec<IdMismatch>,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// An empty list is valid, but usually a sign of a bad source file.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Check that `facts[i].id == i` for every position
pub fn verify_facts(facts: &[NormalizedFact]) -> VerificationReport {
    let mismatches = facts
        .iter()
        .enumerate()
        .filter(|(position, fact)| fact.id != *position as u64)
        .map(|(position, fact)| IdMismatch {
            position,
            expected: position as u64,
            found: fact.id,
        })
        .collect();

    VerificationReport {
        count: facts.len(),
        mismatches,
    }
}

/// Parse a normalized fact file and verify it
///
/// Returns the parsed facts alongside the report.
///
/// # Errors
/// `Io` if the file cannot be read, `InvalidJson` if it is not an array of
/// `{id, fact}` records.
pub fn verify_file(path: &Path) -> Result<(Vec<NormalizedFact>, VerificationReport)> {
    let raw = fs::read(path).map_err(|e| Error::io("read", path, e))?;
    let facts: Vec<NormalizedFact> = serde_json::from_slice(&raw)?;
    let report = verify_facts(&facts);

    if report.is_empty() {
        tracing::warn!("{} contains no facts", path.display());
    }
    for m in &report.mismatches {
        tracing::debug!(
            "{}: position {} has id {} (expected {})",
            path.display(),
            m.position,
            m.found,
            m.expected
        );
    }

    Ok((facts, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_slice;
    use crate::{ErrorKind, Extraction};

    fn fact(id: u64, text: &str) -> NormalizedFact {
        NormalizedFact {
            id,
            fact: text.into(),
        }
    }

    #[test]
    fn test_normalizer_output_verifies() {
        let facts =
            normalize_slice(br#"["a","b","c","d"]"#, &Extraction::Identity).unwrap();
        let report = verify_facts(&facts);
        assert!(report.is_valid());
        assert_eq!(report.count, 4);
    }

    #[test]
    fn test_detect_gap_and_reorder() {
        let facts = vec![fact(0, "a"), fact(2, "b"), fact(1, "c")];
        let report = verify_facts(&facts);
        assert!(!report.is_valid());
        assert_eq!(
            report.mismatches,
            vec![
                IdMismatch {
                    position: 1,
                    expected: 1,
                    found: 2
                },
                IdMismatch {
                    position: 2,
                    expected: 2,
                    found: 1
                },
            ]
        );
    }

    #[test]
    fn test_one_based_ids_rejected() {
        let facts = vec![fact(1, "a"), fact(2, "b")];
        assert_eq!(verify_facts(&facts).mismatches.len(), 2);
    }

    #[test]
    fn test_empty_is_valid_but_flagged() {
        let report = verify_facts(&[]);
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_verify_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog_facts.json");
        fs::write(&path, r#"[{"id":0,"fact":"Dogs have wet noses."}]"#).unwrap();

        let (facts, report) = verify_file(&path).unwrap();
        assert_eq!(facts.len(), 1);
        assert!(report.is_valid());
    }

    #[test]
    fn test_verify_file_rejects_raw_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uncleaned_dog_facts.json");
        fs::write(&path, r#"["Dogs have wet noses."]"#).unwrap();

        let err = verify_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_verify_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_file(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
