//! Fact normalizer — converts raw fact arrays to id-numbered fact lists
//!
//! # Pipeline
//!
//! `raw bytes → parse JSON → check top-level array → extract per element → number → serialize`
//!
//! # Guarantees
//!
//! - **Order preserving**: output position i holds input element i with `id = i`
//! - **Total**: no element is skipped, merged, or reordered
//! - **Deterministic**: same input and rule always produce the same output
//! - **Fail fast**: the first element that does not match the rule aborts the pass

use serde_json::Value;

use crate::error::json_type_name;
use crate::{Error, Extraction, NormalizedFact, OutputStyle, Result};

// ── Public API ─────────────────────────────────────────────

/// Parse raw input bytes and normalize them under `rule`
///
/// Input must be UTF-8 JSON whose top level is an array.
///
/// # Errors
/// `InvalidJson` if the bytes are not JSON, `NotAnArray` if the top level is
/// some other value, and `MissingField` / `NotAString` for the first element
/// that does not match the rule (`NotAnObject` for a non-object under a
/// field rule).
pub fn normalize_slice(bytes: &[u8], rule: &Extraction) -> Result<Vec<NormalizedFact>> {
    let value: Value = serde_json::from_slice(bytes)?;
    normalize_value(&value, rule)
}

/// Normalize an already-parsed JSON document
pub fn normalize_value(value: &Value, rule: &Extraction) -> Result<Vec<NormalizedFact>> {
    match value {
        Value::Array(records) => normalize_records(records, rule),
        other => Err(Error::NotAnArray {
            found: json_type_name(other),
        }),
    }
}

/// Normalize an ordered sequence of source records
///
/// The i-th output record has `id = i` and the fact extracted from the i-th
/// input record. An empty sequence yields an empty list.
pub fn normalize_records(records: &[Value], rule: &Extraction) -> Result<Vec<NormalizedFact>> {
    let mut facts = Vec::with_capacity(records.len());
    let mut next_id: u64 = 0;

    for (index, record) in records.iter().enumerate() {
        let fact = extract_fact(index, record, rule)?;
        facts.push(NormalizedFact {
            id: next_id,
            fact: fact.to_owned(),
        });
        next_id += 1;
    }

    Ok(facts)
}

/// Serialize normalized facts to JSON text
pub fn serialize_facts(facts: &[NormalizedFact], style: OutputStyle) -> Result<String> {
    let text = match style {
        OutputStyle::Compact => serde_json::to_string(facts)?,
        OutputStyle::Pretty => serde_json::to_string_pretty(facts)?,
    };
    Ok(text)
}

// ── Extraction ─────────────────────────────────────────────

fn extract_fact<'a>(index: usize, record: &'a Value, rule: &Extraction) -> Result<&'a str> {
    let text = match rule {
        Extraction::Identity => record,
        Extraction::Field(field) => match record {
            Value::Object(map) => map.get(field).ok_or_else(|| Error::MissingField {
                index,
                field: field.clone(),
            })?,
            other => {
                return Err(Error::NotAnObject {
                    index,
                    found: json_type_name(other),
                })
            }
        },
    };

    text.as_str().ok_or(Error::NotAString {
        index,
        found: json_type_name(text),
    })
}
