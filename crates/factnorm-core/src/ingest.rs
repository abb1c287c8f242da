//! File edges: read a raw fact file, normalize it, write the result
//!
//! The output is written to a temporary file next to the destination and
//! then renamed over it, so a failed run never leaves a half-written output
//! and an existing output survives untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::Builder;

use crate::digest::digest_str;
use crate::normalizer::{normalize_slice, serialize_facts};
use crate::{Category, Error, Extraction, OutputStyle, Result};

/// Summary of one completed ingest run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub count: usize,
    /// SHA-256 of the compact serialization
    pub digest: String,
}

/// Run one configured category, resolving its paths against `facts_dir`
pub fn run_category(
    category: &Category,
    facts_dir: &Path,
    style: OutputStyle,
) -> Result<IngestReport> {
    let input = category.input_path(facts_dir);
    let output = category.output_path(facts_dir);
    tracing::debug!(
        "category {}: {} -> {} ({})",
        category.name,
        input.display(),
        output.display(),
        category.extract
    );

    let mut report = ingest_file(&input, &output, &category.extract, style)?;
    report.category = Some(category.name.clone());
    Ok(report)
}

/// Normalize `input` into `output` under `rule`
///
/// # Errors
/// `Io` if the input cannot be read or the output cannot be written; any
/// malformed-input error from the normalizer. On error the output path is
/// left as it was.
pub fn ingest_file(
    input: &Path,
    output: &Path,
    rule: &Extraction,
    style: OutputStyle,
) -> Result<IngestReport> {
    let raw = fs::read(input).map_err(|e| Error::io("read", input, e))?;
    tracing::debug!("read {} bytes from {}", raw.len(), input.display());

    let facts = normalize_slice(&raw, rule)?;
    if facts.is_empty() {
        tracing::warn!("{} contains no facts", input.display());
    }

    let text = serialize_facts(&facts, style)?;
    write_atomic(output, text.as_bytes())?;

    // digest always covers the compact form
    let digest = match style {
        OutputStyle::Compact => digest_str(&text),
        OutputStyle::Pretty => digest_str(&serialize_facts(&facts, OutputStyle::Compact)?),
    };

    tracing::info!("wrote {} facts to {}", facts.len(), output.display());

    Ok(IngestReport {
        category: None,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        count: facts.len(),
        digest,
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = Builder::new();
    if existing.is_none() {
        if let Some(perms) = new_file_permissions() {
            builder.permissions(perms);
        }
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| Error::io("write", path, e))?;

    // replaced outputs keep their mode; set_permissions is not masked by umask
    if let Some(perms) = existing {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| Error::io("write", path, e))?;
    }

    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io("write", path, e))?;
    tmp.persist(path)
        .map_err(|e| Error::io("replace", path, e.error))?;
    Ok(())
}

/// Mode for a fresh output: 0666 before umask, like a plain `File::create`.
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
