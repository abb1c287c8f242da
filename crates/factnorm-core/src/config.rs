//! Ingest configuration
//!
//! Loaded from a TOML file (default `factnorm.toml` in the working directory).
//! A missing default file means built-in settings: the `cat` and `dog`
//! categories resolved against the current directory.
//!
//! Example factnorm.toml:
//! ```toml
//! facts_dir = "data"
//! pretty = false
//!
//! [[category]]
//! name = "cat"
//! input = "uncleaned_cat_facts.json"
//! output = "cat_facts.json"
//! extract = { field = "fact" }
//!
//! [[category]]
//! name = "dog"
//! input = "uncleaned_dog_facts.json"
//! output = "dog_facts.json"
//! extract = "identity"
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Extraction, Result};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "factnorm.toml";

/// One named input → output job
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,
    /// Raw fact file, relative to `facts_dir` unless absolute
    pub input: PathBuf,
    /// Normalized fact file, relative to `facts_dir` unless absolute
    pub output: PathBuf,
    #[serde(default)]
    pub extract: Extraction,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        extract: Extraction,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            extract,
        }
    }

    /// Cat facts arrive as objects with a `fact` field.
    pub fn cat() -> Self {
        Self::new(
            "cat",
            "uncleaned_cat_facts.json",
            "cat_facts.json",
            Extraction::fact_field(),
        )
    }

    /// Dog facts arrive as bare strings.
    pub fn dog() -> Self {
        Self::new(
            "dog",
            "uncleaned_dog_facts.json",
            "dog_facts.json",
            Extraction::Identity,
        )
    }

    pub fn input_path(&self, facts_dir: &Path) -> PathBuf {
        facts_dir.join(&self.input)
    }

    pub fn output_path(&self, facts_dir: &Path) -> PathBuf {
        facts_dir.join(&self.output)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Directory that relative category paths resolve against.
    pub facts_dir: PathBuf,
    /// Pretty-print the normalized JSON.
    pub pretty: bool,
    #[serde(rename = "category")]
    pub categories: Vec<Category>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            facts_dir: PathBuf::from("."),
            pretty: false,
            categories: vec![Category::cat(), Category::dog()],
        }
    }
}

impl IngestConfig {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is tried and built-in defaults are used if it
    /// is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                match fs::read_to_string(default_path) {
                    Ok(text) => Self::from_toml(&text),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        tracing::debug!("no {} found, using built-in categories", DEFAULT_CONFIG_FILE);
                        Ok(Self::default())
                    }
                    Err(e) => Err(Error::io("read", default_path, e)),
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(
            "loaded {} with {} categories",
            path.display(),
            config.categories.len()
        );
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                let known: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
                Error::Config(format!(
                    "unknown category `{}` (known: {})",
                    name,
                    known.join(", ")
                ))
            })
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(Error::Config("category name must not be empty".into()));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate category `{}`",
                    category.name
                )));
            }
            if let Extraction::Field(field) = &category.extract {
                if field.is_empty() {
                    return Err(Error::Config(format!(
                        "category `{}`: extract field must not be empty",
                        category.name
                    )));
                }
            }
        }
        Ok(())
    }
}
