//! Conversion options.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// How the record's `tops` list is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopsPolicy {
    /// Position of the root node in `nodes[]`.
    #[default]
    Root,
    /// Always `[0]`, regardless of where the root landed.
    Placeholder,
}

/// Options shared by parsing and emission.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Ceiling on bracket nesting and on traversal depth.
    pub max_depth: usize,
    pub tops: TopsPolicy,
    /// Stamp each record with the local conversion time.
    pub timestamp: bool,
    /// Attach entity type, name and wiki title to entity nodes.
    ///
    /// Off by default: records then carry entity data only through the
    /// `wiki` property and the name node's `op` values. Enable it to get an
    /// `entity` object on each entity node.
    pub entity_metadata: bool,
    pub framework: String,
    pub flavor: u8,
    pub version: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            tops: TopsPolicy::Root,
            timestamp: true,
            entity_metadata: false,
            framework: "amr".into(),
            flavor: 2,
            version: 0.9,
        }
    }
}

impl Options {
    /// Read options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(|e| match e {
            Error::Config(message) => Error::Config(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let options: Options = serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        if options.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".into()));
        }
        Ok(options)
    }
}
