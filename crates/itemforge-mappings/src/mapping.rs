//! JSON mapping files: symbolic name -> remote identifier.

use itemforge_domain::traits::MappingResolver;
use itemforge_domain::{EntityId, LookupError, PropertyId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur loading a mapping file
///
/// A load either yields a populated table or one of these; there is no
/// silently-empty fallback.
#[derive(Debug, Error)]
pub enum MappingError {
    /// File could not be read
    #[error("cannot read mapping file {path}: {source}")]
    Io {
        /// The offending file
        path: String,
        /// OS detail
        source: std::io::Error,
    },

    /// File is not a JSON object of strings
    #[error("cannot decode mapping file {path}: {source}")]
    Json {
        /// The offending file
        path: String,
        /// Decoder detail
        source: serde_json::Error,
    },
}

/// One name -> code table loaded from a JSON mapping file.
#[derive(Debug, Clone, Default)]
pub struct Mapping(HashMap<String, String>);

impl Mapping {
    /// Load a table from a JSON file of string-to-string pairs.
    pub fn from_path(path: &Path) -> Result<Self, MappingError> {
        let text = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table: HashMap<String, String> =
            serde_json::from_str(&text).map_err(|source| MappingError::Json {
                path: path.display().to_string(),
                source,
            })?;
        info!(path = %path.display(), entries = table.len(), "loaded mapping file");
        Ok(Self(table))
    }

    /// Build a table directly, mainly for tests and fixtures.
    pub fn from_table(table: HashMap<String, String>) -> Self {
        Self(table)
    }

    /// The code mapped under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The property and item tables backing [`MappingResolver`].
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    properties: Mapping,
    items: Mapping,
}

impl MappingStore {
    /// Combine already-loaded tables.
    pub fn new(properties: Mapping, items: Mapping) -> Self {
        Self { properties, items }
    }

    /// Load `properties.json` and `items.json` from a mapping directory.
    pub fn from_dir(dir: &Path) -> Result<Self, MappingError> {
        Ok(Self {
            properties: Mapping::from_path(&dir.join("properties.json"))?,
            items: Mapping::from_path(&dir.join("items.json"))?,
        })
    }
}

impl MappingResolver for MappingStore {
    fn resolve_property(&self, name: &str) -> Result<PropertyId, LookupError> {
        // A blank code in the file behaves like a missing key.
        self.properties
            .get(name)
            .and_then(|code| PropertyId::new(code).ok())
            .ok_or_else(|| LookupError::UnknownProperty(name.to_string()))
    }

    fn resolve_item(&self, name: &str) -> Result<EntityId, LookupError> {
        self.items
            .get(name)
            .and_then(|code| EntityId::new(code).ok())
            .ok_or_else(|| LookupError::UnknownItem(name.to_string()))
    }
}
