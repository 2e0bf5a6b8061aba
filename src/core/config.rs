//! Configuration structures for datasets and the label codec.
//!
//! Two configuration surfaces exist: [`AlphabetConfig`], the external JSON
//! object that defines the codec vocabulary (a single `alphabet` field), and
//! [`DatasetConfig`], the tunables of a dataset instance (key layout, skip
//! bound, reader file-handle bound).

use crate::core::constants::{KeyLayout, DEFAULT_MAX_OPEN_FILES, DEFAULT_MAX_SKIP};
use crate::core::errors::{DatasetError, DatasetResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Alphabet definition consumed once at codec construction.
///
/// Mirrors the on-disk `alphabet.json` shape: an object with an ordered
/// `alphabet` string whose characters become vocabulary entries 1..=n.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphabetConfig {
    /// Ordered characters of the vocabulary, without the reserved blank and
    /// unknown symbols.
    pub alphabet: String,
}

impl AlphabetConfig {
    /// Loads an alphabet definition from a JSON file.
    pub fn from_json_file(path: &Path) -> DatasetResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            DatasetError::config(format!("invalid alphabet file {}: {e}", path.display()))
        })
    }
}

/// Tunables for a dataset instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Key layout of the store being opened.
    pub layout: KeyLayout,
    /// Upper bound on consecutive corrupt records a single read may skip
    /// before reporting failure.
    pub max_skip: u64,
    /// Upper bound on open store file handles for the shared reader.
    pub max_open_files: i32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            layout: KeyLayout::default(),
            max_skip: DEFAULT_MAX_SKIP,
            max_open_files: DEFAULT_MAX_OPEN_FILES,
        }
    }
}

impl DatasetConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key width cannot format a `u64`,
    /// the skip bound is zero, or the file-handle bound is not positive.
    pub fn validate(&self) -> DatasetResult<()> {
        if self.layout.key_width == 0 || self.layout.key_width > 19 {
            return Err(DatasetError::config(format!(
                "key width must be between 1 and 19, got {}",
                self.layout.key_width
            )));
        }
        if self.max_skip == 0 {
            return Err(DatasetError::config(
                "max_skip must be greater than 0".to_string(),
            ));
        }
        if self.max_open_files <= 0 {
            return Err(DatasetError::config(format!(
                "max_open_files must be greater than 0, got {}",
                self.max_open_files
            )));
        }
        Ok(())
    }
}
