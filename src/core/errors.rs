//! Error types for the dataset loading layer.
//!
//! The taxonomy separates fatal data-contract violations (unopenable store,
//! bad record counter, empty label, decode length mismatch) from the one
//! locally recovered condition: a corrupt image, which the dataset skips
//! before this error surfaces.

use std::path::PathBuf;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors raised while opening a store, resolving records, or running the
/// label codec.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The key-value store could not be opened read-only.
    #[error("cannot open store at {path}")]
    StoreOpen {
        /// Path of the store that failed to open.
        path: PathBuf,
        /// The underlying store error.
        #[source]
        source: rocksdb::Error,
    },

    /// The `num-samples` counter is missing, unparsable, or inconsistent
    /// with the requested dataset view.
    #[error("invalid record count: {value}")]
    RecordCount {
        /// The offending raw value or a description of the inconsistency.
        value: String,
    },

    /// A record key inside the valid id range resolved to no value.
    #[error("missing record key {key}")]
    MissingRecord {
        /// The key that was looked up.
        key: String,
    },

    /// A label decoded to an empty string (data-contract violation).
    #[error("empty label for record {record_id}")]
    EmptyLabel {
        /// The 1-based id of the offending record.
        record_id: u64,
    },

    /// Label bytes were not valid UTF-8.
    #[error("label for record {record_id} is not valid UTF-8")]
    LabelNotUtf8 {
        /// The 1-based id of the offending record.
        record_id: u64,
        /// The underlying decode error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// No decodable image was found within the skip window starting at the
    /// requested record.
    #[error("no decodable image from record {record_id} after {attempts} attempts")]
    ImageDecode {
        /// The originally requested record id.
        record_id: u64,
        /// Number of sequential records tried before giving up.
        attempts: u64,
        /// The decode error of the last attempted record.
        #[source]
        source: image::ImageError,
    },

    /// A logical position beyond the dataset view was requested.
    #[error("position {position} out of range for dataset of length {len}")]
    PositionOutOfRange {
        /// The requested 0-based logical position.
        position: u64,
        /// Length of the dataset view.
        len: u64,
    },

    /// The per-sample lengths passed to `decode` do not sum to the flat
    /// sequence size.
    #[error("decode length mismatch: lengths sum to {expected}, sequence has {actual}")]
    LengthMismatch {
        /// Sum of the claimed per-sample lengths.
        expected: usize,
        /// Actual number of class indices in the flat sequence.
        actual: usize,
    },

    /// A class index outside the vocabulary was passed to `decode`.
    #[error("class index {index} out of range for {num_classes} classes")]
    ClassOutOfRange {
        /// The offending class index.
        index: usize,
        /// Size of the vocabulary.
        num_classes: usize,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from a store read after the store was opened.
    #[error("store read")]
    Store(#[from] rocksdb::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    /// Creates a configuration error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a record-count error from the offending value.
    pub fn record_count(value: impl Into<String>) -> Self {
        Self::RecordCount {
            value: value.into(),
        }
    }

    /// True when the error is the locally recoverable corrupt-image case.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ImageDecode { .. })
    }
}
