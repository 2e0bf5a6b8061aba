//! Read-only access to the key-value store backing a dataset.
//!
//! A [`StoreReader`] is opened once per dataset instance and never writes.
//! The handle is reference-counted, so cloning a reader shares the same
//! underlying store; clones are safe to hand to multiple consumer threads,
//! each of which issues its own point reads.

use crate::core::constants::KeyLayout;
use crate::core::errors::{DatasetError, DatasetResult};
use crate::store::layout::{self, RecordId, NUM_SAMPLES_KEY};
use rocksdb::{Options, DB};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Read-only handle to a record store.
pub struct StoreReader {
    db: Arc<DB>,
    layout: KeyLayout,
    num_samples: u64,
}

impl std::fmt::Debug for StoreReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreReader")
            .field("layout", &self.layout)
            .field("num_samples", &self.num_samples)
            .finish()
    }
}

impl Clone for StoreReader {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            layout: self.layout,
            num_samples: self.num_samples,
        }
    }
}

impl StoreReader {
    /// Opens a store read-only and resolves its record counter.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::StoreOpen`] if the store cannot be opened, and
    /// [`DatasetError::RecordCount`] if `num-samples` is missing or does not
    /// parse to a positive integer. Both are fatal; a dataset is never
    /// constructed over a store whose record count is unknown.
    pub fn open(path: &Path, layout: KeyLayout, max_open_files: i32) -> DatasetResult<Self> {
        let mut opts = Options::default();
        opts.set_max_open_files(max_open_files);

        let db = DB::open_for_read_only(&opts, path, false).map_err(|source| {
            DatasetError::StoreOpen {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let raw = db
            .get(NUM_SAMPLES_KEY)?
            .ok_or_else(|| DatasetError::record_count("<missing num-samples key>"))?;
        let num_samples = layout::parse_num_samples(&raw)?;

        debug!(
            path = %path.display(),
            num_samples,
            layout_version = layout.version,
            "opened record store"
        );

        Ok(Self {
            db: Arc::new(db),
            layout,
            num_samples,
        })
    }

    /// Total number of stored records.
    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    /// Key layout this reader was opened with.
    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    /// Raw encoded image bytes of a record.
    pub fn image_bytes(&self, id: RecordId) -> DatasetResult<Vec<u8>> {
        self.value(layout::image_key(&self.layout, id))
    }

    /// Raw UTF-8 label bytes of a record.
    pub fn label_bytes(&self, id: RecordId) -> DatasetResult<Vec<u8>> {
        self.value(layout::label_key(&self.layout, id))
    }

    fn value(&self, key: String) -> DatasetResult<Vec<u8>> {
        self.db
            .get(key.as_bytes())?
            .ok_or(DatasetError::MissingRecord { key })
    }
}
