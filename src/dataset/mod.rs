//! Pull-based dataset over a record store.
//!
//! An [`OcrDataset`] resolves logical positions through a [`SampleIndex`],
//! reads image and label bytes from a shared [`StoreReader`], and decodes
//! them into [`Sample`]s. A corrupt image is not fatal: the read logs the
//! failing id and advances to the next sequential record, bounded by a
//! configurable skip window and by the end of the store. Labels are only
//! validated for the record that is actually returned.

pub mod index;

pub use index::{DatasetView, SampleIndex};

use crate::core::config::DatasetConfig;
use crate::core::errors::{DatasetError, DatasetResult};
use crate::processors::ResizeNormalize;
use crate::store::layout::RecordId;
use crate::store::StoreReader;
use crate::utils::decode_rgb;
use image::RgbImage;
use ndarray::Array3;
use std::path::Path;
use tracing::warn;

/// One decoded sample: the record it came from, its image, and its
/// non-empty transcription.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Physical id of the record this sample was read from. Differs from
    /// the requested position's id when corrupt records were skipped.
    pub record_id: RecordId,
    /// Decoded 3-channel image.
    pub image: RgbImage,
    /// Transcription text, guaranteed non-empty.
    pub text: String,
}

/// A read-only dataset over a key-value record store.
#[derive(Debug, Clone)]
pub struct OcrDataset {
    reader: StoreReader,
    index: SampleIndex,
    transform: Option<ResizeNormalize>,
    max_skip: u64,
}

impl OcrDataset {
    /// Opens the store at `path` and builds the requested view over it.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid, the store cannot be opened,
    /// or the record counter is missing, unparsable, or too small for a
    /// split view.
    pub fn open(path: &Path, view: DatasetView, config: &DatasetConfig) -> DatasetResult<Self> {
        config.validate()?;
        let reader = StoreReader::open(path, config.layout, config.max_open_files)?;
        let index = SampleIndex::new(view, reader.num_samples(), &config.layout)?;
        Ok(Self {
            reader,
            index,
            transform: None,
            max_skip: config.max_skip,
        })
    }

    /// Attaches a resize-and-normalize transform for [`get_normalized`].
    ///
    /// [`get_normalized`]: OcrDataset::get_normalized
    pub fn with_transform(mut self, transform: ResizeNormalize) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Number of logical samples in the view.
    pub fn len(&self) -> u64 {
        self.index.len()
    }

    /// True when the view contains no samples.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Fetches the sample at a logical position.
    ///
    /// A record whose image bytes do not decode is skipped in favor of the
    /// next sequential record, up to `max_skip` records past the requested
    /// one and never past the end of the store.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ImageDecode`] when the skip window is
    /// exhausted, and fatal label errors ([`DatasetError::EmptyLabel`],
    /// [`DatasetError::LabelNotUtf8`]) for the record that was landed on.
    pub fn get(&self, position: u64) -> DatasetResult<Sample> {
        let start = self.index.record_id(position)?;
        self.fetch_from(start)
    }

    /// Fetches a sample and applies the configured transform to its image.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no transform is attached, plus
    /// anything [`get`](OcrDataset::get) can return.
    pub fn get_normalized(&self, position: u64) -> DatasetResult<(Array3<f32>, String)> {
        let transform = self
            .transform
            .as_ref()
            .ok_or_else(|| DatasetError::config("no transform attached to dataset"))?;
        let sample = self.get(position)?;
        Ok((transform.apply(&sample.image), sample.text))
    }

    /// Iterates over all samples in logical order.
    pub fn iter(&self) -> impl Iterator<Item = DatasetResult<Sample>> + '_ {
        (0..self.len()).map(move |position| self.get(position))
    }

    /// Reads every label in the store, `1..=num_samples`, skipping nothing.
    ///
    /// This is the bulk path used for vocabulary coverage audits; the same
    /// fatal label errors apply as on the per-sample path.
    pub fn label_texts(&self) -> DatasetResult<Vec<String>> {
        (1..=self.reader.num_samples())
            .map(|id| self.label_text(id))
            .collect()
    }

    fn fetch_from(&self, start: RecordId) -> DatasetResult<Sample> {
        let last = (start + self.max_skip).min(self.reader.num_samples());
        let mut id = start;
        loop {
            let bytes = self.reader.image_bytes(id)?;
            match decode_rgb(&bytes) {
                Ok(image) => {
                    let text = self.label_text(id)?;
                    return Ok(Sample {
                        record_id: id,
                        image,
                        text,
                    });
                }
                Err(source) => {
                    warn!(record_id = id, error = %source, "corrupted image, trying next record");
                    if id >= last {
                        return Err(DatasetError::ImageDecode {
                            record_id: start,
                            attempts: id - start + 1,
                            source,
                        });
                    }
                    id += 1;
                }
            }
        }
    }

    fn label_text(&self, id: RecordId) -> DatasetResult<String> {
        let bytes = self.reader.label_bytes(id)?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|source| DatasetError::LabelNotUtf8 {
                record_id: id,
                source,
            })?;
        if text.is_empty() {
            return Err(DatasetError::EmptyLabel { record_id: id });
        }
        Ok(text.to_string())
    }
}
