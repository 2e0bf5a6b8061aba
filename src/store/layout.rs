//! Record id and key formatting for the persisted store layout.
//!
//! Stored ids are 1-based; keys embed them as zero-padded decimals
//! (`image-000000001`, `label-000000001`). The store-level record counter
//! lives under the fixed `num-samples` key as a decimal ASCII string.

use crate::core::constants::KeyLayout;
use crate::core::errors::{DatasetError, DatasetResult};

/// 1-based physical index of a stored sample.
pub type RecordId = u64;

/// Key of the store-level record counter.
pub const NUM_SAMPLES_KEY: &[u8] = b"num-samples";

const IMAGE_PREFIX: &str = "image";
const LABEL_PREFIX: &str = "label";

fn record_key(prefix: &str, layout: &KeyLayout, id: RecordId) -> String {
    format!("{prefix}-{id:0width$}", width = layout.key_width)
}

/// Formats the image key for a record id under the given layout.
pub fn image_key(layout: &KeyLayout, id: RecordId) -> String {
    record_key(IMAGE_PREFIX, layout, id)
}

/// Formats the label key for a record id under the given layout.
pub fn label_key(layout: &KeyLayout, id: RecordId) -> String {
    record_key(LABEL_PREFIX, layout, id)
}

/// Parses the `num-samples` value into a positive record count.
///
/// # Errors
///
/// Returns [`DatasetError::RecordCount`] when the bytes are not a decimal
/// ASCII string or parse to zero. Dataset construction treats this as fatal.
pub fn parse_num_samples(bytes: &[u8]) -> DatasetResult<u64> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| DatasetError::record_count(String::from_utf8_lossy(bytes)))?;
    let count: u64 = text
        .trim()
        .parse()
        .map_err(|_| DatasetError::record_count(text))?;
    if count == 0 {
        return Err(DatasetError::record_count("0"));
    }
    Ok(count)
}
