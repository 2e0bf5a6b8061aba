//! # OCR Dataset
//!
//! A Rust data-loading layer for CTC-based text recognition training.
//! Reads (image, transcription) records out of a read-only key-value store
//! and converts between transcriptions and integer class sequences.
//!
//! ## Features
//!
//! - Read-only record store with a versioned `image-%09d` / `label-%09d` /
//!   `num-samples` key layout
//! - Plain and train/validation split dataset views
//! - Bounded skip-ahead recovery over corrupt image records
//! - CTC label codec: encoding with out-of-vocabulary substitution,
//!   collapse decoding of class-index sequences
//! - Resize-and-normalize transform producing `[-1, 1]` CHW tensors
//!
//! ## Modules
//!
//! * [`core`] - Key-layout constants, configuration, and error handling
//! * [`store`] - Key formatting and read-only store access
//! * [`dataset`] - Sample index arithmetic and pull-based sample reads
//! * [`codec`] - The string/class-index label codec
//! * [`processors`] - Image transforms for decoded samples
//! * [`utils`] - Image byte decoding helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ocr_dataset::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DatasetConfig::default();
//! let dataset = OcrDataset::open(
//!     Path::new("data/recognition/train"),
//!     DatasetView::Train,
//!     &config,
//! )?
//! .with_transform(ResizeNormalize::new(100, 32));
//!
//! let codec = LabelCodec::from_config(&AlphabetConfig {
//!     alphabet: "0123456789abcdefghijklmnopqrstuvwxyz".to_string(),
//! })?;
//!
//! let sample = dataset.get(0)?;
//! let (flat, lengths) = codec.encode(&[sample.text.as_str()]);
//! let texts = codec.decode(&flat, &lengths)?;
//! println!("{} -> {:?}", sample.record_id, texts);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod core;
pub mod dataset;
pub mod processors;
pub mod store;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use ocr_dataset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::codec::{LabelCodec, BLANK_INDEX};
    pub use crate::core::{AlphabetConfig, DatasetConfig, DatasetError, DatasetResult, KeyLayout};
    pub use crate::dataset::{DatasetView, OcrDataset, Sample};
    pub use crate::processors::ResizeNormalize;
    pub use crate::store::StoreReader;
}
