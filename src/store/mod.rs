//! The persisted key-value store: key layout and read-only access.

pub mod layout;
pub mod reader;

pub use layout::{image_key, label_key, parse_num_samples, RecordId, NUM_SAMPLES_KEY};
pub use reader::StoreReader;
