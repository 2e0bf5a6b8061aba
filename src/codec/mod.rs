//! String/class-index codecs for sequence losses.

pub mod label;

pub use label::{LabelCodec, BLANK_INDEX};
