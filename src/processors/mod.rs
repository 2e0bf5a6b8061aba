//! Image processing transforms applied to decoded samples.

pub mod normalization;

pub use normalization::ResizeNormalize;
