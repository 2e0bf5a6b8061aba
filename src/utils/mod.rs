//! Utility functions shared across the crate.

pub mod image;

pub use self::image::decode_rgb;
