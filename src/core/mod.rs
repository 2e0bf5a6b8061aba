//! Core building blocks of the dataset layer.
//!
//! This module contains:
//! - Versioned key-layout constants
//! - Configuration structures and validation
//! - The error taxonomy

pub mod config;
pub mod constants;
pub mod errors;

pub use config::{AlphabetConfig, DatasetConfig};
pub use constants::KeyLayout;
pub use errors::{DatasetError, DatasetResult};
