//! Constants and the versioned key layout of the persisted store.
//!
//! The store format is a flat key-value layout: a `num-samples` counter plus
//! one `image-<id>` and one `label-<id>` entry per record, where `<id>` is a
//! 1-based, zero-padded decimal. All of those literals live here as a
//! versioned [`KeyLayout`] value so that alternate key widths or validation
//! reservation sizes are a configuration change, not a code change.

use serde::{Deserialize, Serialize};

/// Current version of the persisted key layout.
pub const KEY_LAYOUT_VERSION: u32 = 1;

/// Number of decimal digits in a zero-padded record key (`image-%09d`).
pub const DEFAULT_KEY_WIDTH: usize = 9;

/// Number of leading record ids reserved for the validation split.
pub const DEFAULT_VALIDATION_RESERVED: u64 = 1000;

/// Default bound on consecutive corrupt records a single read may skip.
pub const DEFAULT_MAX_SKIP: u64 = 16;

/// Default bound on open store file handles for a reader.
pub const DEFAULT_MAX_OPEN_FILES: i32 = 32;

/// Versioned description of the store key layout.
///
/// A layout value is attached to every store reader and sample index; key
/// formatting and split arithmetic never use inline literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLayout {
    /// Layout version this instance describes.
    pub version: u32,
    /// Decimal digits in a zero-padded record id.
    pub key_width: usize,
    /// Leading record ids reserved for the validation split.
    pub validation_reserved: u64,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self {
            version: KEY_LAYOUT_VERSION,
            key_width: DEFAULT_KEY_WIDTH,
            validation_reserved: DEFAULT_VALIDATION_RESERVED,
        }
    }
}
