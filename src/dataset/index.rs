//! Sample index: mapping logical dataset positions to record ids.
//!
//! Logical positions are 0-based; stored record ids are 1-based. A plain
//! view exposes the whole store up to an advisory cap. A split view reserves
//! the first `validation_reserved` ids (1..=1000 under the v1 layout) for
//! validation and the remainder for training.

use crate::core::constants::KeyLayout;
use crate::core::errors::{DatasetError, DatasetResult};
use crate::store::layout::RecordId;

/// Which slice of the store a dataset exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetView {
    /// The whole store, capped at `cap` samples.
    Plain {
        /// Advisory upper bound on the number of exposed samples.
        cap: u64,
    },
    /// The training slice of a split store: everything after the reserved
    /// validation block.
    Train,
    /// The validation slice of a split store: the reserved leading block,
    /// fixed-length regardless of any cap.
    Validation,
}

/// Resolved view arithmetic: an effective length and an id offset.
#[derive(Debug, Clone, Copy)]
pub struct SampleIndex {
    len: u64,
    base: u64,
}

impl SampleIndex {
    /// Computes the index for a view over a store of `num_samples` records.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::RecordCount`] for a split view over a store
    /// smaller than the validation reservation. An undersized store cannot
    /// honor the split contract, so construction fails instead of exposing
    /// an underflowed or empty slice.
    pub fn new(view: DatasetView, num_samples: u64, layout: &KeyLayout) -> DatasetResult<Self> {
        let reserved = layout.validation_reserved;
        match view {
            DatasetView::Plain { cap } => Ok(Self {
                len: cap.min(num_samples),
                base: 0,
            }),
            DatasetView::Train => {
                if num_samples < reserved {
                    return Err(Self::undersized(num_samples, reserved));
                }
                Ok(Self {
                    len: num_samples - reserved,
                    base: reserved,
                })
            }
            DatasetView::Validation => {
                if num_samples < reserved {
                    return Err(Self::undersized(num_samples, reserved));
                }
                Ok(Self {
                    len: reserved,
                    base: 0,
                })
            }
        }
    }

    fn undersized(num_samples: u64, reserved: u64) -> DatasetError {
        DatasetError::record_count(format!(
            "{num_samples} records cannot honor a split reserving {reserved} for validation"
        ))
    }

    /// Number of logical samples in the view.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True when the view contains no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolves a logical position to its physical record id.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::PositionOutOfRange`] for positions at or past
    /// the view length; ids never wrap into a neighboring slice.
    pub fn record_id(&self, position: u64) -> DatasetResult<RecordId> {
        if position >= self.len {
            return Err(DatasetError::PositionOutOfRange {
                position,
                len: self.len,
            });
        }
        Ok(self.base + position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> KeyLayout {
        KeyLayout::default()
    }

    #[test]
    fn test_plain_view_caps_length() {
        let index = SampleIndex::new(DatasetView::Plain { cap: 100 }, 200, &layout()).unwrap();
        assert_eq!(index.len(), 100);

        let index = SampleIndex::new(DatasetView::Plain { cap: 500 }, 200, &layout()).unwrap();
        assert_eq!(index.len(), 200);
    }

    #[test]
    fn test_plain_view_ids_are_one_based() {
        let index = SampleIndex::new(DatasetView::Plain { cap: 10 }, 10, &layout()).unwrap();
        assert_eq!(index.record_id(0).unwrap(), 1);
        assert_eq!(index.record_id(9).unwrap(), 10);
    }

    #[test]
    fn test_train_view_skips_validation_block() {
        let index = SampleIndex::new(DatasetView::Train, 5000, &layout()).unwrap();
        assert_eq!(index.len(), 4000);
        assert_eq!(index.record_id(0).unwrap(), 1001);
        assert_eq!(index.record_id(3999).unwrap(), 5000);
    }

    #[test]
    fn test_validation_view_is_fixed_length() {
        let index = SampleIndex::new(DatasetView::Validation, 5000, &layout()).unwrap();
        assert_eq!(index.len(), 1000);
        assert_eq!(index.record_id(0).unwrap(), 1);
        assert_eq!(index.record_id(999).unwrap(), 1000);
    }

    #[test]
    fn test_split_over_undersized_store_fails() {
        assert!(SampleIndex::new(DatasetView::Train, 500, &layout()).is_err());
        assert!(SampleIndex::new(DatasetView::Validation, 500, &layout()).is_err());
    }

    #[test]
    fn test_position_past_length_is_an_error() {
        let index = SampleIndex::new(DatasetView::Validation, 5000, &layout()).unwrap();
        assert!(matches!(
            index.record_id(1000),
            Err(DatasetError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_alternate_reservation_size() {
        let layout = KeyLayout {
            validation_reserved: 10,
            ..Default::default()
        };
        let index = SampleIndex::new(DatasetView::Train, 25, &layout).unwrap();
        assert_eq!(index.len(), 15);
        assert_eq!(index.record_id(0).unwrap(), 11);
    }
}
