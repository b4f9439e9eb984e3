use crate::SlotId;

pub type Result<T, E = ListError> = core::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The pool is saturated and nothing outside the render window can be reclaimed.
    ///
    /// This means the render-ahead budget exceeds the pool budget. The render pass stops at
    /// `index` instead of drawing a corrupted window.
    #[error(
        "missing a slot for index {index}: pool of {pool_size} is saturated (max {max_item_count}) and nothing is recyclable"
    )]
    MissingSlot {
        index: usize,
        pool_size: usize,
        max_item_count: usize,
    },

    /// Only insertions at index 0 are supported.
    #[error("insertion at index {index} is not supported (only index 0)")]
    UnsupportedInsertion { index: usize },

    #[error("unknown slot {slot:?}")]
    SlotOutOfRange { slot: SlotId },
}
