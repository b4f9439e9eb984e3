use alloc::vec::Vec;
use core::fmt;

use crate::{Completion, SectionHeader, SlotId};

/// Result of asking a [`Source`] to populate a slot.
#[derive(Clone, Debug)]
pub enum Population {
    /// The slot content was written synchronously.
    Ready,
    /// The content is on its way; the list retries `populate_item` once this resolves.
    Pending(Completion),
}

/// The backing collection adapter.
///
/// Positions and heights are in pixels along the scroll axis. `index_at_position` and
/// `position_for_index` must be mutual inverses over valid item start offsets, and
/// `remove_at_index` followed by `insert_at_index` must move an item without changing its
/// identity.
pub trait Source {
    type Section: Clone + PartialEq + fmt::Debug;
    type Item;

    fn full_length(&self) -> usize;
    fn full_height(&self) -> u64;
    fn item_height(&self) -> u32;
    fn section_header_height(&self) -> u32;
    /// Height of every item in `section`, excluding its header.
    fn full_section_height(&self, section: &Self::Section) -> u64;

    fn index_at_position(&self, position: u64) -> usize;
    fn position_for_index(&self, index: usize) -> u64;

    fn sections(&self) -> Vec<Self::Section>;
    fn section_for(&self, index: usize) -> Self::Section;

    /// Writes the content for `index` into the host element behind `slot`.
    fn populate_item(&mut self, slot: SlotId, index: usize) -> Population;
    fn populate_section(&mut self, header: &SectionHeader<Self::Section>);

    fn remove_at_index(&mut self, index: usize) -> Option<Self::Item>;
    fn insert_at_index(&mut self, index: usize, item: Self::Item, section: &Self::Section);

    /// Populates expensive detail (artwork, ...) once scrolling is idle.
    ///
    /// Returns `false` when nothing was populated, in which case the list asks again on a later
    /// idle render.
    fn populate_item_detail(&mut self, _slot: SlotId, _index: usize) -> bool {
        false
    }

    /// Releases detail before the slot is recycled to another index.
    fn unpopulate_item_detail(&mut self, _slot: SlotId) {}

    fn initial_scroll_top(&self) -> Option<u64> {
        None
    }
}
