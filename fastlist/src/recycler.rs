use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{ListError, Result, SlotId, SlotState};

/// One materialized visual unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot<S> {
    pub(crate) index: Option<usize>,
    pub(crate) position: u64,
    pub(crate) tweak_delta: i64,
    pub(crate) populated: bool,
    pub(crate) detail_populated: bool,
    pub(crate) placed: bool,
    pub(crate) section: Option<S>,
    pub(crate) state: SlotState,
}

impl<S> Slot<S> {
    fn new() -> Self {
        Self {
            index: None,
            position: 0,
            tweak_delta: 0,
            populated: false,
            detail_populated: false,
            placed: false,
            section: None,
            state: SlotState::Idle,
        }
    }

    /// The logical index this slot is bound to.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Canonical offset of the bound index, without any reorder tweak.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Temporary reorder offset; zero when idle.
    pub fn tweak_delta(&self) -> i64 {
        self.tweak_delta
    }

    /// Offset the host should render the slot at.
    pub fn offset(&self) -> i64 {
        self.position as i64 + self.tweak_delta
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn is_detail_populated(&self) -> bool {
        self.detail_populated
    }

    pub fn section(&self) -> Option<&S> {
        self.section.as_ref()
    }

    pub fn state(&self) -> SlotState {
        self.state
    }
}

/// How [`SlotPool::find_item_for`] obtained a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// A brand new slot was materialized.
    Fresh(SlotId),
    /// An out-of-window slot was rebound; `previous` is the index it left.
    Recycled { slot: SlotId, previous: usize },
}

impl Claim {
    pub fn slot(self) -> SlotId {
        match self {
            Self::Fresh(slot) | Self::Recycled { slot, .. } => slot,
        }
    }
}

/// Picks the bound indices that may be reclaimed for a render window `[start, end]`.
///
/// Indices are sorted by ascending distance from `pivot`, so the one furthest from where new
/// content is needed sits at the end, ready to be popped first.
pub fn recycle(
    bound: impl IntoIterator<Item = usize>,
    start: usize,
    end: usize,
    pivot: usize,
) -> Vec<usize> {
    let mut recyclable: Vec<usize> = bound
        .into_iter()
        .filter(|&i| i < start || i > end)
        .collect();
    recyclable.sort_by_key(|&i| (i.abs_diff(pivot), i));
    recyclable
}

/// Where `index` lands after the item at `from` moved to `to`.
pub(crate) fn moved_index(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < to && index > from && index <= to {
        index - 1
    } else if to < from && index >= to && index < from {
        index + 1
    } else {
        index
    }
}

/// The bounded slot pool plus the sparse index -> slot map.
///
/// A slot is bound to at most one index, and every bound index maps back to its slot.
#[derive(Clone, Debug)]
pub struct SlotPool<S> {
    slots: Vec<Slot<S>>,
    items: BTreeMap<usize, SlotId>,
}

impl<S> Default for SlotPool<S> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            items: BTreeMap::new(),
        }
    }
}

impl<S> SlotPool<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: SlotId) -> Option<&Slot<S>> {
        self.slots.get(slot.0)
    }

    pub(crate) fn get_mut(&mut self, slot: SlotId) -> Option<&mut Slot<S>> {
        self.slots.get_mut(slot.0)
    }

    pub(crate) fn try_get(&self, slot: SlotId) -> Result<&Slot<S>> {
        self.slots
            .get(slot.0)
            .ok_or(ListError::SlotOutOfRange { slot })
    }

    /// Looks up a slot minted by this pool.
    pub(crate) fn entry(&self, slot: SlotId) -> &Slot<S> {
        &self.slots[slot.0]
    }

    pub(crate) fn entry_mut(&mut self, slot: SlotId) -> &mut Slot<S> {
        &mut self.slots[slot.0]
    }

    pub fn slot_for(&self, index: usize) -> Option<SlotId> {
        self.items.get(&index).copied()
    }

    /// Bound `(index, slot)` pairs in ascending index order.
    pub fn bound(&self) -> impl Iterator<Item = (usize, SlotId)> + '_ {
        self.items.iter().map(|(&index, &slot)| (index, slot))
    }

    pub fn bound_count(&self) -> usize {
        self.items.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &Slot<S>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (SlotId(i), slot))
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut Slot<S>)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| (SlotId(i), slot))
    }

    /// Like [`recycle`], but never offers slots owned by an active reorder gesture.
    pub fn recyclable(&self, start: usize, end: usize, pivot: usize) -> Vec<usize> {
        let bound = self
            .items
            .iter()
            .filter(|(_, slot)| !self.slots[slot.0].state.is_pinned())
            .map(|(&index, _)| index);
        recycle(bound, start, end, pivot)
    }

    /// Slots owned by a reorder gesture whose index lies outside `[start, end]`.
    ///
    /// They stay bound where they are, so a render window must leave room for them.
    pub(crate) fn pinned_outside(&self, start: usize, end: usize) -> usize {
        self.items
            .iter()
            .filter(|&(&index, slot)| {
                (index < start || index > end) && self.slots[slot.0].state.is_pinned()
            })
            .count()
    }

    /// Binds a slot to `index`, reclaiming the furthest recyclable one first and materializing
    /// a new one while the pool is below `max_item_count`.
    ///
    /// Running out of both is an invariant violation: the render window asked for more slots
    /// than the budget allows.
    pub fn find_item_for(
        &mut self,
        index: usize,
        recyclable: &mut Vec<usize>,
        max_item_count: usize,
    ) -> Result<Claim> {
        let claim = if let Some(previous) = recyclable.pop() {
            let Some(slot) = self.items.remove(&previous) else {
                return self.find_item_for(index, recyclable, max_item_count);
            };
            vtrace!(index, previous, "recycling slot");
            Claim::Recycled { slot, previous }
        } else if self.slots.len() < max_item_count {
            self.slots.push(Slot::new());
            Claim::Fresh(SlotId(self.slots.len() - 1))
        } else {
            verror!(
                index,
                pool_size = self.slots.len(),
                max_item_count,
                "missing a slot"
            );
            return Err(ListError::MissingSlot {
                index,
                pool_size: self.slots.len(),
                max_item_count,
            });
        };

        let slot = claim.slot();
        self.items.insert(index, slot);
        let entry = &mut self.slots[slot.0];
        entry.index = Some(index);
        entry.placed = false;
        Ok(claim)
    }

    /// Makes room for an insertion at `from`: every bound index at or after it moves down by one.
    pub(crate) fn shift_from(&mut self, from: usize) {
        let items = core::mem::take(&mut self.items);
        for (index, slot) in items {
            let next = if index >= from { index + 1 } else { index };
            self.rebind(slot, next);
        }
    }

    /// Applies the permutation of moving the item at `from` to `to`, so bound slots keep
    /// showing the same logical items.
    pub(crate) fn apply_move(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let items = core::mem::take(&mut self.items);
        for (index, slot) in items {
            self.rebind(slot, moved_index(index, from, to));
        }
    }

    fn rebind(&mut self, slot: SlotId, index: usize) {
        self.items.insert(index, slot);
        let entry = &mut self.slots[slot.0];
        if entry.index != Some(index) {
            entry.index = Some(index);
            entry.placed = false;
        }
    }

    /// Unbinds every slot. Slots stay materialized.
    pub(crate) fn unbind_all(&mut self) {
        self.items.clear();
        for slot in &mut self.slots {
            slot.index = None;
            slot.populated = false;
            slot.detail_populated = false;
            slot.placed = false;
            slot.tweak_delta = 0;
            slot.state = SlotState::Idle;
        }
    }
}
