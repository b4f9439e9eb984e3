use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use fastlist::{Population, SectionHeader, SlotId, Source};

type PopulateFn<T> = Box<dyn FnMut(SlotId, usize, &T) -> Population>;

#[derive(Clone, Debug, PartialEq)]
struct Group<T, S> {
    section: S,
    items: Vec<T>,
}

/// In-memory, sectioned, fixed-height [`Source`].
///
/// Every section starts with a header of `header_height` pixels followed by its items.
/// Content is written by a `populate` callback that receives the slot, the index and the item.
pub struct GroupedSource<T, S> {
    groups: Vec<Group<T, S>>,
    item_height: u32,
    header_height: u32,
    populate: PopulateFn<T>,
    headers: Vec<SectionHeader<S>>,
    initial_scroll_top: Option<u64>,
}

impl<T, S: Clone + PartialEq + fmt::Debug + Default> GroupedSource<T, S> {
    pub fn new(
        item_height: u32,
        header_height: u32,
        populate: impl FnMut(SlotId, usize, &T) -> Population + 'static,
    ) -> Self {
        Self {
            groups: Vec::new(),
            item_height,
            header_height,
            populate: Box::new(populate),
            headers: Vec::new(),
            initial_scroll_top: None,
        }
    }

    pub fn with_initial_scroll_top(mut self, initial_scroll_top: Option<u64>) -> Self {
        self.initial_scroll_top = initial_scroll_top;
        self
    }

    /// Appends a section.
    pub fn push_section(&mut self, section: S, items: impl IntoIterator<Item = T>) {
        self.groups.push(Group {
            section,
            items: items.into_iter().collect(),
        });
    }

    /// Inserts `item` at index 0, at the front of the first section.
    ///
    /// Tell the list with `inserted_at_index(0)` afterwards.
    pub fn push_front(&mut self, item: T) {
        match self.groups.first_mut() {
            Some(group) => group.items.insert(0, item),
            None => self.push_section(S::default(), [item]),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        let (group, local) = self.locate(index)?;
        self.groups[group].items.get(local)
    }

    /// Items in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    /// Section headers as last laid out by the list.
    pub fn headers(&self) -> &[SectionHeader<S>] {
        &self.headers
    }

    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut first = 0usize;
        for (i, group) in self.groups.iter().enumerate() {
            if index < first + group.items.len() {
                return Some((i, index - first));
            }
            first += group.items.len();
        }
        None
    }

    fn group_height(&self, group: &Group<T, S>) -> u64 {
        self.header_height as u64 + group.items.len() as u64 * self.item_height as u64
    }
}

impl<T, S: Clone + PartialEq + fmt::Debug + Default> Source for GroupedSource<T, S> {
    type Section = S;
    type Item = T;

    fn full_length(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    fn full_height(&self) -> u64 {
        self.groups.iter().map(|group| self.group_height(group)).sum()
    }

    fn item_height(&self) -> u32 {
        self.item_height
    }

    fn section_header_height(&self) -> u32 {
        self.header_height
    }

    fn full_section_height(&self, section: &S) -> u64 {
        self.groups
            .iter()
            .find(|group| group.section == *section)
            .map_or(0, |group| group.items.len() as u64 * self.item_height as u64)
    }

    fn index_at_position(&self, position: u64) -> usize {
        let item_height = self.item_height.max(1) as u64;
        let mut offset = 0u64;
        let mut first = 0usize;
        for group in &self.groups {
            let items_top = offset + self.header_height as u64;
            let bottom = offset + self.group_height(group);
            if !group.items.is_empty() && position < bottom {
                let local = position.saturating_sub(items_top) / item_height;
                return first + local as usize;
            }
            offset = bottom;
            first += group.items.len();
        }
        first.saturating_sub(1)
    }

    fn position_for_index(&self, index: usize) -> u64 {
        let mut offset = 0u64;
        let mut first = 0usize;
        for group in &self.groups {
            if index < first + group.items.len() {
                let local = (index - first) as u64;
                return offset + self.header_height as u64 + local * self.item_height as u64;
            }
            offset += self.group_height(group);
            first += group.items.len();
        }
        offset
    }

    fn sections(&self) -> Vec<S> {
        self.groups.iter().map(|group| group.section.clone()).collect()
    }

    fn section_for(&self, index: usize) -> S {
        self.locate(index)
            .map(|(group, _)| self.groups[group].section.clone())
            .or_else(|| self.groups.last().map(|group| group.section.clone()))
            .unwrap_or_default()
    }

    fn populate_item(&mut self, slot: SlotId, index: usize) -> Population {
        let Some((group, local)) = self.locate(index) else {
            return Population::Ready;
        };
        let item = &self.groups[group].items[local];
        (self.populate)(slot, index, item)
    }

    fn populate_section(&mut self, header: &SectionHeader<S>) {
        if header.ordinal == 0 {
            self.headers.clear();
        }
        self.headers.push(header.clone());
    }

    fn remove_at_index(&mut self, index: usize) -> Option<T> {
        let (group, local) = self.locate(index)?;
        Some(self.groups[group].items.remove(local))
    }

    fn insert_at_index(&mut self, index: usize, item: T, section: &S) {
        let mut first = 0usize;
        for group in &mut self.groups {
            if group.section == *section {
                let local = index.saturating_sub(first).min(group.items.len());
                group.items.insert(local, item);
                return;
            }
            first += group.items.len();
        }
        self.push_section(section.clone(), [item]);
    }

    fn initial_scroll_top(&self) -> Option<u64> {
        self.initial_scroll_top
    }
}

impl<T: fmt::Debug, S: fmt::Debug> fmt::Debug for GroupedSource<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedSource")
            .field("groups", &self.groups)
            .field("item_height", &self.item_height)
            .field("header_height", &self.header_height)
            .field("initial_scroll_top", &self.initial_scroll_top)
            .finish_non_exhaustive()
    }
}
