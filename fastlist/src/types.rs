/// Stable handle to a materialized slot in the recycling pool.
///
/// Slots are never destroyed while the list is alive, so a `SlotId` stays valid for the lifetime
/// of the [`crate::FastList`] that handed it out. Hosts use it to map a slot to their own visual
/// element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Presentation state of a slot.
///
/// The rendering boundary translates these into visuals (opacity, elevation, transitions).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotState {
    #[default]
    Idle,
    /// Bound and positioned, but its content is still being populated.
    Unpopulated,
    /// Content arrived; fading into view.
    Revealing,
    /// Freshly inserted at the top; hidden until revealed.
    New,
    /// Dragged by an active reorder gesture.
    Lifted,
    /// Shifted aside to make room for the dragged slot.
    Displaced,
    /// Animating to its final reorder position.
    Settling,
    /// Bound to an index past the end of the data after a reload.
    Hidden,
}

impl SlotState {
    /// Slots in these states are positioned by the reorder gesture, not by the renderer.
    pub fn is_pinned(self) -> bool {
        matches!(self, Self::Lifted | Self::Displaced | Self::Settling)
    }
}

/// List-level presentation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListMode {
    #[default]
    Normal,
    /// A drag or an insertion animation currently owns slot positions.
    Reordering,
    /// The host put the list in edit mode; selection is suppressed.
    Editing,
}

/// A single pointer reading, normalized by the host input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSample {
    pub x: i64,
    pub y: i64,
    pub id: u32,
    pub timestamp_ms: u64,
}

/// Something a scheduler phase can watch for a completion signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// The scrolling container.
    Container,
    Slot(SlotId),
}

/// Host signal that ends a transition or feedback phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    TransitionEnd,
}

/// Events delivered through the direct-attach path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectEvent {
    Scroll,
    PointerMove,
}

/// Signals emitted to the hosting application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListEvent {
    /// The scroll offset just transitioned to 0.
    TopReached,
    ItemSelected { index: usize, pointer: PointerSample },
    /// Content was inserted above the viewport without an animation.
    HiddenNewContent,
}

/// Result of the window calculation. All bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub critical_start: usize,
    pub critical_end: usize,
    pub start: usize,
    pub end: usize,
}

impl Window {
    /// Number of indices in the render window.
    pub fn index_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// A section header laid out by `update_sections`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionHeader<S> {
    pub section: S,
    pub ordinal: usize,
    /// Offset of the header from the top of the list.
    pub offset: u64,
    /// Header height plus the height of every item in the section.
    pub height: u64,
}

/// Outcome of one scroll tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTick {
    pub fast: bool,
    pub idle: bool,
    pub rendered: bool,
}

/// Counters collected during a render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderReport {
    pub window: Option<Window>,
    /// Slots newly bound to an index (fresh or recycled) and populated.
    pub bound: usize,
    /// Slots recycled away from an out-of-window index.
    pub recycled: usize,
    /// Bound slots repopulated in place by a forced reload.
    pub repopulated: usize,
    /// Slots whose population is still pending.
    pub pending: usize,
}
