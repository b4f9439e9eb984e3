use crate::ListOptions;

/// Viewport and scroll geometry shared by the renderer, the scroll controller and reordering.
///
/// Only `viewport_height` changes after construction (on resize); the rest is updated on every
/// scroll tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub viewport_height: u32,
    pub item_height: u32,
    pub header_height: u32,
    /// Last observed scroll offset.
    pub top_position: u64,
    /// `true` if the last non-zero movement went toward higher indices.
    pub forward: bool,
    /// Hard cap on simultaneously materialized slots.
    pub max_item_count: usize,
    /// Half a viewport worth of items, kept behind the direction of travel.
    pub switch_window: usize,
    /// Fast scrolling: rendering is skipped while set.
    pub fast: bool,
    /// Slow or stopped scrolling: detail population is allowed while set.
    pub idle: bool,
    pub(crate) has_scrolled: bool,
}

impl Geometry {
    pub fn new(item_height: u32, header_height: u32) -> Self {
        Self {
            viewport_height: 0,
            item_height,
            header_height,
            top_position: 0,
            forward: true,
            max_item_count: 0,
            switch_window: 0,
            fast: false,
            idle: true,
            has_scrolled: false,
        }
    }

    /// Recomputes the viewport-derived values.
    ///
    /// `materialized` is the current pool size: slots are never destroyed, so the budget never
    /// drops below it.
    pub fn update_container(
        &mut self,
        viewport_height: u32,
        options: &ListOptions,
        materialized: usize,
    ) {
        let item_height = self.item_height.max(1);
        let per_screen = viewport_height as f32 / item_height as f32;

        self.viewport_height = viewport_height;
        let computed = options
            .max_item_count
            .unwrap_or((per_screen * options.prerender_multiplier) as usize);
        self.max_item_count = computed.max(materialized);
        self.switch_window = (per_screen / 2.0) as usize;

        vdebug!(
            viewport_height,
            max_item_count = self.max_item_count,
            switch_window = self.switch_window,
            "update_container"
        );
    }

    /// Offset of the bottom edge of the viewport.
    pub fn bottom_position(&self) -> u64 {
        self.top_position
            .saturating_add(self.viewport_height as u64)
    }
}
