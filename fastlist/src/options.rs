/// Configuration for [`crate::FastList`].
///
/// The defaults match a phone-sized list: a render budget of three and a half screens, fast
/// scrolling above two viewports per tick, and idle scrolling below a sixteenth of a viewport.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Screens worth of slots the pool may materialize.
    pub prerender_multiplier: f32,

    /// Overrides the computed slot budget.
    ///
    /// Never applied below the number of slots already materialized.
    pub max_item_count: Option<usize>,

    /// Enter fast scrolling when a tick moves more than this many viewports.
    pub fast_enter_ratio: f32,
    /// Leave fast scrolling when a tick moves less than this many viewports.
    pub fast_exit_ratio: f32,

    /// Become idle when a tick moves less than this many viewports.
    pub idle_enter_ratio: f32,
    /// Stop being idle when a tick moves more than this many viewports.
    pub idle_exit_ratio: f32,

    /// Delay after the last non-idle scroll tick before an instant re-render (adapter-driven).
    pub scroll_stop_delay_ms: u64,

    /// Fallback used by frame schedulers when a completion signal never arrives.
    pub transition_timeout_ms: u64,

    /// Delay between the critical-only first render and the full render (adapter-driven).
    pub setup_phase2_delay_ms: u64,

    /// Scroll offset applied before the first render.
    ///
    /// Falls back to [`crate::Source::initial_scroll_top`] when unset.
    pub initial_scroll_top: Option<u64>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self {
            prerender_multiplier: 3.5,
            max_item_count: None,
            fast_enter_ratio: 2.0,
            fast_exit_ratio: 0.5,
            idle_enter_ratio: 1.0 / 16.0,
            idle_exit_ratio: 0.25,
            scroll_stop_delay_ms: 200,
            transition_timeout_ms: 500,
            setup_phase2_delay_ms: 360,
            initial_scroll_top: None,
        }
    }

    pub fn with_prerender_multiplier(mut self, multiplier: f32) -> Self {
        self.prerender_multiplier = multiplier;
        self
    }

    pub fn with_max_item_count(mut self, max_item_count: Option<usize>) -> Self {
        self.max_item_count = max_item_count;
        self
    }

    pub fn with_fast_thresholds(mut self, enter_ratio: f32, exit_ratio: f32) -> Self {
        self.fast_enter_ratio = enter_ratio;
        self.fast_exit_ratio = exit_ratio;
        self
    }

    pub fn with_idle_thresholds(mut self, enter_ratio: f32, exit_ratio: f32) -> Self {
        self.idle_enter_ratio = enter_ratio;
        self.idle_exit_ratio = exit_ratio;
        self
    }

    pub fn with_scroll_stop_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_stop_delay_ms = delay_ms;
        self
    }

    pub fn with_transition_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.transition_timeout_ms = timeout_ms;
        self
    }

    pub fn with_setup_phase2_delay_ms(mut self, delay_ms: u64) -> Self {
        self.setup_phase2_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_scroll_top(mut self, initial_scroll_top: Option<u64>) -> Self {
        self.initial_scroll_top = initial_scroll_top;
        self
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("prerender_multiplier", &self.prerender_multiplier)
            .field("max_item_count", &self.max_item_count)
            .field("fast_enter_ratio", &self.fast_enter_ratio)
            .field("fast_exit_ratio", &self.fast_exit_ratio)
            .field("idle_enter_ratio", &self.idle_enter_ratio)
            .field("idle_exit_ratio", &self.idle_exit_ratio)
            .field("scroll_stop_delay_ms", &self.scroll_stop_delay_ms)
            .field("transition_timeout_ms", &self.transition_timeout_ms)
            .field("setup_phase2_delay_ms", &self.setup_phase2_delay_ms)
            .finish_non_exhaustive()
    }
}
