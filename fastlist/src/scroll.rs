use crate::{Geometry, ListOptions};

/// What a single scroll reading changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScrollReading {
    pub top_reached: bool,
}

impl Geometry {
    /// Folds a new scroll offset into the geometry.
    ///
    /// Updates direction, fast and idle classification, and reports the edge-triggered
    /// "top reached" transition. `instant` forces a full stop (not fast, idle), as do both ends
    /// of the scrollable range.
    pub(crate) fn process_scroll_position(
        &mut self,
        position: u64,
        full_height: u64,
        instant: bool,
        options: &ListOptions,
    ) -> ScrollReading {
        // The first reading carries no movement.
        if !self.has_scrolled {
            self.top_position = position;
            self.has_scrolled = true;
        }

        let previous_top = self.top_position;
        let delta = position as i64 - previous_top as i64;

        self.forward = is_forward(self.forward, delta);
        self.top_position = position;

        let on_top = position == 0;
        let top_reached = on_top && previous_top != 0;
        let max_scroll_top = full_height.saturating_sub(self.viewport_height as u64);
        let at_bottom = position == max_scroll_top;

        if on_top || at_bottom || instant {
            self.fast = false;
            self.idle = true;
            return ScrollReading { top_reached };
        }

        let moved = delta.unsigned_abs();
        let viewport = self.viewport_height;
        self.fast = is_fast(
            self.fast,
            moved,
            viewport,
            options.fast_enter_ratio,
            options.fast_exit_ratio,
        );
        self.idle = is_idle(
            self.idle,
            moved,
            viewport,
            options.idle_enter_ratio,
            options.idle_exit_ratio,
        );

        vtrace!(
            position,
            delta,
            fast = self.fast,
            idle = self.idle,
            "process_scroll_position"
        );

        ScrollReading { top_reached }
    }
}

/// Keeps the previous direction when the position did not move.
pub fn is_forward(was_forward: bool, delta: i64) -> bool {
    if delta == 0 {
        was_forward
    } else {
        delta > 0
    }
}

/// Fast-scroll hysteresis.
///
/// Enters when a tick moves more than `enter_ratio` viewports, leaves when a (non-zero) tick
/// moves less than `exit_ratio` viewports, and otherwise keeps the previous value.
pub fn is_fast(was_fast: bool, moved: u64, viewport: u32, enter_ratio: f32, exit_ratio: f32) -> bool {
    let moved = moved as f64;
    let viewport = viewport as f64;
    if !was_fast && moved > viewport * enter_ratio as f64 {
        true
    } else if was_fast && moved > 0.0 && moved < viewport * exit_ratio as f64 {
        false
    } else {
        was_fast
    }
}

/// Idle hysteresis, the slow-scrolling mirror of [`is_fast`].
pub fn is_idle(was_idle: bool, moved: u64, viewport: u32, enter_ratio: f32, exit_ratio: f32) -> bool {
    let moved = moved as f64;
    let viewport = viewport as f64;
    if !was_idle && moved > 0.0 && moved < viewport * enter_ratio as f64 {
        true
    } else if was_idle && moved > viewport * exit_ratio as f64 {
        false
    } else {
        was_idle
    }
}
