use fastlist::{
    DirectEvent, FastList, ListOptions, PointerSample, RenderReport, Result, ScrollTick, Signal,
    Source, Target,
};

use crate::FrameScheduler;

/// A framework-neutral controller that wraps a [`FastList`] driven by a [`FrameScheduler`] and
/// owns the list's timers.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` once the container has a size
/// - `on_scroll` / `on_resize` / `on_pointer_move` when UI events occur
/// - `on_signal` when a watched element finishes a transition
/// - `tick(now_ms)` each frame (timers, frame-coalesced completions, pending work)
#[derive(Debug)]
pub struct Controller<Src: Source> {
    list: FastList<Src, FrameScheduler>,
    phase2_at: Option<u64>,
    scroll_stop_at: Option<u64>,
}

impl<Src: Source> Controller<Src> {
    pub fn new(source: Src, options: ListOptions) -> Self {
        let scheduler = FrameScheduler::from_options(&options);
        Self::from_list(FastList::new(source, scheduler, options))
    }

    pub fn from_list(list: FastList<Src, FrameScheduler>) -> Self {
        Self {
            list,
            phase2_at: None,
            scroll_stop_at: None,
        }
    }

    pub fn list(&self) -> &FastList<Src, FrameScheduler> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut FastList<Src, FrameScheduler> {
        &mut self.list
    }

    pub fn into_list(self) -> FastList<Src, FrameScheduler> {
        self.list
    }

    /// Renders the visible range now and schedules the full render after
    /// `setup_phase2_delay_ms`.
    pub fn mount(&mut self, viewport_height: u32, now_ms: u64) -> Result<RenderReport> {
        self.list.scheduler_mut().frame(now_ms);
        let report = self.list.setup_phase1(viewport_height)?;
        self.phase2_at = Some(now_ms.saturating_add(self.list.options().setup_phase2_delay_ms));
        Ok(report)
    }

    /// `true` until the delayed second setup phase has run.
    pub fn is_setting_up(&self) -> bool {
        self.phase2_at.is_some()
    }

    /// Call this when the UI reports a scroll offset change.
    ///
    /// When the tick leaves scrolling non-idle, a scroll-stop timer is armed so the window does
    /// not stay partially rendered if scrolling comes to a hard stop.
    pub fn on_scroll(&mut self, position: u64, now_ms: u64) -> Result<ScrollTick> {
        self.scroll_stop_at = None;
        let tick = self.list.on_scroll(position)?;
        if !tick.idle {
            self.scroll_stop_at =
                Some(now_ms.saturating_add(self.list.options().scroll_stop_delay_ms));
        }
        Ok(tick)
    }

    pub fn on_resize(&mut self, viewport_height: u32) -> Result<RenderReport> {
        self.list.on_resize(viewport_height)
    }

    /// Forwards pointer samples to an active reorder gesture.
    ///
    /// Samples are dropped unless the list is listening for pointer moves.
    pub fn on_pointer_move(&mut self, samples: &[PointerSample]) -> bool {
        if !self
            .list
            .scheduler()
            .is_attached(Target::Container, DirectEvent::PointerMove)
        {
            return false;
        }
        self.list.on_reorder_move(samples)
    }

    /// Call this when `target` reports `signal` (e.g. a transition ended).
    ///
    /// Returns how many completions the signal resolved.
    pub fn on_signal(&mut self, target: Target, signal: Signal) -> Result<usize> {
        let resolved = self.list.scheduler_mut().signal(target, signal);
        if resolved > 0 {
            self.list.poll()?;
        }
        Ok(resolved)
    }

    /// Advances the controller by one frame.
    pub fn tick(&mut self, now_ms: u64) -> Result<()> {
        self.list.scheduler_mut().frame(now_ms);

        if self.phase2_at.is_some_and(|at| now_ms >= at) {
            self.phase2_at = None;
            self.list.setup_phase2()?;
        }

        if self.scroll_stop_at.is_some_and(|at| now_ms >= at) {
            self.scroll_stop_at = None;
            let top = self.list.scroll_top();
            self.list.scroll_instantly(top)?;
        }

        self.list.poll()
    }

    /// Tears the list down and cancels every timer.
    pub fn destroy(&mut self) {
        self.phase2_at = None;
        self.scroll_stop_at = None;
        self.list.destroy();
    }
}
