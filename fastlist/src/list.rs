use alloc::collections::VecDeque;
use alloc::collections::vec_deque;
use alloc::vec::Vec;

use crate::recycler::{Claim, Slot, SlotPool, moved_index};
use crate::reorder::ReorderContext;
use crate::insert::Insertion;
use crate::{
    Completion, DirectEvent, Geometry, ImmediateScheduler, ListEvent, ListMode, ListOptions,
    PointerSample, Population, RenderReport, Result, Scheduler, ScrollTick, SectionHeader, Signal,
    SlotId, SlotState, Source, Target, Window, compute_indices,
};

/// What a render pass should do beyond placing the render window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// Repopulate slots that are already bound.
    pub reload: bool,
    /// Marks the slot bound to this index as [`SlotState::New`].
    pub changed_index: Option<usize>,
    /// Only walk the critical (visible) range.
    pub critical_only: bool,
    /// Never populate item detail during this pass.
    pub skip_detail: bool,
}

impl RenderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload() -> Self {
        Self {
            reload: true,
            ..Self::default()
        }
    }

    pub fn with_changed_index(mut self, index: usize) -> Self {
        self.changed_index = Some(index);
        self
    }

    pub fn with_critical_only(mut self, critical_only: bool) -> Self {
        self.critical_only = critical_only;
        self
    }

    pub fn with_skip_detail(mut self, skip_detail: bool) -> Self {
        self.skip_detail = skip_detail;
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PendingPopulation {
    pub(crate) slot: SlotId,
    pub(crate) index: usize,
    pub(crate) completion: Completion,
}

#[derive(Clone, Debug)]
struct Reveal {
    slot: SlotId,
    index: usize,
    completion: Completion,
}

/// Owns the source, the geometry and the slot pool, and places the render window.
///
/// Everything a scheduler block needs to touch lives here, so blocks can borrow it while the
/// scheduler itself is borrowed by the [`FastList`].
pub(crate) struct Renderer<Src: Source> {
    pub(crate) source: Src,
    pub(crate) options: ListOptions,
    pub(crate) geometry: Geometry,
    pub(crate) pool: SlotPool<Src::Section>,
    pub(crate) headers: Vec<SectionHeader<Src::Section>>,
    pub(crate) list_height: u64,
    pub(crate) events: VecDeque<ListEvent>,
    pub(crate) pending: Vec<PendingPopulation>,
    rendered: bool,
}

impl<Src: Source> Renderer<Src> {
    fn new(source: Src, options: ListOptions) -> Self {
        let geometry = Geometry::new(source.item_height(), source.section_header_height());
        Self {
            source,
            options,
            geometry,
            pool: SlotPool::new(),
            headers: Vec::new(),
            list_height: 0,
            events: VecDeque::new(),
            pending: Vec::new(),
            rendered: false,
        }
    }

    fn setup_phase1(&mut self, viewport_height: u32) -> Result<RenderReport> {
        vdebug!(viewport_height, "setup phase 1");
        self.update_container(viewport_height);
        self.update_list_height();

        let initial = self
            .options
            .initial_scroll_top
            .or_else(|| self.source.initial_scroll_top());
        if let Some(top) = initial {
            let max_top = self
                .list_height
                .saturating_sub(self.geometry.viewport_height as u64);
            self.geometry.top_position = top.min(max_top);
        }

        self.update_sections();
        self.render(
            RenderRequest::new()
                .with_critical_only(true)
                .with_skip_detail(true),
        )
    }

    pub(crate) fn update_container(&mut self, viewport_height: u32) {
        let materialized = self.pool.len();
        self.geometry
            .update_container(viewport_height, &self.options, materialized);
    }

    pub(crate) fn update_list_height(&mut self) {
        self.list_height = self.source.full_height();
        vtrace!(list_height = self.list_height, "updated list height");
    }

    /// Lays out and populates every section header.
    pub(crate) fn update_sections(&mut self) {
        let header_height = self.source.section_header_height() as u64;
        let mut offset = 0u64;
        self.headers.clear();
        for (ordinal, section) in self.source.sections().into_iter().enumerate() {
            let height = header_height + self.source.full_section_height(&section);
            let header = SectionHeader {
                section,
                ordinal,
                offset,
                height,
            };
            self.source.populate_section(&header);
            offset += height;
            self.headers.push(header);
        }
        vdebug!(sections = self.headers.len(), "update sections");
    }

    /// Folds a scroll reading into the geometry and returns whether scrolling is fast.
    pub(crate) fn update_viewport_geometry(&mut self, position: u64, instant: bool) -> bool {
        let full_height = self.source.full_height();
        let reading =
            self.geometry
                .process_scroll_position(position, full_height, instant, &self.options);
        if reading.top_reached {
            self.events.push_back(ListEvent::TopReached);
        }
        self.geometry.fast
    }

    pub(crate) fn scroll_instantly(&mut self, position: u64) -> Result<RenderReport> {
        self.update_viewport_geometry(position, true);
        self.render(RenderRequest::new())
    }

    /// Places and populates the render window.
    ///
    /// The window is walked in the direction of travel so recycling always reclaims the slots
    /// furthest behind. The first full pass fills the whole pool. On a pool-exhausted invariant
    /// violation the pass stops at the failing index and the error is returned.
    pub(crate) fn render(&mut self, request: RenderRequest) -> Result<RenderReport> {
        let mut report = RenderReport::default();
        let geometry = self.geometry;
        if geometry.max_item_count == 0 {
            return Ok(report);
        }
        let Some(window) = compute_indices(&self.source, &geometry) else {
            return Ok(report);
        };
        report.window = Some(window);

        let last_index = self.source.full_length() - 1;
        let (start, end) = if request.critical_only {
            (window.critical_start, window.critical_end)
        } else if !self.rendered {
            self.rendered = true;
            let end = window.start + (geometry.max_item_count - 1);
            self.fit_window(&window, window.start, end.min(last_index))
        } else {
            self.fit_window(&window, window.start, window.end)
        };

        let pivot = if geometry.forward { end } else { start };
        let mut recyclable = self.pool.recyclable(start, end, pivot);

        if geometry.forward {
            for index in start..=end {
                self.render_item(index, request, &mut recyclable, &mut report)?;
            }
        } else {
            for index in (start..=end).rev() {
                self.render_item(index, request, &mut recyclable, &mut report)?;
            }
        }

        self.prune_stale_pending();

        // Outdated pre-rendered content must not linger after a data change.
        if request.reload {
            self.hide_beyond_end();
        }

        vtrace!(
            map = %debug_viewport(&self.pool, geometry.forward, &window, start, end),
            "render"
        );
        Ok(report)
    }

    /// Shrinks `[start, end]` until it fits the slots no reorder gesture owns.
    ///
    /// Slots pinned outside the window keep their binding, so the side behind the direction of
    /// travel gives way first. The critical range is never cut.
    fn fit_window(&self, window: &Window, mut start: usize, mut end: usize) -> (usize, usize) {
        let max_item_count = self.geometry.max_item_count;
        loop {
            let available = max_item_count.saturating_sub(self.pool.pinned_outside(start, end));
            let len = end - start + 1;
            if len <= available {
                return (start, end);
            }
            let mut excess = len - available;
            let room_before = window.critical_start.saturating_sub(start);
            let room_after = end.saturating_sub(window.critical_end);
            let (cut_start, cut_end) = if self.geometry.forward {
                let cut_start = excess.min(room_before);
                excess -= cut_start;
                (cut_start, excess.min(room_after))
            } else {
                let cut_end = excess.min(room_after);
                excess -= cut_end;
                (excess.min(room_before), cut_end)
            };
            if cut_start == 0 && cut_end == 0 {
                return (start, end);
            }
            vtrace!(cut_start, cut_end, "window shrunk around pinned slots");
            start += cut_start;
            end -= cut_end;
        }
    }

    fn render_item(
        &mut self,
        index: usize,
        request: RenderRequest,
        recyclable: &mut Vec<usize>,
        report: &mut RenderReport,
    ) -> Result<()> {
        let slot = match self.pool.slot_for(index) {
            Some(slot) => {
                if self.pool.entry(slot).state.is_pinned() {
                    return Ok(());
                }
                if request.reload {
                    let entry = self.pool.entry_mut(slot);
                    entry.detail_populated = false;
                    if entry.state == SlotState::Hidden {
                        entry.state = SlotState::Idle;
                    }
                    self.try_populate(slot, index, report);
                    report.repopulated += 1;
                }
                slot
            }
            None => {
                let claim =
                    self.pool
                        .find_item_for(index, recyclable, self.geometry.max_item_count)?;
                let slot = claim.slot();
                if matches!(claim, Claim::Recycled { .. }) {
                    report.recycled += 1;
                }

                let entry = self.pool.entry_mut(slot);
                entry.state = SlotState::Idle;
                if entry.detail_populated {
                    entry.detail_populated = false;
                    self.source.unpopulate_item_detail(slot);
                }

                let ready = self.try_populate(slot, index, report);
                if ready && request.changed_index == Some(index) {
                    self.pool.entry_mut(slot).state = SlotState::New;
                }
                report.bound += 1;
                slot
            }
        };

        self.place_item(slot, index, request.reload);

        if request.skip_detail || !self.geometry.idle {
            return Ok(());
        }
        let entry = self.pool.entry(slot);
        if !entry.populated || entry.detail_populated {
            return Ok(());
        }
        if self.source.populate_item_detail(slot, index) {
            self.pool.entry_mut(slot).detail_populated = true;
        }
        Ok(())
    }

    /// Populates `slot` for `index`. Returns `false` when the content is still pending.
    fn try_populate(&mut self, slot: SlotId, index: usize, report: &mut RenderReport) -> bool {
        match self.source.populate_item(slot, index) {
            Population::Ready => {
                self.pool.entry_mut(slot).populated = true;
                true
            }
            Population::Pending(completion) => {
                let entry = self.pool.entry_mut(slot);
                entry.populated = false;
                entry.state = SlotState::Unpopulated;
                self.pending.push(PendingPopulation {
                    slot,
                    index,
                    completion,
                });
                report.pending += 1;
                false
            }
        }
    }

    /// Drops pending populations whose slot has been rebound since they were requested, so a
    /// source that never resolves them does not leak an entry per recycled slot.
    fn prune_stale_pending(&mut self) {
        let pool = &self.pool;
        self.pending
            .retain(|p| pool.get(p.slot).and_then(Slot::index) == Some(p.index));
    }

    fn place_item(&mut self, slot: SlotId, index: usize, reload: bool) {
        if self.pool.entry(slot).placed && !reload {
            return;
        }
        let position = self.source.position_for_index(index);
        let section = self.source.section_for(index);
        let entry = self.pool.entry_mut(slot);
        entry.position = position;
        entry.section = Some(section);
        entry.placed = true;
    }

    /// Places every bound slot whose index changed outside of a render pass.
    pub(crate) fn place_unplaced(&mut self) {
        let unplaced: Vec<(usize, SlotId)> = self
            .pool
            .bound()
            .filter(|&(_, slot)| !self.pool.entry(slot).placed)
            .collect();
        for (index, slot) in unplaced {
            self.place_item(slot, index, false);
        }
    }

    fn hide_beyond_end(&mut self) {
        let length = self.source.full_length();
        let beyond: Vec<SlotId> = self
            .pool
            .bound()
            .filter(|&(index, _)| index >= length)
            .map(|(_, slot)| slot)
            .collect();
        for slot in beyond {
            let entry = self.pool.entry_mut(slot);
            entry.populated = false;
            entry.state = SlotState::Hidden;
        }
    }

    /// Inserts an empty binding at index 0.
    ///
    /// With `keep_scroll_position` the scroll offset moves down by one item so the visible
    /// content stays put; otherwise the placeholder for index 0 is rendered as
    /// [`SlotState::New`] and its slot returned.
    pub(crate) fn insert_on_top(&mut self, keep_scroll_position: bool) -> Result<Option<SlotId>> {
        vdebug!(keep_scroll_position, "insert on top");
        self.shift_on_top();
        self.update_sections();
        self.update_list_height();

        if keep_scroll_position {
            let top = self.geometry.top_position + self.geometry.item_height as u64;
            self.scroll_instantly(top)?;
            self.place_unplaced();
            self.events.push_back(ListEvent::HiddenNewContent);
            return Ok(None);
        }

        self.render(RenderRequest::new().with_changed_index(0))?;
        self.place_unplaced();
        Ok(self.pool.slot_for(0))
    }

    /// Moves every binding and pending population down by one index and drops the push-down
    /// tweaks.
    pub(crate) fn shift_on_top(&mut self) {
        self.pool.shift_from(0);
        for pending in &mut self.pending {
            pending.index += 1;
        }
        for (_, slot) in self.pool.slots_mut() {
            if !slot.state.is_pinned() {
                slot.tweak_delta = 0;
            }
        }
    }

    /// Moves the item at `from` to `to` in the source and re-lays the window.
    pub(crate) fn commit_move(
        &mut self,
        from: usize,
        to: usize,
        section: Option<Src::Section>,
    ) -> Result<RenderReport> {
        vdebug!(from, to, "commit reorder");
        let section = section.unwrap_or_else(|| self.source.section_for(from));
        if let Some(item) = self.source.remove_at_index(from) {
            self.source.insert_at_index(to, item, &section);
        }
        self.pool.apply_move(from, to);
        for pending in &mut self.pending {
            pending.index = moved_index(pending.index, from, to);
        }
        for (_, slot) in self.pool.slots_mut() {
            slot.tweak_delta = 0;
            if slot.state.is_pinned() {
                slot.state = SlotState::Idle;
            }
        }
        self.update_sections();
        let report = self.render(RenderRequest::new())?;
        self.place_unplaced();
        Ok(report)
    }

    fn take_resolved_populations(&mut self) -> Vec<PendingPopulation> {
        let (resolved, pending) = core::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.completion.is_done());
        self.pending = pending;
        resolved
    }
}

#[cfg(feature = "tracing")]
fn debug_viewport<S>(
    pool: &SlotPool<S>,
    forward: bool,
    window: &Window,
    start: usize,
    end: usize,
) -> alloc::string::String {
    let mut out = alloc::string::String::from(if forward { "[v]" } else { "[^]" });
    let last = pool.bound().map(|(i, _)| i).max().unwrap_or(0).max(end);
    for i in 0..=last {
        if i == start {
            out.push('|');
        }
        if i == window.critical_start {
            out.push('[');
        }
        out.push(if pool.slot_for(i).is_some() { 'x' } else { '-' });
        if i == window.critical_end {
            out.push(']');
        }
        if i == end {
            out.push('|');
        }
    }
    out
}

/// A virtualized, recycling list.
///
/// The list keeps at most `max_item_count` slots materialized and rebinds them to new indices
/// as the viewport scrolls. It holds no UI objects: hosts read slot positions and states, feed
/// scroll and pointer input, and call [`FastList::poll`] once per frame to advance pending
/// populations and animations.
///
/// For frame-coalesced scheduling and timers, see the `fastlist-adapter` crate.
pub struct FastList<Src: Source, Sch: Scheduler = ImmediateScheduler> {
    pub(crate) renderer: Renderer<Src>,
    pub(crate) scheduler: Sch,
    pub(crate) reorder: Option<ReorderContext>,
    pub(crate) insertion: Option<Insertion>,
    reveals: Vec<Reveal>,
    pub(crate) editing: bool,
    scroll_attached: bool,
}

impl<Src: Source, Sch: Scheduler> FastList<Src, Sch> {
    pub fn new(source: Src, scheduler: Sch, options: ListOptions) -> Self {
        vdebug!(?options, "FastList::new");
        Self {
            renderer: Renderer::new(source, options),
            scheduler,
            reorder: None,
            insertion: None,
            reveals: Vec::new(),
            editing: false,
            scroll_attached: false,
        }
    }

    /// Gets just enough content on screen: geometry, sections and the critical range, without
    /// item detail. Starts listening for scroll events afterwards, so the initial scroll offset
    /// does not count as a scroll.
    pub fn setup_phase1(&mut self, viewport_height: u32) -> Result<RenderReport> {
        let renderer = &mut self.renderer;
        let mut result = Ok(RenderReport::default());
        self.scheduler
            .mutation(&mut || result = renderer.setup_phase1(viewport_height));
        let report = result?;
        self.scheduler
            .attach_direct(Target::Container, DirectEvent::Scroll);
        self.scroll_attached = true;
        Ok(report)
    }

    /// Completes initialization: fills the pool and populates detail.
    pub fn setup_phase2(&mut self) -> Result<RenderReport> {
        vdebug!("setup phase 2");
        self.render(RenderRequest::new())
    }

    /// Runs both setup phases back to back.
    pub fn setup(&mut self, viewport_height: u32) -> Result<RenderReport> {
        self.setup_phase1(viewport_height)?;
        self.setup_phase2()
    }

    /// Runs a render pass in a mutation phase.
    pub fn render(&mut self, request: RenderRequest) -> Result<RenderReport> {
        let renderer = &mut self.renderer;
        let mut result = Ok(RenderReport::default());
        self.scheduler
            .mutation(&mut || result = renderer.render(request));
        let report = result?;
        self.advance()?;
        Ok(report)
    }

    /// Re-reads sections and list height, and repopulates every bound slot.
    pub fn reload_data(&mut self) -> Result<RenderReport> {
        let renderer = &mut self.renderer;
        let mut result = Ok(RenderReport::default());
        self.scheduler.mutation(&mut || {
            renderer.update_sections();
            renderer.update_list_height();
            result = renderer.render(RenderRequest::reload());
        });
        let report = result?;
        self.advance()?;
        Ok(report)
    }

    pub fn update_sections(&mut self) {
        let renderer = &mut self.renderer;
        self.scheduler.mutation(&mut || renderer.update_sections());
    }

    /// Handles a scroll event from the direct-attach path.
    ///
    /// Rendering is skipped entirely while scrolling is fast (except at either end of the
    /// list), and resumes on the next tick that is not.
    pub fn on_scroll(&mut self, position: u64) -> Result<ScrollTick> {
        if !self.scroll_attached {
            return Ok(self.scroll_tick(false));
        }
        let fast = self.renderer.update_viewport_geometry(position, false);
        if fast {
            vdebug!(position, "fast scrolling, skipping render");
            return Ok(self.scroll_tick(false));
        }
        self.renderer.render(RenderRequest::new())?;
        self.advance()?;
        Ok(self.scroll_tick(true))
    }

    fn scroll_tick(&self, rendered: bool) -> ScrollTick {
        ScrollTick {
            fast: self.renderer.geometry.fast,
            idle: self.renderer.geometry.idle,
            rendered,
        }
    }

    /// Jumps to `position` and renders as if scrolling had stopped there.
    pub fn scroll_instantly(&mut self, position: u64) -> Result<RenderReport> {
        let report = self.renderer.scroll_instantly(position)?;
        self.advance()?;
        Ok(report)
    }

    /// Applies a new viewport height and re-renders.
    pub fn on_resize(&mut self, viewport_height: u32) -> Result<RenderReport> {
        let renderer = &mut self.renderer;
        let mut result = Ok(RenderReport::default());
        self.scheduler.mutation(&mut || {
            renderer.update_container(viewport_height);
            result = renderer.render(RenderRequest::new());
        });
        let report = result?;
        self.advance()?;
        Ok(report)
    }

    /// Advances pending populations, reveals, reorder settling and insertion animations.
    ///
    /// Call once per frame. With an immediate scheduler every step finishes in one call.
    pub fn poll(&mut self) -> Result<()> {
        self.advance()
    }

    pub(crate) fn advance(&mut self) -> Result<()> {
        loop {
            let mut progressed = self.advance_populations();
            progressed |= self.advance_reveals();
            progressed |= self.advance_reorder()?;
            progressed |= self.advance_insertion()?;
            if !progressed {
                return Ok(());
            }
        }
    }

    /// Retries populations whose pending future resolved. A slot that was recycled to another
    /// index in the meantime is left alone.
    fn advance_populations(&mut self) -> bool {
        let resolved = self.renderer.take_resolved_populations();
        if resolved.is_empty() {
            return false;
        }

        for pending in resolved {
            let bound = self
                .renderer
                .pool
                .get(pending.slot)
                .and_then(Slot::index);
            if bound != Some(pending.index) {
                vtrace!(index = pending.index, "discarding stale population");
                continue;
            }

            let (slot, index) = (pending.slot, pending.index);
            match self.renderer.source.populate_item(slot, index) {
                Population::Pending(completion) => {
                    self.renderer.pending.push(PendingPopulation {
                        slot,
                        index,
                        completion,
                    });
                }
                Population::Ready => {
                    let renderer = &mut self.renderer;
                    if !renderer.pool.entry(slot).detail_populated
                        && renderer.source.populate_item_detail(slot, index)
                    {
                        renderer.pool.entry_mut(slot).detail_populated = true;
                    }

                    let pool = &mut renderer.pool;
                    let completion = self.scheduler.transition(
                        &mut || {
                            let entry = pool.entry_mut(slot);
                            entry.populated = true;
                            if entry.state == SlotState::Unpopulated {
                                entry.state = SlotState::Revealing;
                            }
                        },
                        Target::Slot(slot),
                        Signal::TransitionEnd,
                    );
                    vtrace!(index, "revealing populated item");
                    self.reveals.push(Reveal {
                        slot,
                        index,
                        completion,
                    });
                }
            }
        }
        true
    }

    fn advance_reveals(&mut self) -> bool {
        let before = self.reveals.len();
        let pool = &mut self.renderer.pool;
        self.reveals.retain(|reveal| {
            if !reveal.completion.is_done() {
                return true;
            }
            if let Some(entry) = pool.get_mut(reveal.slot) {
                if entry.index == Some(reveal.index) && entry.state == SlotState::Revealing {
                    entry.state = SlotState::Idle;
                }
            }
            false
        });
        self.reveals.len() != before
    }

    /// Follows bindings that moved outside of a render pass.
    pub(crate) fn remap_reveals(&mut self, remap: impl Fn(usize) -> usize) {
        for reveal in &mut self.reveals {
            reveal.index = remap(reveal.index);
        }
    }

    /// Reports a click on `slot`. Ignored while editing.
    pub fn select_slot(&mut self, slot: SlotId, pointer: PointerSample) -> Option<usize> {
        if self.editing {
            return None;
        }
        let index = self.renderer.pool.get(slot)?.index?;
        self.renderer
            .events
            .push_back(ListEvent::ItemSelected { index, pointer });
        Some(index)
    }

    /// Drains the signals emitted since the last call.
    pub fn drain_events(&mut self) -> vec_deque::Drain<'_, ListEvent> {
        self.renderer.events.drain(..)
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn mode(&self) -> ListMode {
        if self.reorder.is_some() || self.insertion.is_some() {
            ListMode::Reordering
        } else if self.editing {
            ListMode::Editing
        } else {
            ListMode::Normal
        }
    }

    /// Permanently tears the list down: stops listening and unbinds every slot.
    pub fn destroy(&mut self) {
        if self.scroll_attached {
            self.scheduler
                .detach_direct(Target::Container, DirectEvent::Scroll);
            self.scroll_attached = false;
        }
        if self.reorder.take().is_some() {
            self.scheduler
                .detach_direct(Target::Container, DirectEvent::PointerMove);
        }
        self.insertion = None;
        self.reveals.clear();
        self.renderer.pending.clear();
        self.renderer.headers.clear();
        self.renderer.pool.unbind_all();
    }

    pub fn geometry(&self) -> &Geometry {
        &self.renderer.geometry
    }

    pub fn options(&self) -> &ListOptions {
        &self.renderer.options
    }

    pub fn source(&self) -> &Src {
        &self.renderer.source
    }

    pub fn source_mut(&mut self) -> &mut Src {
        &mut self.renderer.source
    }

    pub fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }

    pub fn scroll_top(&self) -> u64 {
        self.renderer.geometry.top_position
    }

    pub fn list_height(&self) -> u64 {
        self.renderer.list_height
    }

    pub fn headers(&self) -> &[SectionHeader<Src::Section>] {
        &self.renderer.headers
    }

    /// The window the next render would place.
    pub fn window(&self) -> Option<Window> {
        compute_indices(&self.renderer.source, &self.renderer.geometry)
    }

    pub fn pool(&self) -> &SlotPool<Src::Section> {
        &self.renderer.pool
    }

    pub fn slot(&self, slot: SlotId) -> Option<&Slot<Src::Section>> {
        self.renderer.pool.get(slot)
    }

    pub fn slot_for_index(&self, index: usize) -> Option<SlotId> {
        self.renderer.pool.slot_for(index)
    }

    /// Number of populations still waiting on their source.
    pub fn pending_population_count(&self) -> usize {
        self.renderer.pending.len()
    }
}

impl<Src: Source, Sch: Scheduler> core::fmt::Debug for FastList<Src, Sch> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FastList")
            .field("geometry", &self.renderer.geometry)
            .field("pool_size", &self.renderer.pool.len())
            .field("bound", &self.renderer.pool.bound_count())
            .field("pending", &self.renderer.pending.len())
            .field("reordering", &self.reorder.is_some())
            .field("inserting", &self.insertion.is_some())
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}
