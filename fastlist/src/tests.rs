use crate::*;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Sectioned, fixed-height source that records what the list asks of it.
///
/// Item ids start at 1000 so they never collide with indices in assertions.
#[derive(Debug)]
struct TestSource {
    items: Vec<u32>,
    /// Item count per section; sections are identified by ordinal.
    sections: Vec<usize>,
    item_height: u32,
    header_height: u32,
    contents: BTreeMap<SlotId, u32>,
    populate_calls: usize,
    ready_log: Vec<(SlotId, usize)>,
    section_calls: usize,
    detail: bool,
    detail_calls: usize,
    unpopulate_detail_calls: usize,
    deferred: bool,
    ready: BTreeSet<usize>,
    waiting: Vec<(usize, Resolver)>,
}

impl TestSource {
    fn flat(len: usize) -> Self {
        Self::sectioned(&[len], 0)
    }

    fn sectioned(counts: &[usize], header_height: u32) -> Self {
        let len: usize = counts.iter().sum();
        Self {
            items: (0..len as u32).map(|i| 1000 + i).collect(),
            sections: counts.to_vec(),
            item_height: 50,
            header_height,
            contents: BTreeMap::new(),
            populate_calls: 0,
            ready_log: Vec::new(),
            section_calls: 0,
            detail: false,
            detail_calls: 0,
            unpopulate_detail_calls: 0,
            deferred: false,
            ready: BTreeSet::new(),
            waiting: Vec::new(),
        }
    }

    fn with_detail(mut self) -> Self {
        self.detail = true;
        self
    }

    fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    fn push_front(&mut self, item: u32) {
        self.items.insert(0, item);
        self.sections[0] += 1;
    }

    fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
        self.sections = vec![len];
    }

    fn resolve_where(&mut self, mut f: impl FnMut(usize) -> bool) {
        let waiting = core::mem::take(&mut self.waiting);
        for (index, resolver) in waiting {
            if f(index) {
                self.ready.insert(index);
                resolver.resolve();
            } else {
                self.waiting.push((index, resolver));
            }
        }
    }

    fn resolve_all(&mut self) {
        self.resolve_where(|_| true);
    }
}

impl Source for TestSource {
    type Section = u32;
    type Item = u32;

    fn full_length(&self) -> usize {
        self.items.len()
    }

    fn full_height(&self) -> u64 {
        self.sections
            .iter()
            .map(|&count| self.header_height as u64 + count as u64 * self.item_height as u64)
            .sum()
    }

    fn item_height(&self) -> u32 {
        self.item_height
    }

    fn section_header_height(&self) -> u32 {
        self.header_height
    }

    fn full_section_height(&self, section: &u32) -> u64 {
        self.sections.get(*section as usize).copied().unwrap_or(0) as u64
            * self.item_height as u64
    }

    fn index_at_position(&self, position: u64) -> usize {
        let ih = self.item_height as u64;
        let mut offset = 0u64;
        let mut first = 0usize;
        for &count in &self.sections {
            let items_top = offset + self.header_height as u64;
            let bottom = items_top + count as u64 * ih;
            if count > 0 && position < bottom {
                if position < items_top {
                    return first;
                }
                return first + ((position - items_top) / ih) as usize;
            }
            offset = bottom;
            first += count;
        }
        self.items.len().saturating_sub(1)
    }

    fn position_for_index(&self, index: usize) -> u64 {
        let ih = self.item_height as u64;
        let mut offset = 0u64;
        let mut first = 0usize;
        for &count in &self.sections {
            offset += self.header_height as u64;
            if index < first + count {
                return offset + (index - first) as u64 * ih;
            }
            offset += count as u64 * ih;
            first += count;
        }
        offset
    }

    fn sections(&self) -> Vec<u32> {
        (0..self.sections.len() as u32).collect()
    }

    fn section_for(&self, index: usize) -> u32 {
        let mut first = 0usize;
        for (ordinal, &count) in self.sections.iter().enumerate() {
            if index < first + count {
                return ordinal as u32;
            }
            first += count;
        }
        self.sections.len().saturating_sub(1) as u32
    }

    fn populate_item(&mut self, slot: SlotId, index: usize) -> Population {
        self.populate_calls += 1;
        if self.deferred && !self.ready.contains(&index) {
            let (completion, resolver) = Completion::pending();
            self.waiting.push((index, resolver));
            return Population::Pending(completion);
        }
        if let Some(&item) = self.items.get(index) {
            self.contents.insert(slot, item);
        }
        self.ready_log.push((slot, index));
        Population::Ready
    }

    fn populate_section(&mut self, _header: &SectionHeader<u32>) {
        self.section_calls += 1;
    }

    fn remove_at_index(&mut self, index: usize) -> Option<u32> {
        if index >= self.items.len() {
            return None;
        }
        let section = self.section_for(index) as usize;
        self.sections[section] -= 1;
        Some(self.items.remove(index))
    }

    fn insert_at_index(&mut self, index: usize, item: u32, section: &u32) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.sections[*section as usize] += 1;
    }

    fn populate_item_detail(&mut self, _slot: SlotId, _index: usize) -> bool {
        if self.detail {
            self.detail_calls += 1;
        }
        self.detail
    }

    fn unpopulate_item_detail(&mut self, _slot: SlotId) {
        self.unpopulate_detail_calls += 1;
    }
}

type TestList = FastList<TestSource, ImmediateScheduler>;

fn list_with(source: TestSource, options: ListOptions) -> TestList {
    let mut list = FastList::new(source, ImmediateScheduler::new(), options);
    list.setup(500).unwrap();
    list
}

fn flat_list(len: usize) -> TestList {
    list_with(TestSource::flat(len), ListOptions::new())
}

fn pointer(y: i64) -> PointerSample {
    PointerSample {
        x: 10,
        y,
        id: 1,
        timestamp_ms: 0,
    }
}

fn assert_consistent(list: &TestList) {
    let pool = list.pool();
    assert!(pool.len() <= list.geometry().max_item_count);

    let mut seen = BTreeSet::new();
    for (index, slot) in pool.bound() {
        assert!(seen.insert(slot), "slot {slot:?} bound twice");
        assert_eq!(pool.get(slot).unwrap().index(), Some(index));
    }
    for (slot, entry) in pool.slots() {
        if let Some(index) = entry.index() {
            assert_eq!(pool.slot_for(index), Some(slot));
        }
    }

    let source = list.source();
    for (index, slot) in pool.bound() {
        let entry = pool.get(slot).unwrap();
        if entry.is_populated() && index < source.items.len() {
            assert_eq!(source.contents.get(&slot), Some(&source.items[index]));
        }
    }
}

#[test]
fn window_containment_holds_for_random_geometry() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2000 {
        let len = rng.gen_range_usize(1, 2000);
        let mut source = TestSource::flat(len);
        source.item_height = rng.gen_range_u32(1, 100);

        let mut geometry = Geometry::new(source.item_height, 0);
        geometry.viewport_height = rng.gen_range_u32(1, 2000);
        let full = source.full_height() + geometry.viewport_height as u64;
        geometry.top_position = rng.gen_range_u64(0, full);
        geometry.max_item_count = rng.gen_range_usize(0, 100);
        geometry.switch_window = rng.gen_range_usize(0, 50);
        geometry.forward = rng.gen_bool();

        let w = compute_indices(&source, &geometry).unwrap();
        assert!(w.start <= w.critical_start, "{w:?}");
        assert!(w.critical_start <= w.critical_end, "{w:?}");
        assert!(w.critical_end <= w.end, "{w:?}");
        assert!(w.end < len, "{w:?}");
    }
}

#[test]
fn empty_source_has_no_window() {
    let source = TestSource::flat(0);
    let mut geometry = Geometry::new(50, 0);
    geometry.viewport_height = 500;
    geometry.max_item_count = 35;
    assert_eq!(compute_indices(&source, &geometry), None);

    let mut list = FastList::new(source, ImmediateScheduler::new(), ListOptions::new());
    let report = list.setup(500).unwrap();
    assert_eq!(report, RenderReport::default());
    assert!(list.pool().is_empty());
}

#[test]
fn render_ahead_follows_direction_of_travel() {
    let source = TestSource::flat(1000);
    let mut geometry = Geometry::new(50, 0);
    geometry.update_container(500, &ListOptions::new(), 0);
    geometry.top_position = 5000;
    assert_eq!(geometry.max_item_count, 35);
    assert_eq!(geometry.switch_window, 5);

    geometry.forward = true;
    let w = compute_indices(&source, &geometry).unwrap();
    assert_eq!((w.critical_start, w.critical_end), (100, 109));
    assert_eq!((w.start, w.end), (95, 129));

    geometry.forward = false;
    let w = compute_indices(&source, &geometry).unwrap();
    assert_eq!((w.start, w.end), (80, 114));
    assert_eq!(w.index_count(), 35);
}

#[test]
fn window_clipped_at_the_top_gives_the_share_to_the_end() {
    let source = TestSource::flat(1000);
    let mut geometry = Geometry::new(50, 0);
    geometry.update_container(500, &ListOptions::new(), 0);
    geometry.forward = false;

    let w = compute_indices(&source, &geometry).unwrap();
    assert_eq!((w.start, w.end), (0, 34));
}

#[test]
fn end_to_end_scroll_scenario() {
    let options = ListOptions::new().with_max_item_count(Some(28));
    let mut list = list_with(TestSource::flat(1000), options);
    assert_eq!(list.pool().len(), 28);

    let tick = list.on_scroll(2500).unwrap();
    assert!(tick.rendered);
    assert!(!tick.fast);

    let w = list.window().unwrap();
    assert_eq!((w.critical_start, w.critical_end), (50, 59));
    assert!(w.start >= 50 - 14 && w.end <= 59 + 14, "{w:?}");
    assert_eq!(list.pool().len(), 28usize.min(29));
    for index in w.start..=w.end {
        assert!(list.slot_for_index(index).is_some(), "index {index} unbound");
    }
    assert_consistent(&list);
}

#[test]
fn recycle_orders_by_distance_from_pivot() {
    let recyclable = recycle([0, 1, 2, 3, 10, 11, 40], 5, 20, 20);
    assert_eq!(recyclable, vec![3, 2, 1, 0, 40]);

    let mut pop_order = recyclable.clone();
    let mut popped = Vec::new();
    while let Some(i) = pop_order.pop() {
        popped.push(i);
    }
    assert_eq!(popped, vec![40, 0, 1, 2, 3]);
}

#[test]
fn pool_stays_bounded_and_bijective_under_random_scrolling() {
    let mut rng = Lcg::new(42);
    let mut list = flat_list(3000);
    let max_top = list.list_height() - 500;

    for _ in 0..500 {
        let position = if rng.gen_bool() {
            rng.gen_range_u64(0, max_top + 1)
        } else {
            let top = list.scroll_top();
            let step = rng.gen_range_u64(0, 300);
            if rng.gen_bool() {
                (top + step).min(max_top)
            } else {
                top.saturating_sub(step)
            }
        };
        let tick = list.on_scroll(position).unwrap();
        assert_consistent(&list);

        if tick.rendered {
            let w = list.window().unwrap();
            for index in w.start..=w.end {
                assert!(list.slot_for_index(index).is_some(), "index {index} unbound");
            }
        }
    }
    assert_eq!(list.pool().len(), list.geometry().max_item_count);
}

#[test]
fn rendering_twice_reuses_content() {
    let mut list = flat_list(1000);
    let calls = list.source().populate_calls;

    let report = list.render(RenderRequest::new()).unwrap();
    assert_eq!(report.bound, 0);
    assert_eq!(report.repopulated, 0);
    assert_eq!(list.source().populate_calls, calls);

    let report = list.reload_data().unwrap();
    assert_eq!(report.repopulated, 35);
    assert_eq!(list.source().populate_calls, calls + 35);
}

#[test]
fn pool_exhaustion_is_surfaced() {
    let options = ListOptions::new().with_max_item_count(Some(5));
    let mut list = FastList::new(TestSource::flat(1000), ImmediateScheduler::new(), options);

    let err = list.setup_phase1(500).unwrap_err();
    assert_eq!(
        err,
        ListError::MissingSlot {
            index: 5,
            pool_size: 5,
            max_item_count: 5,
        }
    );
    assert_eq!(list.pool().len(), 5);
    assert_eq!(list.pool().bound_count(), 5);
}

#[test]
fn fast_scroll_hysteresis() {
    let v = 500u64;

    let mut list = flat_list(1000);
    list.on_scroll(10_000).unwrap();
    let ticks: Vec<ScrollTick> = [3 * v, 3 * v, 3 * v / 10]
        .iter()
        .map(|moved| {
            let top = list.scroll_top();
            list.on_scroll(top + moved).unwrap()
        })
        .collect();
    assert_eq!(
        ticks.iter().map(|t| t.fast).collect::<Vec<_>>(),
        vec![true, true, false]
    );
    assert_eq!(
        ticks.iter().map(|t| t.rendered).collect::<Vec<_>>(),
        vec![false, false, true]
    );

    let mut list = flat_list(1000);
    list.on_scroll(10_000).unwrap();
    let first = list.on_scroll(10_000 + 3 * v).unwrap();
    let second = list.on_scroll(10_000 + 3 * v + 6 * v / 10).unwrap();
    assert!(first.fast);
    assert!(second.fast);
    assert!(!second.rendered);
}

#[test]
fn fast_classification_is_cleared_at_the_extremes() {
    let mut list = flat_list(1000);
    list.on_scroll(10_000).unwrap();
    assert!(list.on_scroll(20_000).unwrap().fast);

    let tick = list.on_scroll(0).unwrap();
    assert!(!tick.fast);
    assert!(tick.idle);
    assert!(tick.rendered);
}

#[test]
fn hysteresis_functions() {
    assert!(is_fast(false, 1001, 500, 2.0, 0.5));
    assert!(!is_fast(false, 1000, 500, 2.0, 0.5));
    assert!(is_fast(true, 300, 500, 2.0, 0.5));
    assert!(!is_fast(true, 200, 500, 2.0, 0.5));
    assert!(is_fast(true, 0, 500, 2.0, 0.5));

    assert!(is_idle(false, 5, 160, 1.0 / 16.0, 0.25));
    assert!(is_idle(true, 30, 160, 1.0 / 16.0, 0.25));
    assert!(!is_idle(true, 50, 160, 1.0 / 16.0, 0.25));
    assert!(!is_idle(false, 0, 160, 1.0 / 16.0, 0.25));

    assert!(is_forward(false, 1));
    assert!(!is_forward(true, -1));
    assert!(is_forward(true, 0));
    assert!(!is_forward(false, 0));
}

#[test]
fn top_reached_is_edge_triggered() {
    let mut list = flat_list(1000);
    list.on_scroll(1000).unwrap();
    assert_eq!(list.drain_events().count(), 0);

    list.on_scroll(0).unwrap();
    let events: Vec<ListEvent> = list.drain_events().collect();
    assert_eq!(events, vec![ListEvent::TopReached]);

    list.on_scroll(0).unwrap();
    assert_eq!(list.drain_events().count(), 0);
}

#[test]
fn first_scroll_reading_carries_no_movement() {
    let mut list = flat_list(1000);
    let tick = list.on_scroll(30_000).unwrap();
    assert!(!tick.fast);
    assert!(tick.rendered);
}

#[test]
fn scroll_is_ignored_before_setup() {
    let mut list = FastList::new(TestSource::flat(1000), ImmediateScheduler::new(), ListOptions::new());
    let tick = list.on_scroll(100).unwrap();
    assert!(!tick.rendered);
    assert!(list.pool().is_empty());
}

#[test]
fn two_phase_setup() {
    let mut list = FastList::new(TestSource::flat(1000), ImmediateScheduler::new(), ListOptions::new());

    let report = list.setup_phase1(500).unwrap();
    assert_eq!(report.bound, 10);
    assert_eq!(list.pool().len(), 10);
    assert!(
        list.scheduler()
            .is_attached(Target::Container, DirectEvent::Scroll)
    );

    let report = list.setup_phase2().unwrap();
    assert_eq!(report.bound, 25);
    assert_eq!(list.pool().len(), 35);
    assert_eq!(list.list_height(), 50_000);
}

#[test]
fn initial_scroll_top_is_clamped() {
    let options = ListOptions::new().with_initial_scroll_top(Some(1_000_000));
    let list = list_with(TestSource::flat(100), options);
    assert_eq!(list.scroll_top(), 5000 - 500);
    let w = list.window().unwrap();
    assert_eq!(w.end, 99);
    assert!(list.slot_for_index(99).is_some());
}

#[test]
fn sections_are_laid_out_with_headers() {
    let list = list_with(TestSource::sectioned(&[3, 10], 20), ListOptions::new());
    let headers = list.headers();
    assert_eq!(headers.len(), 2);
    assert_eq!((headers[0].offset, headers[0].height), (0, 170));
    assert_eq!((headers[1].offset, headers[1].height), (170, 520));
    assert_eq!(headers[1].ordinal, 1);
    assert_eq!(list.list_height(), 690);
    assert_eq!(list.source().section_calls, 2);

    let slot = list.slot(list.slot_for_index(3).unwrap()).unwrap();
    assert_eq!(slot.position(), 190);
    assert_eq!(slot.section(), Some(&1));
}

#[test]
fn async_population_reveals_when_resolved() {
    let mut list = list_with(TestSource::flat(1000).deferred(), ListOptions::new());
    assert_eq!(list.pending_population_count(), 35);

    let slot = list.slot_for_index(0).unwrap();
    assert_eq!(list.slot(slot).unwrap().state(), SlotState::Unpopulated);
    assert!(!list.slot(slot).unwrap().is_populated());

    list.source_mut().resolve_all();
    list.poll().unwrap();

    assert_eq!(list.pending_population_count(), 0);
    for (_, entry) in list.pool().slots() {
        assert_eq!(entry.state(), SlotState::Idle);
        assert!(entry.is_populated());
    }
    assert_consistent(&list);
}

#[test]
fn stale_population_is_discarded() {
    let mut list = list_with(TestSource::flat(1000).deferred(), ListOptions::new());
    list.on_scroll(20_000).unwrap();
    assert!(list.slot_for_index(0).is_none());
    assert_eq!(list.pending_population_count(), 35);

    list.source_mut().resolve_where(|index| index < 100);
    list.poll().unwrap();

    assert!(list.source().ready_log.is_empty());
    assert_eq!(list.pending_population_count(), 35);
    for (_, entry) in list.pool().slots() {
        assert_eq!(entry.state(), SlotState::Unpopulated);
    }
}

#[test]
fn unresolved_populations_do_not_pile_up() {
    let mut list = list_with(TestSource::flat(1000).deferred(), ListOptions::new());
    for step in 1..=20u64 {
        assert!(list.on_scroll(step * 1000).unwrap().rendered);
        assert_eq!(list.pending_population_count(), 35);
    }
    assert!(list.source().waiting.len() > 35);
}

#[test]
fn detail_is_populated_only_while_idle() {
    let mut list = list_with(TestSource::flat(1000).with_detail(), ListOptions::new());
    assert_eq!(list.source().detail_calls, 35);
    assert!(list.pool().slots().all(|(_, s)| s.is_detail_populated()));

    list.on_scroll(0).unwrap();
    let tick = list.on_scroll(300).unwrap();
    assert!(!tick.idle);
    assert!(tick.rendered);

    let slot = list.slot_for_index(35).unwrap();
    assert!(!list.slot(slot).unwrap().is_detail_populated());
    assert_eq!(list.source().unpopulate_detail_calls, 1);

    let tick = list.on_scroll(310).unwrap();
    assert!(tick.idle);
    assert!(list.slot(slot).unwrap().is_detail_populated());
}

#[test]
fn reload_hides_slots_beyond_the_end() {
    let mut list = flat_list(40);
    assert_eq!(list.pool().bound_count(), 35);

    list.source_mut().truncate(20);
    list.reload_data().unwrap();

    for (index, slot) in list.pool().bound() {
        let entry = list.slot(slot).unwrap();
        if index >= 20 {
            assert_eq!(entry.state(), SlotState::Hidden);
            assert!(!entry.is_populated());
        } else {
            assert_eq!(entry.state(), SlotState::Idle);
            assert!(entry.is_populated());
        }
    }
    assert_eq!(list.list_height(), 1000);
}

#[test]
fn resize_never_shrinks_the_budget_below_the_pool() {
    let mut list = flat_list(1000);
    assert_eq!(list.geometry().max_item_count, 35);

    list.on_resize(200).unwrap();
    assert_eq!(list.geometry().max_item_count, 35);
    assert_eq!(list.geometry().viewport_height, 200);

    list.on_resize(1000).unwrap();
    assert_eq!(list.geometry().max_item_count, 70);
    assert_eq!(list.pool().len(), 70);
    assert_consistent(&list);
}

#[test]
fn scroll_instantly_renders_at_rest() {
    let mut list = flat_list(1000);
    list.on_scroll(1000).unwrap();
    list.scroll_instantly(30_000).unwrap();
    assert_eq!(list.scroll_top(), 30_000);
    assert!(!list.geometry().fast);
    assert!(list.geometry().idle);
    assert!(list.slot_for_index(600).is_some());
}

#[test]
fn reorder_commits_the_permutation() {
    let mut list = flat_list(1000);
    let before = list.source().items.clone();
    let dragged = list.slot_for_index(5).unwrap();

    assert!(list.start_reorder(dragged, pointer(260)).unwrap());
    assert_eq!(list.slot(dragged).unwrap().state(), SlotState::Lifted);
    assert_eq!(list.mode(), ListMode::Reordering);
    assert!(
        list.scheduler()
            .is_attached(Target::Container, DirectEvent::PointerMove)
    );

    assert!(list.on_reorder_move(&[pointer(370)]));
    assert_eq!(list.slot(dragged).unwrap().tweak_delta(), 110);
    let displacement = list.displacement().unwrap();
    assert_eq!(displacement.move_up.len(), 2);
    assert!(displacement.move_down.is_empty());
    let six = list.slot_for_index(6).unwrap();
    assert_eq!(list.slot(six).unwrap().tweak_delta(), -50);
    assert_eq!(list.slot(six).unwrap().state(), SlotState::Displaced);

    assert!(list.end_reorder().unwrap());
    assert!(!list.is_reordering());
    assert!(
        !list
            .scheduler()
            .is_attached(Target::Container, DirectEvent::PointerMove)
    );

    let mut expected = before.clone();
    let item = expected.remove(5);
    expected.insert(7, item);
    assert_eq!(list.source().items, expected);
    assert_eq!(list.source().items[7], before[5]);
    assert_eq!(list.source().items.len(), before.len());

    assert_eq!(list.slot_for_index(7), Some(dragged));
    assert_eq!(list.slot(dragged).unwrap().position(), 350);
    for (_, entry) in list.pool().slots() {
        assert_eq!(entry.tweak_delta(), 0);
        assert_eq!(entry.state(), SlotState::Idle);
    }
    assert_eq!(list.mode(), ListMode::Normal);
    assert_consistent(&list);
}

#[test]
fn reorder_upwards_moves_the_item_up() {
    let mut list = flat_list(1000);
    let before = list.source().items.clone();
    let dragged = list.slot_for_index(5).unwrap();

    list.start_reorder(dragged, pointer(260)).unwrap();
    list.on_reorder_move(&[pointer(260 - 160)]);
    assert_eq!(list.displacement().unwrap().move_down.len(), 3);
    list.end_reorder().unwrap();

    assert_eq!(list.source().items[2], before[5]);
    assert_eq!(list.source().items[3], before[2]);
    assert_consistent(&list);
}

#[test]
fn only_one_reorder_at_a_time() {
    let mut list = flat_list(1000);
    let a = list.slot_for_index(2).unwrap();
    let b = list.slot_for_index(4).unwrap();

    assert!(list.start_reorder(a, pointer(120)).unwrap());
    assert!(!list.start_reorder(b, pointer(220)).unwrap());
    assert_eq!(list.reordering_slot(), Some(a));
    assert_eq!(list.scheduler().feedback_count(), 1);
}

#[test]
fn scrolling_during_a_drag_leaves_the_lifted_slot_alone() {
    let mut list = flat_list(1000);
    let dragged = list.slot_for_index(5).unwrap();
    list.start_reorder(dragged, pointer(260)).unwrap();

    assert!(list.on_scroll(400).unwrap().rendered);
    assert!(list.on_scroll(800).unwrap().rendered);

    assert_eq!(list.slot_for_index(5), Some(dragged));
    assert_eq!(list.slot(dragged).unwrap().state(), SlotState::Lifted);
    for index in 12..=45 {
        assert!(list.slot_for_index(index).is_some(), "index {index} unbound");
    }
    assert!(list.slot_for_index(11).is_none());
    assert_eq!(list.pool().len(), 35);
    assert_consistent(&list);

    list.end_reorder().unwrap();
    assert!(!list.is_reordering());
    assert_eq!(list.slot(dragged).unwrap().state(), SlotState::Idle);
    assert!(list.slot_for_index(11).is_some());
    assert_consistent(&list);
}

#[test]
fn reorder_ignores_foreign_pointers() {
    let mut list = flat_list(1000);
    let dragged = list.slot_for_index(5).unwrap();
    list.start_reorder(dragged, pointer(260)).unwrap();

    let other = PointerSample { id: 2, ..pointer(400) };
    assert!(!list.on_reorder_move(&[other]));
    assert!(!list.on_reorder_move(&[pointer(400), other]));
    assert_eq!(list.slot(dragged).unwrap().tweak_delta(), 0);
    assert_eq!(list.displacement(), Some(Displacement::default()));
}

#[test]
fn displacement_changes_are_applied_once() {
    let mut list = flat_list(1000);
    let dragged = list.slot_for_index(5).unwrap();
    list.start_reorder(dragged, pointer(260)).unwrap();

    list.on_reorder_move(&[pointer(320)]);
    let transitions = list.scheduler().transition_count();
    list.on_reorder_move(&[pointer(330)]);
    assert_eq!(list.scheduler().transition_count(), transitions);

    list.on_reorder_move(&[pointer(250)]);
    assert_eq!(list.scheduler().transition_count(), transitions + 1);
    let six = list.slot_for_index(6).unwrap();
    assert_eq!(list.slot(six).unwrap().tweak_delta(), 0);
    assert_eq!(list.slot(six).unwrap().state(), SlotState::Idle);
}

#[test]
fn cancel_reorder_is_a_no_op_move() {
    let mut list = flat_list(1000);
    let before = list.source().items.clone();
    let dragged = list.slot_for_index(5).unwrap();

    list.start_reorder(dragged, pointer(260)).unwrap();
    list.on_reorder_move(&[pointer(400)]);
    assert!(list.cancel_reorder().unwrap());

    assert_eq!(list.source().items, before);
    assert_eq!(list.slot_for_index(5), Some(dragged));
    assert!(!list.is_reordering());
    assert!(
        !list
            .scheduler()
            .is_attached(Target::Container, DirectEvent::PointerMove)
    );
    assert!(!list.cancel_reorder().unwrap());
}

#[test]
fn reorder_does_not_cross_sections() {
    let mut list = list_with(TestSource::sectioned(&[3, 10], 20), ListOptions::new());

    let last_of_first = list.slot_for_index(2).unwrap();
    list.start_reorder(last_of_first, pointer(130)).unwrap();
    list.on_reorder_move(&[pointer(330)]);
    assert_eq!(list.displacement(), Some(Displacement::default()));
    list.end_reorder().unwrap();

    let first = list.slot_for_index(0).unwrap();
    list.start_reorder(first, pointer(30)).unwrap();
    list.on_reorder_move(&[pointer(90)]);
    let displacement = list.displacement().unwrap();
    let second = list.slot_for_index(1).unwrap();
    assert_eq!(displacement.move_up, BTreeSet::from([second]));
    list.end_reorder().unwrap();

    assert_eq!(list.source().items[..3], [1001, 1000, 1002]);
    assert_eq!(list.source().sections, vec![3, 10]);
}

#[test]
fn compute_displacement_compares_against_origin() {
    let list = flat_list(1000);
    let dragged = list.slot_for_index(5).unwrap();

    let down = compute_displacement(list.pool(), dragged, 250, 60);
    assert_eq!(down.move_up, BTreeSet::from([list.slot_for_index(6).unwrap()]));
    assert!(down.move_down.is_empty());

    let up = compute_displacement(list.pool(), dragged, 250, -110);
    assert!(up.move_up.is_empty());
    assert_eq!(
        up.move_down,
        BTreeSet::from([list.slot_for_index(3).unwrap(), list.slot_for_index(4).unwrap()])
    );
}

#[test]
fn insertion_keeps_the_visible_content_when_scrolled() {
    let mut list = flat_list(1000);
    list.on_scroll(150).unwrap();
    list.drain_events().for_each(drop);
    let shown = list.slot_for_index(3).unwrap();

    list.source_mut().push_front(1);
    list.inserted_at_index(0).unwrap();

    assert_eq!(list.scroll_top(), 200);
    let events: Vec<ListEvent> = list.drain_events().collect();
    assert_eq!(events, vec![ListEvent::HiddenNewContent]);
    assert_eq!(list.slot_for_index(4), Some(shown));
    assert_eq!(list.slot(shown).unwrap().position(), 200);
    assert_eq!(list.list_height(), 50_050);
    assert_consistent(&list);
}

#[test]
fn insertion_at_the_top_is_animated() {
    let mut list = flat_list(1000);
    let first = list.slot_for_index(0).unwrap();
    let transitions = list.scheduler().transition_count();

    list.source_mut().push_front(1);
    list.inserted_at_index(0).unwrap();

    assert_eq!(list.scroll_top(), 0);
    assert_eq!(list.drain_events().count(), 0);
    assert_eq!(list.scheduler().transition_count(), transitions + 2);
    assert_eq!(list.slot_for_index(1), Some(first));

    let inserted = list.slot_for_index(0).unwrap();
    assert_eq!(list.slot(inserted).unwrap().state(), SlotState::Idle);
    assert_eq!(list.source().contents.get(&inserted), Some(&1));
    for (_, entry) in list.pool().slots() {
        assert_eq!(entry.tweak_delta(), 0);
    }
    assert_eq!(list.mode(), ListMode::Normal);
    assert_consistent(&list);
}

#[test]
fn inserted_placeholder_waits_for_its_content() {
    let mut list = list_with(TestSource::flat(1000).deferred(), ListOptions::new());
    list.source_mut().push_front(1);
    list.inserted_at_index(0).unwrap();

    let inserted = list.slot_for_index(0).unwrap();
    assert_eq!(list.slot(inserted).unwrap().state(), SlotState::Unpopulated);
    assert!(!list.slot(inserted).unwrap().is_populated());
    assert_eq!(list.mode(), ListMode::Reordering);

    list.source_mut().resolve_all();
    list.poll().unwrap();

    assert_eq!(list.slot(inserted).unwrap().state(), SlotState::Idle);
    assert!(list.slot(inserted).unwrap().is_populated());
    assert_eq!(list.source().contents.get(&inserted), Some(&1));
    assert_eq!(list.mode(), ListMode::Normal);
    assert_consistent(&list);
}

#[test]
fn insertion_is_instant_while_editing() {
    let mut list = flat_list(1000);
    list.set_editing(true);
    assert_eq!(list.mode(), ListMode::Editing);

    list.source_mut().push_front(1);
    list.inserted_at_index(0).unwrap();
    assert_eq!(list.scroll_top(), 50);
    assert_eq!(
        list.drain_events().collect::<Vec<_>>(),
        vec![ListEvent::HiddenNewContent]
    );
}

#[test]
fn insertion_away_from_the_top_is_rejected() {
    let mut list = flat_list(1000);
    let calls = list.source().populate_calls;
    assert_eq!(
        list.inserted_at_index(3),
        Err(ListError::UnsupportedInsertion { index: 3 })
    );
    assert_eq!(list.source().populate_calls, calls);
    assert_eq!(list.scroll_top(), 0);
}

#[test]
fn insertion_during_reorder_follows_the_drag() {
    let mut list = flat_list(1000);
    let before = list.source().items.clone();
    let dragged = list.slot_for_index(5).unwrap();
    list.start_reorder(dragged, pointer(260)).unwrap();

    list.source_mut().push_front(1);
    list.inserted_at_index(0).unwrap();
    assert_eq!(list.slot_for_index(6), Some(dragged));

    list.on_reorder_move(&[pointer(370)]);
    list.end_reorder().unwrap();
    assert_eq!(list.source().items[8], before[5]);
    assert_eq!(list.source().items[0], 1);
    assert_consistent(&list);
}

#[test]
fn selection_reports_the_bound_index() {
    let mut list = flat_list(1000);
    let slot = list.slot_for_index(3).unwrap();

    assert_eq!(list.select_slot(slot, pointer(170)), Some(3));
    assert_eq!(
        list.drain_events().collect::<Vec<_>>(),
        vec![ListEvent::ItemSelected {
            index: 3,
            pointer: pointer(170),
        }]
    );

    list.set_editing(true);
    assert_eq!(list.select_slot(slot, pointer(170)), None);
    assert_eq!(list.drain_events().count(), 0);
}

#[test]
fn unknown_slots_are_rejected() {
    let mut list = flat_list(10);
    let unknown = SlotId(99);
    assert_eq!(
        list.start_reorder(unknown, pointer(0)),
        Err(ListError::SlotOutOfRange { slot: unknown })
    );
    assert_eq!(list.select_slot(unknown, pointer(0)), None);
}

#[test]
fn destroy_detaches_and_unbinds() {
    let mut list = flat_list(1000);
    let dragged = list.slot_for_index(1).unwrap();
    list.start_reorder(dragged, pointer(60)).unwrap();

    list.destroy();
    let scheduler = list.scheduler();
    assert!(!scheduler.is_attached(Target::Container, DirectEvent::Scroll));
    assert!(!scheduler.is_attached(Target::Container, DirectEvent::PointerMove));
    assert_eq!(list.pool().bound_count(), 0);
    assert_eq!(list.pool().len(), 35);
    assert!(!list.is_reordering());
    assert!(!list.on_scroll(500).unwrap().rendered);
}

#[test]
fn completion_join_and_await() {
    use core::future::Future;
    use core::task::{Context, Poll, Waker};

    let (a, resolve_a) = Completion::pending();
    let (b, resolve_b) = Completion::pending();
    let joined = a.join(b);
    let mut fut = core::pin::pin!(joined.clone());
    let mut cx = Context::from_waker(Waker::noop());

    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
    resolve_a.resolve();
    assert!(!joined.is_done());
    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
    resolve_b.resolve();
    assert!(joined.is_done());
    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(()));

    assert!(Completion::ready().is_done());
    assert!(Completion::default().is_done());
}
