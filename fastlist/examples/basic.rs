use fastlist::{
    FastList, ImmediateScheduler, ListOptions, Population, SectionHeader, SlotId, Source,
};

/// A flat list of labels, 48px per row.
struct Labels {
    items: Vec<String>,
    rendered: Vec<Option<String>>,
}

impl Source for Labels {
    type Section = ();
    type Item = String;

    fn full_length(&self) -> usize {
        self.items.len()
    }
    fn full_height(&self) -> u64 {
        self.items.len() as u64 * 48
    }
    fn item_height(&self) -> u32 {
        48
    }
    fn section_header_height(&self) -> u32 {
        0
    }
    fn full_section_height(&self, _section: &()) -> u64 {
        self.full_height()
    }
    fn index_at_position(&self, position: u64) -> usize {
        ((position / 48) as usize).min(self.items.len().saturating_sub(1))
    }
    fn position_for_index(&self, index: usize) -> u64 {
        index as u64 * 48
    }
    fn sections(&self) -> Vec<()> {
        vec![()]
    }
    fn section_for(&self, _index: usize) {}

    fn populate_item(&mut self, slot: SlotId, index: usize) -> Population {
        if self.rendered.len() <= slot.get() {
            self.rendered.resize(slot.get() + 1, None);
        }
        self.rendered[slot.get()] = self.items.get(index).cloned();
        Population::Ready
    }
    fn populate_section(&mut self, _header: &SectionHeader<()>) {}

    fn remove_at_index(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
    fn insert_at_index(&mut self, index: usize, item: String, _section: &()) {
        self.items.insert(index.min(self.items.len()), item);
    }
}

fn main() -> fastlist::Result<()> {
    let source = Labels {
        items: (0..100_000).map(|i| format!("row #{i}")).collect(),
        rendered: Vec::new(),
    };
    let mut list = FastList::new(source, ImmediateScheduler::new(), ListOptions::new());
    list.setup(640)?;
    println!("slots={} window={:?}", list.pool().len(), list.window());

    list.on_scroll(48 * 5_000)?;
    let window = list.window();
    println!("after scroll: window={window:?}");
    if let Some(w) = window {
        let slot = list.slot_for_index(w.critical_start);
        let entry = slot.and_then(|s| list.slot(s));
        println!(
            "first visible: {:?} at {:?}",
            slot.and_then(|s| list.source().rendered[s.get()].clone()),
            entry.map(|e| e.offset())
        );
    }
    println!("still {} slots for {} rows", list.pool().len(), list.source().items.len());
    Ok(())
}
