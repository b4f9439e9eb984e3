use fastlist::{ListOptions, PointerSample, Population, Signal, Target};
use fastlist_adapter::{Controller, GroupedSource};

fn main() -> fastlist::Result<()> {
    // Example: a frame loop driving the list without holding any UI objects.
    //
    // An adapter would:
    // - mount once the container has a size, then call tick(now_ms) every frame
    // - forward scroll, pointer and transition-end events
    // - draw every bound slot at `offset()`, styled by `state()`
    let mut source = GroupedSource::new(56, 32, |slot, index, title: &String| {
        println!("  populate slot {} <- #{index} {title}", slot.get());
        Population::Ready
    });
    source.push_section("Favorites", (0..4).map(|i| format!("favorite {i}")));
    source.push_section("Library", (0..500).map(|i| format!("track {i}")));

    let mut c = Controller::new(source, ListOptions::new());
    c.mount(400, 0)?;

    let mut now_ms = 0u64;
    while c.is_setting_up() {
        now_ms += 16;
        c.tick(now_ms)?;
    }
    println!("mounted: {} slots, height {}", c.list().pool().len(), c.list().list_height());

    // Drag the second favorite below the third.
    if let Some(slot) = c.list().slot_for_index(1) {
        let start = PointerSample { x: 20, y: 120, id: 1, timestamp_ms: now_ms };
        c.list_mut().start_reorder(slot, start)?;
        c.on_pointer_move(&[PointerSample { y: 190, ..start }]);
        c.list_mut().end_reorder()?;
        while c.list().is_reordering() {
            now_ms += 16;
            c.on_signal(Target::Slot(slot), Signal::TransitionEnd)?;
            c.tick(now_ms)?;
        }
    }
    let favorites: Vec<&String> = c.list().source().iter().take(4).collect();
    println!("favorites after reorder: {favorites:?}");

    for position in [400u64, 800, 1_200, 1_600] {
        now_ms += 16;
        let tick = c.on_scroll(position, now_ms)?;
        println!("scroll {position}: {tick:?} window={:?}", c.list().window());
    }
    Ok(())
}
