use crate::{Geometry, Source, Window};

/// Computes the critical (visible) range and the render window around it.
///
/// The render-ahead budget left after the critical range is split so that `switch_window`
/// items stay behind the direction of travel and the rest go ahead of it. A window clipped at
/// either end of the list gives the clipped share to the other side.
///
/// Returns `None` for an empty source. Otherwise the result always satisfies
/// `start <= critical_start <= critical_end <= end <= full_length - 1`.
pub fn compute_indices<S: Source + ?Sized>(source: &S, geometry: &Geometry) -> Option<Window> {
    let length = source.full_length();
    if length == 0 {
        return None;
    }
    let last_index = length - 1;

    let top = geometry.top_position;
    let bottom = geometry.bottom_position().saturating_sub(1).max(top);
    let critical_start = source.index_at_position(top).min(last_index);
    let critical_end = source
        .index_at_position(bottom)
        .min(last_index)
        .max(critical_start);

    let span = (critical_end - critical_start) as i64;
    let can_prerender = (geometry.max_item_count as i64 - span - 1).max(0);
    let before = (geometry.switch_window as i64).min(can_prerender);
    let after = can_prerender - before;

    let (mut start, mut end) = if geometry.forward {
        (critical_start as i64 - before, critical_end as i64 + after)
    } else {
        (critical_start as i64 - after, critical_end as i64 + before)
    };

    let last = last_index as i64;
    if start < 0 {
        let extra = -start;
        start = 0;
        end = last.min(end + extra);
    }
    if end > last {
        let extra = end - last;
        end = last;
        start = (start - extra).max(0);
    }

    vtrace!(
        top,
        critical_start,
        critical_end,
        start,
        end,
        "compute_indices"
    );

    Some(Window {
        critical_start,
        critical_end,
        start: start as usize,
        end: end as usize,
    })
}
