//! Drag-to-reorder.
//!
//! A gesture goes `Idle -> Dragging -> Settling -> Idle`:
//!
//! 1) [`FastList::start_reorder`] lifts a slot and starts listening for pointer moves on the
//!    direct-attach path.
//! 2) [`FastList::on_reorder_move`] follows the pointer and shifts the slots it passes.
//! 3) [`FastList::end_reorder`] stops listening, animates everything into place and, once both
//!    animations complete, commits the move to the source.
//!
//! Only slots sharing the dragged slot's section are displaced; moving across sections is not
//! supported.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::recycler::{SlotPool, moved_index};
use crate::{
    Completion, DirectEvent, FastList, PointerSample, Result, Scheduler, Signal, SlotId,
    SlotState, Source, Target,
};

#[derive(Clone, Debug)]
pub(crate) enum ReorderPhase {
    Dragging,
    Settling {
        completion: Completion,
        target_index: usize,
    },
}

/// The one active gesture.
#[derive(Clone, Debug)]
pub(crate) struct ReorderContext {
    slot: SlotId,
    origin_index: usize,
    origin_position: u64,
    initial: PointerSample,
    last_y: i64,
    move_up: BTreeSet<SlotId>,
    move_down: BTreeSet<SlotId>,
    phase: ReorderPhase,
}

impl ReorderContext {
    /// Follows an insertion above the list: every index and position moved down by one item.
    pub(crate) fn shift_down(&mut self, item_height: u32) {
        self.origin_index += 1;
        self.origin_position += item_height as u64;
        if let ReorderPhase::Settling { target_index, .. } = &mut self.phase {
            *target_index += 1;
        }
    }
}

/// Slots the dragged slot has passed.
///
/// `move_down` holds slots that sat before the drag origin and now sit after the dragged slot;
/// `move_up` holds slots that sat after the origin and now sit before it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Displacement {
    pub move_up: BTreeSet<SlotId>,
    pub move_down: BTreeSet<SlotId>,
}

/// Computes the displacement sets for a slot dragged `delta` pixels from `origin`.
pub fn compute_displacement<S: PartialEq>(
    pool: &SlotPool<S>,
    dragged: SlotId,
    origin: u64,
    delta: i64,
) -> Displacement {
    let mut out = Displacement::default();
    let Some(dragged_slot) = pool.get(dragged) else {
        return out;
    };
    let section = dragged_slot.section();
    let origin = origin as i64;
    let tweaked = origin + delta;

    for (id, slot) in pool.slots() {
        if id == dragged
            || slot.index().is_none()
            || slot.state() == SlotState::Hidden
            || slot.section() != section
        {
            continue;
        }
        let position = slot.position() as i64;
        if position < origin && tweaked < position {
            out.move_down.insert(id);
        } else if position > origin && tweaked > position {
            out.move_up.insert(id);
        }
    }
    out
}

impl<Src: Source, Sch: Scheduler> FastList<Src, Sch> {
    /// Starts dragging `slot` from `pointer`.
    ///
    /// Returns `Ok(false)` when a gesture or an insertion animation is already running, or when
    /// the slot is not bound to an index.
    pub fn start_reorder(&mut self, slot: SlotId, pointer: PointerSample) -> Result<bool> {
        if self.reorder.is_some() || self.insertion.is_some() {
            vdebug!(?slot, "reorder already in progress, ignoring");
            return Ok(false);
        }
        let entry = self.renderer.pool.try_get(slot)?;
        let Some(origin_index) = entry.index() else {
            return Ok(false);
        };
        let origin_position = entry.position();
        vdebug!(origin_index, origin_position, "start reorder");

        let pool = &mut self.renderer.pool;
        self.scheduler.feedback(
            &mut || pool.entry_mut(slot).state = SlotState::Lifted,
            Target::Slot(slot),
            Signal::TransitionEnd,
        );
        self.scheduler
            .attach_direct(Target::Container, DirectEvent::PointerMove);

        self.reorder = Some(ReorderContext {
            slot,
            origin_index,
            origin_position,
            initial: pointer,
            last_y: pointer.y,
            move_up: BTreeSet::new(),
            move_down: BTreeSet::new(),
            phase: ReorderPhase::Dragging,
        });
        Ok(true)
    }

    /// Follows the pointer of the active gesture.
    ///
    /// `samples` holds every active pointer; multi-pointer events and pointers other than the
    /// one that started the drag are ignored. Returns whether the event was handled.
    pub fn on_reorder_move(&mut self, samples: &[PointerSample]) -> bool {
        let Some(ctx) = self.reorder.as_mut() else {
            return false;
        };
        if !matches!(ctx.phase, ReorderPhase::Dragging) {
            return false;
        }
        let [sample] = samples else {
            return false;
        };
        if sample.id != ctx.initial.id {
            return false;
        }

        ctx.last_y = sample.y;
        let delta = sample.y - ctx.initial.y;
        let slot = ctx.slot;

        let pool = &mut self.renderer.pool;
        self.scheduler.feedback(
            &mut || pool.entry_mut(slot).tweak_delta = delta,
            Target::Slot(slot),
            Signal::TransitionEnd,
        );
        self.update_displacement(delta);
        true
    }

    /// Recomputes the displacement sets and animates only the slots whose membership changed.
    fn update_displacement(&mut self, delta: i64) {
        let Some(ctx) = self.reorder.as_mut() else {
            return;
        };
        let next = compute_displacement(&self.renderer.pool, ctx.slot, ctx.origin_position, delta);
        let item_height = self.renderer.geometry.item_height as i64;

        let mut changed: Vec<(SlotId, i64)> = Vec::new();
        changed.extend(next.move_up.difference(&ctx.move_up).map(|&s| (s, -item_height)));
        changed.extend(next.move_down.difference(&ctx.move_down).map(|&s| (s, item_height)));
        changed.extend(ctx.move_up.difference(&next.move_up).map(|&s| (s, 0)));
        changed.extend(ctx.move_down.difference(&next.move_down).map(|&s| (s, 0)));

        ctx.move_up = next.move_up;
        ctx.move_down = next.move_down;

        let Some(&(first, _)) = changed.first() else {
            return;
        };
        vtrace!(
            changed = changed.len(),
            up = ctx.move_up.len(),
            down = ctx.move_down.len(),
            "displacement changed"
        );
        let pool = &mut self.renderer.pool;
        self.scheduler.transition(
            &mut || {
                for &(slot, tweak) in &changed {
                    let entry = pool.entry_mut(slot);
                    entry.tweak_delta = tweak;
                    entry.state = if tweak == 0 {
                        SlotState::Idle
                    } else {
                        SlotState::Displaced
                    };
                }
            },
            Target::Slot(first),
            Signal::TransitionEnd,
        );
    }

    /// Ends the active gesture at the last pointer position.
    ///
    /// The move listener is detached before anything else. Returns `Ok(false)` when no gesture
    /// was dragging.
    pub fn end_reorder(&mut self) -> Result<bool> {
        let Some(ctx) = self.reorder.as_ref() else {
            return Ok(false);
        };
        if !matches!(ctx.phase, ReorderPhase::Dragging) {
            return Ok(false);
        }
        self.scheduler
            .detach_direct(Target::Container, DirectEvent::PointerMove);

        let delta = ctx.last_y - ctx.initial.y;
        self.update_displacement(delta);

        let Some(ctx) = self.reorder.as_mut() else {
            return Ok(false);
        };
        let shift = ctx.move_up.len() as i64 - ctx.move_down.len() as i64;
        let target_index = (ctx.origin_index as i64 + shift).max(0) as usize;
        let final_tweak = shift * self.renderer.geometry.item_height as i64;
        let displaced: Vec<SlotId> = ctx.move_up.union(&ctx.move_down).copied().collect();
        let slot = ctx.slot;
        vdebug!(
            origin_index = ctx.origin_index,
            target_index,
            "end reorder"
        );

        let pool = &mut self.renderer.pool;
        let displaced_done = match displaced.first() {
            None => Completion::ready(),
            Some(&first) => self.scheduler.transition(
                &mut || {
                    for &s in &displaced {
                        pool.entry_mut(s).state = SlotState::Settling;
                    }
                },
                Target::Slot(first),
                Signal::TransitionEnd,
            ),
        };
        let dragged_done = self.scheduler.transition(
            &mut || {
                let entry = pool.entry_mut(slot);
                entry.tweak_delta = final_tweak;
                entry.state = SlotState::Settling;
            },
            Target::Slot(slot),
            Signal::TransitionEnd,
        );

        ctx.phase = ReorderPhase::Settling {
            completion: displaced_done.join(dragged_done),
            target_index,
        };
        self.advance()?;
        Ok(true)
    }

    /// Drops the gesture back where it started. Commits a no-op move.
    pub fn cancel_reorder(&mut self) -> Result<bool> {
        match self.reorder.as_mut() {
            Some(ctx) if matches!(ctx.phase, ReorderPhase::Dragging) => {
                ctx.last_y = ctx.initial.y;
            }
            _ => return Ok(false),
        }
        self.end_reorder()
    }

    pub fn is_reordering(&self) -> bool {
        self.reorder.is_some()
    }

    /// The slot being dragged, if any.
    pub fn reordering_slot(&self) -> Option<SlotId> {
        self.reorder.as_ref().map(|ctx| ctx.slot)
    }

    /// Current displacement sets of the active gesture.
    pub fn displacement(&self) -> Option<Displacement> {
        self.reorder.as_ref().map(|ctx| Displacement {
            move_up: ctx.move_up.clone(),
            move_down: ctx.move_down.clone(),
        })
    }

    pub(crate) fn advance_reorder(&mut self) -> Result<bool> {
        let Some(ctx) = self.reorder.as_ref() else {
            return Ok(false);
        };
        let ReorderPhase::Settling {
            completion,
            target_index,
        } = &ctx.phase
        else {
            return Ok(false);
        };
        if !completion.is_done() {
            return Ok(false);
        }
        let (from, to, slot) = (ctx.origin_index, *target_index, ctx.slot);
        self.reorder = None;

        let mut section = self.renderer.pool.entry(slot).section().cloned();
        let renderer = &mut self.renderer;
        let mut result = Ok(());
        self.scheduler.mutation(&mut || {
            result = renderer.commit_move(from, to, section.take()).map(|_| ());
        });
        self.remap_reveals(|index| moved_index(index, from, to));
        result?;
        Ok(true)
    }
}
