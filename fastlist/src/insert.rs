use crate::{
    Completion, FastList, ListError, Result, Scheduler, Signal, SlotId, SlotState, Source, Target,
};

/// An animated insertion at the top of the list.
#[derive(Clone, Debug)]
pub(crate) enum Insertion {
    /// Every bound slot slides down by one item.
    PushingDown(Completion),
    /// The placeholder for index 0 waits for its pending content, which reveals it.
    AwaitingContent(SlotId),
    /// The placeholder for index 0 fades in.
    Revealing {
        slot: Option<SlotId>,
        completion: Completion,
    },
}

impl<Src: Source, Sch: Scheduler> FastList<Src, Sch> {
    /// Tells the list an item was inserted into the source at `index`.
    ///
    /// Only index 0 is supported; any other index is rejected with
    /// [`ListError::UnsupportedInsertion`] and nothing changes.
    ///
    /// When the list is scrolled past the first item, or while editing or another gesture owns
    /// the slots, the insertion is applied instantly and the scroll offset grows by one item so
    /// the visible content does not move ([`crate::ListEvent::HiddenNewContent`] is emitted).
    /// Otherwise the bound slots slide down first, then the new item is populated and revealed.
    pub fn inserted_at_index(&mut self, index: usize) -> Result<()> {
        vdebug!(index, "inserted at index");
        if index != 0 {
            vwarn!(index, "only insertions at index 0 are supported");
            return Err(ListError::UnsupportedInsertion { index });
        }

        let geometry = self.renderer.geometry;
        if geometry.top_position > geometry.item_height as u64
            || self.editing
            || self.reorder.is_some()
            || self.insertion.is_some()
        {
            if let Some(ctx) = self.reorder.as_mut() {
                ctx.shift_down(geometry.item_height);
            }
            if matches!(self.insertion, Some(Insertion::PushingDown(_))) {
                self.finish_push_down();
            }
            return self.insert_on_top(true).map(|_| ());
        }

        let item_height = geometry.item_height as i64;
        let pool = &mut self.renderer.pool;
        let first = pool.bound().next().map(|(_, slot)| slot);
        let pushed_down = match first {
            None => Completion::ready(),
            Some(first) => self.scheduler.transition(
                &mut || {
                    for (_, slot) in pool.slots_mut() {
                        if slot.index().is_some() {
                            slot.tweak_delta = item_height;
                        }
                    }
                },
                Target::Slot(first),
                Signal::TransitionEnd,
            ),
        };
        self.insertion = Some(Insertion::PushingDown(pushed_down));
        self.advance()
    }

    fn insert_on_top(&mut self, keep_scroll_position: bool) -> Result<Option<SlotId>> {
        let renderer = &mut self.renderer;
        let mut result = Ok(None);
        self.scheduler.mutation(&mut || {
            result = renderer.insert_on_top(keep_scroll_position);
        });
        self.remap_reveals(|index| index + 1);
        result
    }

    /// Applies the shift of a push-down that has not completed yet, without revealing its
    /// placeholder. The next render binds index 0 like any other index.
    fn finish_push_down(&mut self) {
        vdebug!("finishing push-down early");
        self.insertion = None;
        let renderer = &mut self.renderer;
        self.scheduler.mutation(&mut || renderer.shift_on_top());
        self.remap_reveals(|index| index + 1);
    }

    pub(crate) fn advance_insertion(&mut self) -> Result<bool> {
        match &self.insertion {
            Some(Insertion::PushingDown(completion)) if completion.is_done() => {
                let slot = match self.insert_on_top(false) {
                    Ok(slot) => slot,
                    Err(err) => {
                        self.insertion = None;
                        return Err(err);
                    }
                };
                if let Some(slot) = slot {
                    if self.renderer.pool.entry(slot).state == SlotState::Unpopulated {
                        self.insertion = Some(Insertion::AwaitingContent(slot));
                        return Ok(true);
                    }
                }
                let pool = &mut self.renderer.pool;
                let completion = match slot {
                    None => Completion::ready(),
                    Some(slot) => self.scheduler.transition(
                        &mut || {
                            let entry = pool.entry_mut(slot);
                            if entry.state == SlotState::New {
                                entry.state = SlotState::Revealing;
                            }
                        },
                        Target::Slot(slot),
                        Signal::TransitionEnd,
                    ),
                };
                self.insertion = Some(Insertion::Revealing { slot, completion });
                Ok(true)
            }
            Some(Insertion::AwaitingContent(slot)) => {
                let state = self.renderer.pool.entry(*slot).state;
                if matches!(state, SlotState::Unpopulated | SlotState::Revealing) {
                    return Ok(false);
                }
                self.insertion = None;
                vtrace!("insertion revealed with its content");
                Ok(true)
            }
            Some(Insertion::Revealing { slot, completion }) if completion.is_done() => {
                let slot = *slot;
                if let Some(entry) = slot.and_then(|slot| self.renderer.pool.get_mut(slot)) {
                    if entry.state == SlotState::Revealing {
                        entry.state = SlotState::Idle;
                    }
                }
                self.insertion = None;
                vtrace!("insertion revealed");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
