use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use crate::{DirectEvent, Signal, Target};

#[derive(Debug, Default)]
struct Shared {
    done: bool,
    wakers: Vec<Waker>,
}

/// A single-threaded awaitable returned by scheduler phases and pending populations.
///
/// The list never blocks on it: state machines check [`Completion::is_done`] from
/// [`crate::FastList::poll`]. Hosts that run an executor can `.await` it instead.
#[derive(Clone, Debug)]
pub struct Completion {
    parts: Vec<Rc<RefCell<Shared>>>,
}

/// Resolves the paired [`Completion`].
#[derive(Debug)]
pub struct Resolver {
    shared: Rc<RefCell<Shared>>,
}

impl Completion {
    /// An already resolved completion.
    pub fn ready() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn pending() -> (Self, Resolver) {
        let shared = Rc::new(RefCell::new(Shared::default()));
        let completion = Self {
            parts: vec![Rc::clone(&shared)],
        };
        (completion, Resolver { shared })
    }

    /// Resolves once both `self` and `other` have.
    pub fn join(mut self, other: Completion) -> Self {
        self.parts.extend(other.parts);
        self
    }

    pub fn is_done(&self) -> bool {
        self.parts.iter().all(|part| part.borrow().done)
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::ready()
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut pending = false;
        for part in &self.parts {
            let mut shared = part.borrow_mut();
            if !shared.done {
                pending = true;
                if !shared.wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    shared.wakers.push(cx.waker().clone());
                }
            }
        }
        if pending { Poll::Pending } else { Poll::Ready(()) }
    }
}

impl Resolver {
    pub fn resolve(self) {
        let wakers = {
            let mut shared = self.shared.borrow_mut();
            shared.done = true;
            core::mem::take(&mut shared.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.shared.borrow().done
    }
}

/// When it is safe to touch layout and visuals.
///
/// Blocks run against the list's model; the scheduler decides when the host flushes them and
/// when the returned completion resolves.
pub trait Scheduler {
    /// Structural or content change.
    fn mutation(&mut self, block: &mut dyn FnMut()) -> Completion;

    /// Animated change; resolves on `signal` from `target` (or a timeout fallback).
    fn transition(&mut self, block: &mut dyn FnMut(), target: Target, signal: Signal)
    -> Completion;

    /// Gesture-driven visual change; resolves like [`Scheduler::transition`].
    fn feedback(&mut self, block: &mut dyn FnMut(), target: Target, signal: Signal) -> Completion;

    /// Starts delivering `event` from `target` immediately, outside the phase queue.
    fn attach_direct(&mut self, target: Target, event: DirectEvent);

    fn detach_direct(&mut self, target: Target, event: DirectEvent);
}

/// Synchronous scheduler: runs every block immediately and resolves every completion at once.
///
/// Intended for tests and headless hosts without animations.
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    attached: Vec<(Target, DirectEvent)>,
    mutations: usize,
    transitions: usize,
    feedbacks: usize,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, target: Target, event: DirectEvent) -> bool {
        self.attached.contains(&(target, event))
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    pub fn transition_count(&self) -> usize {
        self.transitions
    }

    pub fn feedback_count(&self) -> usize {
        self.feedbacks
    }
}

impl Scheduler for ImmediateScheduler {
    fn mutation(&mut self, block: &mut dyn FnMut()) -> Completion {
        self.mutations += 1;
        block();
        Completion::ready()
    }

    fn transition(
        &mut self,
        block: &mut dyn FnMut(),
        _target: Target,
        _signal: Signal,
    ) -> Completion {
        self.transitions += 1;
        block();
        Completion::ready()
    }

    fn feedback(&mut self, block: &mut dyn FnMut(), _target: Target, _signal: Signal) -> Completion {
        self.feedbacks += 1;
        block();
        Completion::ready()
    }

    fn attach_direct(&mut self, target: Target, event: DirectEvent) {
        if !self.is_attached(target, event) {
            self.attached.push((target, event));
        }
    }

    fn detach_direct(&mut self, target: Target, event: DirectEvent) {
        self.attached.retain(|entry| *entry != (target, event));
    }
}
