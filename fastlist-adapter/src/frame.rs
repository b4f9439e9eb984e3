use alloc::vec::Vec;

use fastlist::{Completion, DirectEvent, Resolver, Scheduler, Signal, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Transition,
    Feedback,
}

/// A transition or feedback completion waiting for its host signal.
#[derive(Debug)]
struct Wait {
    phase: Phase,
    target: Target,
    signal: Signal,
    deadline_ms: u64,
    resolver: Resolver,
}

impl Wait {
    fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }
}

/// What a call to [`FrameScheduler::frame`] resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub mutations: usize,
    /// Transitions and feedbacks resolved by the timeout fallback.
    pub timed_out: usize,
}

/// Frame-coalescing [`Scheduler`].
///
/// Blocks run against the model right away; the host flushes the model to the screen once per
/// frame. Completions follow the host:
/// - mutation completions resolve on the next [`FrameScheduler::frame`]
/// - transition and feedback completions resolve when the host reports the watched signal via
///   [`FrameScheduler::signal`], or once `timeout_ms` has elapsed without it
#[derive(Debug)]
pub struct FrameScheduler {
    now_ms: u64,
    timeout_ms: u64,
    mutations: Vec<Resolver>,
    waits: Vec<Wait>,
    attached: Vec<(Target, DirectEvent)>,
}

impl FrameScheduler {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            now_ms: 0,
            timeout_ms,
            mutations: Vec::new(),
            waits: Vec::new(),
            attached: Vec::new(),
        }
    }

    pub fn from_options(options: &fastlist::ListOptions) -> Self {
        Self::new(options.transition_timeout_ms)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Marks a frame boundary: resolves queued mutations and expired transitions.
    pub fn frame(&mut self, now_ms: u64) -> FrameReport {
        self.now_ms = self.now_ms.max(now_ms);
        let now_ms = self.now_ms;

        let mutations = core::mem::take(&mut self.mutations);
        let mut report = FrameReport {
            mutations: mutations.len(),
            timed_out: 0,
        };
        for resolver in mutations {
            resolver.resolve();
        }

        let (expired, waiting): (Vec<Wait>, Vec<Wait>) = core::mem::take(&mut self.waits)
            .into_iter()
            .partition(|wait| wait.is_expired(now_ms));
        self.waits = waiting;
        report.timed_out = expired.len();
        for wait in expired {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "fastlist_adapter",
                phase = ?wait.phase,
                target_element = ?wait.target,
                "completion signal timed out"
            );
            wait.resolver.resolve();
        }
        report
    }

    /// Delivers a host signal from `target`, resolving every completion watching for it.
    ///
    /// Returns how many completions were resolved.
    pub fn signal(&mut self, target: Target, signal: Signal) -> usize {
        let (matched, waiting): (Vec<Wait>, Vec<Wait>) = core::mem::take(&mut self.waits)
            .into_iter()
            .partition(|wait| wait.target == target && wait.signal == signal);
        self.waits = waiting;
        let resolved = matched.len();
        for wait in matched {
            wait.resolver.resolve();
        }
        resolved
    }

    /// Transitions and feedbacks still waiting for a signal.
    pub fn pending_waits(&self) -> usize {
        self.waits.len()
    }

    pub fn pending_feedbacks(&self) -> usize {
        self.waits
            .iter()
            .filter(|wait| wait.phase == Phase::Feedback)
            .count()
    }

    pub fn is_attached(&self, target: Target, event: DirectEvent) -> bool {
        self.attached.contains(&(target, event))
    }

    fn wait(&mut self, phase: Phase, target: Target, signal: Signal) -> Completion {
        let (completion, resolver) = Completion::pending();
        self.waits.push(Wait {
            phase,
            target,
            signal,
            deadline_ms: self.now_ms.saturating_add(self.timeout_ms),
            resolver,
        });
        completion
    }
}

impl Scheduler for FrameScheduler {
    fn mutation(&mut self, block: &mut dyn FnMut()) -> Completion {
        block();
        let (completion, resolver) = Completion::pending();
        self.mutations.push(resolver);
        completion
    }

    fn transition(
        &mut self,
        block: &mut dyn FnMut(),
        target: Target,
        signal: Signal,
    ) -> Completion {
        block();
        self.wait(Phase::Transition, target, signal)
    }

    fn feedback(&mut self, block: &mut dyn FnMut(), target: Target, signal: Signal) -> Completion {
        block();
        self.wait(Phase::Feedback, target, signal)
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
