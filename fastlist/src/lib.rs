//! A headless, recycling list renderer.
//!
//! For frame scheduling, timers and a ready-made data source, see the `fastlist-adapter` crate.
//!
//! The list displays an arbitrarily long, sectioned collection of fixed-height items while
//! keeping only a bounded pool of slots materialized. As the viewport scrolls, slots that fall
//! out of the render window are rebound to the indices that enter it, furthest first.
//!
//! On top of windowing it supports:
//! - asynchronous per-item population that never blocks sibling items
//! - fast-scroll detection with hysteresis (rendering is skipped while flinging)
//! - drag-to-reorder within a section, with animated displacement and settling
//! - animated insertion at the top of the list
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - a [`Source`] over its collection that writes content into its own elements
//! - a [`Scheduler`] deciding when model changes are flushed to the screen
//! - viewport height, scroll offsets and pointer samples
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod geometry;
mod insert;
mod list;
mod options;
mod recycler;
mod reorder;
mod scheduler;
mod scroll;
mod source;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::{ListError, Result};
pub use geometry::Geometry;
pub use list::{FastList, RenderRequest};
pub use options::ListOptions;
pub use recycler::{Claim, Slot, SlotPool, recycle};
pub use reorder::{Displacement, compute_displacement};
pub use scheduler::{Completion, ImmediateScheduler, Resolver, Scheduler};
pub use scroll::{is_fast, is_forward, is_idle};
pub use source::{Population, Source};
pub use types::{
    DirectEvent, ListEvent, ListMode, PointerSample, RenderReport, ScrollTick, SectionHeader,
    Signal, SlotId, SlotState, Target, Window,
};
pub use window::compute_indices;
