//! Adapter utilities for the `fastlist` crate.
//!
//! The `fastlist` crate is UI-agnostic and only consumes a scheduler and a data source. This
//! crate provides the framework-neutral pieces most hosts need around it:
//!
//! - A frame-coalescing scheduler with a timeout fallback for transitions
//! - A controller owning the list's timers (delayed second setup phase, scroll-stop re-render)
//! - An in-memory sectioned data source
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod frame;
mod grouped;


pub use controller::Controller;
pub use frame::{FrameReport, FrameScheduler};
pub use grouped::GroupedSource;
