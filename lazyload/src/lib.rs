//! A headless viewport scanner for lazily revealing images.
//!
//! For the image attribute swap, frame coalescing and the full controller, see the
//! `lazyload-adapter` crate.
//!
//! This crate focuses on the one piece with real invariants: deciding, once per frame, which
//! tracked elements intersect the visible scroll window, and removing exactly those from a
//! shrinking worklist.
//!
//! It is UI-agnostic. A DOM/GUI layer is expected to provide:
//! - element bounding rectangles (client-relative top and height)
//! - scroll offset and viewport height
//! - a way to run a callback before the next paint
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod host;
mod scanner;
mod state;
mod types;


pub use host::{GeometryProvider, RevealHandler, TickScheduler, ViewportProvider};
pub use scanner::{Worklist, scan};
pub use state::ViewportState;
pub use types::{ClientRect, LoadOutcome, ScanOutcome, Trigger, ViewportWindow};
