//! Adapter utilities for the `lazyload` crate.
//!
//! The `lazyload` crate is UI-agnostic and focuses on the visibility scan. This crate provides
//! the framework-neutral pieces a host binding needs around it:
//!
//! - Image reveal: placeholder, `data-src`/`data-srcset` swap, loading/loaded/failed classes
//! - Frame coalescing for scroll/resize/mutation bursts
//! - A [`Controller`] that owns the worklist from construction to teardown
//!
//! This crate does not bind to `web-sys` or any other DOM; hosts implement [`ImageElement`],
//! [`ElementSource`] and the `lazyload` host traits.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod element;
mod error;
mod options;
mod reveal;
mod scheduler;

#[cfg(test)]
mod tests;

pub use controller::{Controller, EventResponse, FrameReport, Phase, Subscriptions, lazy_load};
pub use element::{ElementSource, ImageElement};
pub use error::{Error, Result};
pub use options::{DEFAULT_SELECTOR, LoaderOptions, OnLoadCallback, PLACEHOLDER_SRC, Selector};
pub use reveal::ImageRevealer;
pub use scheduler::FrameScheduler;
