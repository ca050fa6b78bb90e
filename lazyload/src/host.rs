//! Seams to the host environment.
//!
//! None of these traits hold UI objects themselves; a browser binding implements them over
//! `window`/`document`, a test harness over plain structs.

use crate::{ClientRect, ViewportWindow};

/// Answers "where is this element right now", like `getBoundingClientRect()`.
pub trait GeometryProvider<E: ?Sized> {
    fn client_rect(&self, element: &E) -> ClientRect;
}

impl<E: ?Sized, F> GeometryProvider<E> for F
where
    F: Fn(&E) -> ClientRect,
{
    fn client_rect(&self, element: &E) -> ClientRect {
        self(element)
    }
}

/// Current vertical scroll offset and visible height of the document viewport.
pub trait ViewportProvider {
    fn scroll_offset(&self) -> f64;

    fn viewport_height(&self) -> f64;

    fn window(&self) -> ViewportWindow {
        ViewportWindow::from_scroll(self.scroll_offset(), self.viewport_height())
    }
}

/// Requests one frame callback before the next paint (`requestAnimationFrame`).
///
/// Implementations are not required to coalesce; see `lazyload_adapter::FrameScheduler`.
pub trait TickScheduler {
    fn request_tick(&mut self);
}

/// Receives every element the scanner reveals, exactly once.
pub trait RevealHandler<E> {
    fn reveal(&mut self, element: E);
}
