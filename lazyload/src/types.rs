use alloc::vec::Vec;

/// A bounding rectangle in the scroll axis, relative to the top of the viewport.
///
/// This mirrors the vertical half of a DOM `getBoundingClientRect()` result, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientRect {
    pub top: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// The visible vertical window in document coordinates.
///
/// Derived once per tick from the scroll offset and viewport height; never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportWindow {
    pub top: f64,
    pub bottom: f64,
}

impl ViewportWindow {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn from_scroll(scroll_offset: f64, viewport_height: f64) -> Self {
        Self {
            top: scroll_offset,
            bottom: scroll_offset + viewport_height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Strict overlap test against a `[start, end)` span in document coordinates.
    ///
    /// A span that only touches an edge does not overlap. A zero-height span sitting on either
    /// window edge is therefore invisible; no special case is made for it.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.top < end && self.bottom > start
    }

    /// Converts a client-relative rect to document coordinates and tests it for overlap.
    pub fn intersects(&self, rect: ClientRect) -> bool {
        let start = self.top + rect.top;
        let end = start + rect.height;
        self.overlaps(start, end)
    }
}

/// The result of a single scan tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutcome<E> {
    /// Elements that became visible this tick, in worklist order.
    pub revealed: Vec<E>,
    /// `true` when the worklist is empty after the tick.
    pub drained: bool,
}

impl<E> ScanOutcome<E> {
    pub(crate) fn drained() -> Self {
        Self {
            revealed: Vec::new(),
            drained: true,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.drained
    }
}

/// The host event that requested a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    Initial,
    Scroll,
    Resize,
    Mutation,
}

/// How loading a revealed image ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

impl LoadOutcome {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Failed)
    }
}
