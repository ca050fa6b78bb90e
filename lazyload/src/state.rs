use crate::{ViewportProvider, ViewportWindow};

/// A lightweight, serializable snapshot of the scroll position and viewport height.
///
/// Hosts that already read both values once per frame can hand this to the scanner instead of
/// implementing [`ViewportProvider`] themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub height: f64,
}

impl ViewportState {
    pub fn new(scroll_offset: f64, height: f64) -> Self {
        Self {
            scroll_offset,
            height,
        }
    }

    pub fn window(&self) -> ViewportWindow {
        ViewportWindow::from_scroll(self.scroll_offset, self.height)
    }
}

impl ViewportProvider for ViewportState {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }
}
