use lazyload::TickScheduler;

/// Coalesces tick requests so a burst of scroll/resize/mutation events costs one frame.
///
/// The host scheduler is only asked for a frame when none is pending. The frame callback must
/// call [`Self::take`] first; a `false` result means the request was cancelled and the frame
/// should do nothing.
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler<S> {
    host: S,
    pending: bool,
}

impl<S: TickScheduler> FrameScheduler<S> {
    pub fn new(host: S) -> Self {
        Self {
            host,
            pending: false,
        }
    }

    /// Returns `true` when a new frame was requested from the host.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.host.request_tick();
        true
    }

    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn host(&self) -> &S {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut S {
        &mut self.host
    }

    pub fn into_host(self) -> S {
        self.host
    }
}
