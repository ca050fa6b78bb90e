use alloc::string::String;

use lazyload::{LoadOutcome, RevealHandler};

use crate::{ImageElement, LoaderOptions, OnLoadCallback, PLACEHOLDER_SRC};

/// Swaps the real source into revealed images and keeps their state classes in sync.
///
/// Lifecycle of one element:
/// - [`Self::prepare`] at init: loading class, optional placeholder
/// - [`RevealHandler::reveal`] when it scrolls into view: `srcset`/`src` from the data attributes
/// - [`Self::settle`] when the host reports the load result: loaded/failed class, `on_load`
pub struct ImageRevealer<E> {
    use_placeholder: bool,
    loading_class: String,
    complete_class: String,
    failed_class: String,
    on_load: Option<OnLoadCallback<E>>,
}

impl<E: ImageElement> ImageRevealer<E> {
    pub fn new(options: &LoaderOptions<E>) -> Self {
        Self {
            use_placeholder: options.use_placeholder,
            loading_class: options.loading_class.clone(),
            complete_class: options.complete_class.clone(),
            failed_class: options.failed_class.clone(),
            on_load: options.on_load.clone(),
        }
    }

    pub fn prepare(&self, element: &E) {
        element.add_class(&self.loading_class);
        if self.use_placeholder {
            element.set_src(PLACEHOLDER_SRC);
        }
    }

    pub fn settle(&self, element: &E, outcome: LoadOutcome) {
        element.remove_class(&self.loading_class);
        match outcome {
            LoadOutcome::Loaded => element.add_class(&self.complete_class),
            LoadOutcome::Failed => element.add_class(&self.failed_class),
        }
        ltrace!(?outcome, "ImageRevealer::settle");
        if let Some(cb) = &self.on_load {
            cb(element, outcome);
        }
    }
}

impl<E: ImageElement> RevealHandler<E> for ImageRevealer<E> {
    fn reveal(&mut self, element: E) {
        if let Some(srcset) = element.data_srcset() {
            element.set_srcset(&srcset);
        }
        match element.data_src() {
            Some(src) => element.set_src(&src),
            None => {
                // Nothing to fetch, so no load event will ever arrive.
                lwarn!("revealed image has no data-src; marking it failed");
                self.settle(&element, LoadOutcome::Failed);
            }
        }
    }
}

impl<E> core::fmt::Debug for ImageRevealer<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageRevealer")
            .field("use_placeholder", &self.use_placeholder)
            .field("loading_class", &self.loading_class)
            .field("complete_class", &self.complete_class)
            .field("failed_class", &self.failed_class)
            .finish_non_exhaustive()
    }
}
