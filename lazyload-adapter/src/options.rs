use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use lazyload::LoadOutcome;

use crate::{Error, Result};

/// Selector used when none is given.
pub const DEFAULT_SELECTOR: &str = ".lazy-load";

/// Inline SVG shown until an image is revealed. It keeps a 756x499 aspect ratio so unsized
/// images still take up some room.
pub const PLACEHOLDER_SRC: &str = "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' width='200px' height='100px' viewBox='0 0 756 499'/>";

/// A callback fired once a revealed image has finished loading, successfully or not.
pub type OnLoadCallback<E> = Arc<dyn Fn(&E, LoadOutcome) + Send + Sync>;

/// Which elements to track.
#[derive(Clone)]
pub enum Selector<E> {
    /// A query resolved through an [`crate::ElementSource`] at construction.
    Query(String),
    /// An explicit collection.
    Elements(Vec<E>),
}

impl<E> Default for Selector<E> {
    fn default() -> Self {
        Self::Query(DEFAULT_SELECTOR.to_string())
    }
}

impl<E> From<&str> for Selector<E> {
    fn from(query: &str) -> Self {
        Self::Query(query.to_string())
    }
}

impl<E> From<String> for Selector<E> {
    fn from(query: String) -> Self {
        Self::Query(query)
    }
}

impl<E> From<Vec<E>> for Selector<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::Elements(elements)
    }
}

impl<E> core::fmt::Debug for Selector<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Query(q) => f.debug_tuple("Query").field(q).finish(),
            Self::Elements(v) => write!(f, "Elements(len={})", v.len()),
        }
    }
}

/// Configuration for [`crate::Controller`].
///
/// The callback is stored in an `Arc`, so cloning options does not clone closures.
pub struct LoaderOptions<E> {
    pub selector: Selector<E>,
    /// Swap in [`PLACEHOLDER_SRC`] while an image waits to be revealed.
    pub use_placeholder: bool,
    pub loading_class: String,
    pub complete_class: String,
    pub failed_class: String,
    /// Whether the host can deliver DOM subtree mutation notifications.
    ///
    /// When `false`, [`lazyload::Trigger::Mutation`] events are ignored and the controller does
    /// not ask the host to subscribe to them.
    pub observe_mutations: bool,
    pub on_load: Option<OnLoadCallback<E>>,
}

impl<E> LoaderOptions<E> {
    pub fn new() -> Self {
        Self {
            selector: Selector::default(),
            use_placeholder: true,
            loading_class: "loading".to_string(),
            complete_class: "loaded".to_string(),
            failed_class: "failed".to_string(),
            observe_mutations: true,
            on_load: None,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<Selector<E>>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_elements(mut self, elements: Vec<E>) -> Self {
        self.selector = Selector::Elements(elements);
        self
    }

    pub fn with_placeholder(mut self, use_placeholder: bool) -> Self {
        self.use_placeholder = use_placeholder;
        self
    }

    pub fn with_loading_class(mut self, class: impl Into<String>) -> Self {
        self.loading_class = class.into();
        self
    }

    pub fn with_complete_class(mut self, class: impl Into<String>) -> Self {
        self.complete_class = class.into();
        self
    }

    pub fn with_failed_class(mut self, class: impl Into<String>) -> Self {
        self.failed_class = class.into();
        self
    }

    pub fn with_observe_mutations(mut self, observe_mutations: bool) -> Self {
        self.observe_mutations = observe_mutations;
        self
    }

    pub fn with_on_load(
        mut self,
        on_load: impl Fn(&E, LoadOutcome) + Send + Sync + 'static,
    ) -> Self {
        self.on_load = Some(Arc::new(on_load));
        self
    }

    /// Checks the selector and class names before any element is touched.
    pub fn validate(&self) -> Result<()> {
        if let Selector::Query(query) = &self.selector {
            if query.trim().is_empty() {
                return Err(Error::EmptySelector);
            }
        }
        check_class("loading", &self.loading_class)?;
        check_class("complete", &self.complete_class)?;
        check_class("failed", &self.failed_class)?;
        Ok(())
    }
}

// `classList.add` rejects empty tokens and tokens containing whitespace.
fn check_class(role: &'static str, name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(|c| c.is_ascii_whitespace()) {
        return Err(Error::InvalidClassName {
            role,
            name: name.to_string(),
        });
    }
    Ok(())
}

impl<E> Default for LoaderOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for LoaderOptions<E> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            use_placeholder: self.use_placeholder,
            loading_class: self.loading_class.clone(),
            complete_class: self.complete_class.clone(),
            failed_class: self.failed_class.clone(),
            observe_mutations: self.observe_mutations,
            on_load: self.on_load.clone(),
        }
    }
}

impl<E> core::fmt::Debug for LoaderOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("selector", &self.selector)
            .field("use_placeholder", &self.use_placeholder)
            .field("loading_class", &self.loading_class)
            .field("complete_class", &self.complete_class)
            .field("failed_class", &self.failed_class)
            .field("observe_mutations", &self.observe_mutations)
            .finish_non_exhaustive()
    }
}
