use alloc::string::String;
use alloc::vec::Vec;

/// A host image handle.
///
/// DOM handles are shared references with interior mutability, so every method takes `&self`.
/// A `web-sys` binding would forward to `class_list()`, `set_src`, `set_srcset` and `dataset()`.
pub trait ImageElement {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn set_src(&self, src: &str);
    fn set_srcset(&self, srcset: &str);
    /// The real source URL (`data-src`), if present.
    fn data_src(&self) -> Option<String>;
    /// The real responsive source set (`data-srcset`), if present.
    fn data_srcset(&self) -> Option<String>;
}

/// Resolves a selector to the elements to track, like `querySelectorAll`.
///
/// Returns `None` when the host cannot evaluate the selector.
pub trait ElementSource<E> {
    fn query_selector_all(&self, selector: &str) -> Option<Vec<E>>;
}

impl<E, F> ElementSource<E> for F
where
    F: Fn(&str) -> Option<Vec<E>>,
{
    fn query_selector_all(&self, selector: &str) -> Option<Vec<E>> {
        self(selector)
    }
}
