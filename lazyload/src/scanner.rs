use alloc::vec::Vec;
use core::mem;

use crate::{GeometryProvider, ScanOutcome, ViewportWindow};

/// Reveals every element of `worklist` that intersects `window`.
///
/// Visible elements are moved, in order, into the returned `revealed` list; the rest stay in
/// `worklist` in their original order. Each element present on entry is examined exactly once.
///
/// An empty worklist short-circuits to a drained outcome without any geometry queries.
pub fn scan<E, G>(worklist: &mut Vec<E>, window: ViewportWindow, geometry: &G) -> ScanOutcome<E>
where
    G: GeometryProvider<E> + ?Sized,
{
    if worklist.is_empty() {
        return ScanOutcome::drained();
    }

    let pending = mem::take(worklist);
    let mut retained = Vec::with_capacity(pending.len());
    let mut revealed = Vec::new();

    for element in pending {
        if window.intersects(geometry.client_rect(&element)) {
            revealed.push(element);
        } else {
            retained.push(element);
        }
    }

    *worklist = retained;
    ScanOutcome {
        revealed,
        drained: worklist.is_empty(),
    }
}

/// The shrinking set of elements that have not been revealed yet.
///
/// Elements only ever leave the worklist, through [`Worklist::scan`]. Once it is empty the
/// worklist is drained for good.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Worklist<E> {
    pending: Vec<E>,
    revealed_total: usize,
}

impl<E> Worklist<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self {
            pending: elements,
            revealed_total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Same as [`Self::is_empty`]; reads better at call sites that tear down subscriptions.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of elements revealed over the worklist's lifetime.
    pub fn revealed_total(&self) -> usize {
        self.revealed_total
    }

    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.pending.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.pending
    }

    pub fn scan<G>(&mut self, window: ViewportWindow, geometry: &G) -> ScanOutcome<E>
    where
        G: GeometryProvider<E> + ?Sized,
    {
        let before = self.pending.len();
        let outcome = scan(&mut self.pending, window, geometry);
        self.revealed_total = self.revealed_total.saturating_add(outcome.revealed.len());
        ltrace!(
            top = window.top,
            bottom = window.bottom,
            before,
            revealed = outcome.revealed.len(),
            remaining = self.pending.len(),
            "Worklist::scan"
        );
        if outcome.drained && before > 0 {
            ldebug!(revealed_total = self.revealed_total, "Worklist drained");
        }
        outcome
    }

    pub fn into_inner(self) -> Vec<E> {
        self.pending
    }
}

impl<E> Default for Worklist<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E> From<Vec<E>> for Worklist<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::new(elements)
    }
}

impl<E> FromIterator<E> for Worklist<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, E> IntoIterator for &'a Worklist<E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.pending.iter()
    }
}
