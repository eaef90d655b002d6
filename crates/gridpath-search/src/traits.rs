use gridpath_core::{Coord, SearchTag};

/// Receives one event per search-state change, in emission order.
///
/// Implemented for every `FnMut(Coord, SearchTag)` closure. A visitor may
/// block (for example to render a frame); the search simply waits.
pub trait Visitor {
    /// `cell` now carries search tag `tag`.
    fn visit(&mut self, cell: Coord, tag: SearchTag);
}

impl<F: FnMut(Coord, SearchTag)> Visitor for F {
    #[inline]
    fn visit(&mut self, cell: Coord, tag: SearchTag) {
        self(cell, tag)
    }
}

/// A visitor that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl Visitor for Ignore {
    #[inline]
    fn visit(&mut self, _cell: Coord, _tag: SearchTag) {}
}

impl Visitor for () {
    #[inline]
    fn visit(&mut self, _cell: Coord, _tag: SearchTag) {}
}

/// Cooperative cancellation, polled once per frontier pop.
///
/// Implemented for every `Fn() -> bool` closure. Must be side-effect free
/// from the search's point of view.
pub trait Cancel {
    /// Whether the search should stop now.
    fn is_cancelled(&self) -> bool;
}

impl<F: Fn() -> bool> Cancel for F {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}
