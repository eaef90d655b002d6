//! Event recording for replay.

use gridpath_core::{Coord, Grid, SearchTag};

use crate::traits::Visitor;

/// One visitation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub cell: Coord,
    pub tag: SearchTag,
}

/// A [`Visitor`] that records every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitLog {
    events: Vec<Visit>,
}

impl VisitLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded events, oldest first.
    #[inline]
    pub fn events(&self) -> &[Visit] {
        &self.events
    }

    /// Number of recorded events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events carrying `tag`.
    pub fn count(&self, tag: SearchTag) -> usize {
        self.events.iter().filter(|v| v.tag == tag).count()
    }

    /// Apply the first `n` events to `grid`'s search tags, as a renderer
    /// replaying an animation would. Returns how many events were applied.
    pub fn replay(&self, grid: &mut Grid, n: usize) -> usize {
        let n = n.min(self.events.len());
        for v in &self.events[..n] {
            grid.set_tag(v.cell, v.tag);
        }
        n
    }

    /// Consume the log, returning the events.
    pub fn into_events(self) -> Vec<Visit> {
        self.events
    }
}

impl Visitor for VisitLog {
    #[inline]
    fn visit(&mut self, cell: Coord, tag: SearchTag) {
        self.events.push(Visit { cell, tag });
    }
}

impl<'a> IntoIterator for &'a VisitLog {
    type Item = &'a Visit;
    type IntoIter = std::slice::Iter<'a, Visit>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_replays() {
        let mut log = VisitLog::new();
        log.visit(Coord::new(0, 1), SearchTag::Open);
        log.visit(Coord::new(0, 0), SearchTag::Closed);
        log.visit(Coord::new(0, 1), SearchTag::Closed);
        assert_eq!(log.len(), 3);
        assert_eq!(log.count(SearchTag::Closed), 2);
        assert_eq!(
            log.events()[0],
            Visit {
                cell: Coord::new(0, 1),
                tag: SearchTag::Open
            }
        );

        let mut grid = Grid::new(1, 2);
        assert_eq!(log.replay(&mut grid, 1), 1);
        assert_eq!(grid.tag(Coord::new(0, 1)), Some(SearchTag::Open));
        assert_eq!(log.replay(&mut grid, 99), 3);
        assert_eq!(grid.tag(Coord::new(0, 1)), Some(SearchTag::Closed));
    }
}
