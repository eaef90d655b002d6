//! Per-run bookkeeping, stored as flat arrays indexed like the grid.

use gridpath_core::{Bounds, Coord};

use crate::reconstruct::reconstruct;

/// Scores, predecessors and open membership for one search run.
///
/// Created fresh by every run and dropped when it returns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchState {
    bounds: Bounds,
    pub(crate) g: Vec<f64>,
    pub(crate) f: Vec<f64>,
    pub(crate) came_from: Vec<Option<usize>>,
    pub(crate) open: Vec<bool>,
    // Sequence number of the first push of each cell.
    pub(crate) seq: Vec<u64>,
    next_seq: u64,
}

impl SearchState {
    pub(crate) fn new(bounds: Bounds) -> Self {
        let n = bounds.len();
        Self {
            bounds,
            g: vec![f64::INFINITY; n],
            f: vec![f64::INFINITY; n],
            came_from: vec![None; n],
            open: vec![false; n],
            seq: vec![0; n],
            next_seq: 0,
        }
    }

    /// Hand out the next insertion sequence number.
    #[inline]
    pub(crate) fn take_seq(&mut self) -> u64 {
        let s = self.next_seq;
        self.next_seq += 1;
        s
    }

    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        self.bounds.index(c)
    }

    #[inline]
    pub(crate) fn coord(&self, i: usize) -> Coord {
        self.bounds.coord(i)
    }

    /// The best known path ending at `end`, start first.
    pub(crate) fn path_to(&self, end: Coord) -> Vec<Coord> {
        reconstruct(end, self.bounds.len(), |c| {
            let i = self.idx(c)?;
            self.came_from[i].map(|p| self.coord(p))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_unreached() {
        let mut st = SearchState::new(Bounds::new(2, 3));
        assert_eq!(st.g.len(), 6);
        assert!(st.g.iter().chain(&st.f).all(|v| v.is_infinite()));
        assert!(st.open.iter().all(|&o| !o));
        assert_eq!(st.idx(Coord::new(5, 5)), None);
        assert_eq!(st.take_seq(), 0);
        assert_eq!(st.take_seq(), 1);
    }

    #[test]
    fn path_follows_came_from() {
        let mut st = SearchState::new(Bounds::new(2, 3));
        // (0,0) -> (1,1) -> (0,2)
        st.came_from[4] = Some(0);
        st.came_from[2] = Some(4);
        assert_eq!(
            st.path_to(Coord::new(0, 2)),
            vec![Coord::new(0, 0), Coord::new(1, 1), Coord::new(0, 2)]
        );
    }
}
