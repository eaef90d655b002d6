use gridpath_core::{Bounds, Coord, Grid};

/// Cached neighbor computation helper.
///
/// Enumerates the 8 neighbors of a cell in [`Coord::OFFSETS_8`] order,
/// filtered by a predicate, reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the 8-directional neighbors of `c`, keeping only those for
    /// which `keep` returns `true`.
    pub fn all(&mut self, c: Coord, keep: impl Fn(Coord) -> bool) -> &[Coord] {
        self.buf.clear();
        for n in c.neighbors_8() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

/// The traversable neighbors of `cell`: in bounds and not a barrier, in
/// [`Coord::OFFSETS_8`] order. Empty if `cell` itself is out of bounds.
pub fn neighbors_of(grid: &Grid, cell: Coord) -> Vec<Coord> {
    if !grid.contains(cell) {
        return Vec::new();
    }
    Neighbors::new()
        .all(cell, |n| grid.is_passable(n))
        .to_vec()
}

/// The neighbor relation of a whole grid, stored compactly.
///
/// Derived data: any role change on the grid invalidates it, and the caller
/// must [`rebuild`](Self::rebuild) before the next search. The graph only
/// remembers the bounds it was built for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborGraph {
    bounds: Bounds,
    // `targets[starts[i]..starts[i + 1]]` are the neighbors of cell `i`.
    starts: Vec<usize>,
    targets: Vec<Coord>,
}

impl NeighborGraph {
    /// Compute the neighbor lists of every cell of `grid`.
    pub fn build(grid: &Grid) -> Self {
        let mut graph = Self::default();
        graph.rebuild(grid);
        graph
    }

    /// Recompute in place, reusing allocations.
    pub fn rebuild(&mut self, grid: &Grid) {
        self.bounds = grid.bounds();
        self.starts.clear();
        self.targets.clear();
        self.starts.reserve(grid.len() + 1);

        let mut nb = Neighbors::new();
        self.starts.push(0);
        for c in self.bounds.iter() {
            self.targets
                .extend_from_slice(nb.all(c, |n| grid.is_passable(n)));
            self.starts.push(self.targets.len());
        }
        log::trace!(
            "neighbor graph rebuilt for {} grid: {} edges",
            self.bounds,
            self.targets.len()
        );
    }

    /// The bounds this graph was built for.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether this graph was built for a grid of the same dimensions.
    #[inline]
    pub fn matches(&self, grid: &Grid) -> bool {
        self.bounds == grid.bounds()
    }

    /// Neighbors of `cell`, or an empty slice if `cell` is out of bounds.
    #[inline]
    pub fn neighbors(&self, cell: Coord) -> &[Coord] {
        match self.bounds.index(cell) {
            Some(i) => &self.targets[self.starts[i]..self.starts[i + 1]],
            None => &[],
        }
    }

    /// Total number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::Role;

    #[test]
    fn interior_cell_has_eight_neighbors_in_offset_order() {
        let grid = Grid::new(3, 3);
        let n = neighbors_of(&grid, Coord::new(1, 1));
        assert_eq!(
            n,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(2, 0),
                Coord::new(2, 1),
                Coord::new(2, 2),
            ]
        );
    }

    #[test]
    fn corners_and_barriers_are_excluded() {
        let mut grid = Grid::new(3, 4);
        grid.set_role(Coord::new(0, 1), Role::Barrier);
        let n = neighbors_of(&grid, Coord::new(0, 0));
        assert_eq!(n, vec![Coord::new(1, 0), Coord::new(1, 1)]);
    }

    #[test]
    fn out_of_bounds_cell_has_no_neighbors() {
        let grid = Grid::new(2, 2);
        assert!(neighbors_of(&grid, Coord::new(-1, 0)).is_empty());
        assert!(neighbors_of(&grid, Coord::new(2, 2)).is_empty());
        let graph = NeighborGraph::build(&grid);
        assert!(graph.neighbors(Coord::new(7, 7)).is_empty());
    }

    #[test]
    fn graph_agrees_with_neighbors_of() {
        let mut grid = Grid::new(4, 5);
        grid.set_role(Coord::new(1, 1), Role::Barrier);
        grid.set_role(Coord::new(2, 3), Role::Barrier);
        let graph = NeighborGraph::build(&grid);
        for c in grid.bounds() {
            assert_eq!(graph.neighbors(c), neighbors_of(&grid, c).as_slice(), "at {c}");
        }
    }

    #[test]
    fn rebuild_picks_up_new_barriers() {
        let mut grid = Grid::new(3, 3);
        let mut graph = NeighborGraph::build(&grid);
        assert_eq!(graph.neighbors(Coord::new(1, 1)).len(), 8);
        assert_eq!(graph.edge_count(), 40);

        grid.set_role(Coord::new(0, 0), Role::Barrier);
        // Stale until rebuilt.
        assert_eq!(graph.neighbors(Coord::new(1, 1)).len(), 8);
        graph.rebuild(&grid);
        assert_eq!(graph.neighbors(Coord::new(1, 1)).len(), 7);
        assert!(graph.matches(&grid));
        assert!(!graph.matches(&Grid::new(3, 4)));
    }
}
