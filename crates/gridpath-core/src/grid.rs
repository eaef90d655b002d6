//! The [`Grid`] type: a rows × cols array of [`Cell`]s.
//!
//! A `Grid` owns its storage outright. Editors mutate roles between runs;
//! the search engine borrows the grid mutably only to write search tags.

use crate::cell::{Cell, Role, SearchTag};
use crate::geom::{Bounds, BoundsIter, Coord};

/// A rectangular grid of [`Cell`]s stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Bounds,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with empty cells.
    /// Negative dimensions produce an empty grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    /// The bounds of this grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` is inside this grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// Read the cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<Cell> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Read the role at `c`, or `None` if out of bounds.
    #[inline]
    pub fn role(&self, c: Coord) -> Option<Role> {
        self.at(c).map(|cell| cell.role)
    }

    /// Read the search tag at `c`, or `None` if out of bounds.
    #[inline]
    pub fn tag(&self, c: Coord) -> Option<SearchTag> {
        self.at(c).map(|cell| cell.tag)
    }

    /// Whether `c` is in bounds and not a barrier.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.role(c).is_some_and(Role::is_passable)
    }

    /// Set the role at `c`. No-op if `c` is outside bounds.
    ///
    /// This does not enforce the single-start/single-end invariant; use
    /// [`place_start`](Self::place_start) / [`place_end`](Self::place_end)
    /// to move a marker.
    pub fn set_role(&mut self, c: Coord, role: Role) {
        if let Some(i) = self.bounds.index(c) {
            self.cells[i].role = role;
        }
    }

    /// Set the search tag at `c`. No-op if `c` is outside bounds.
    pub fn set_tag(&mut self, c: Coord, tag: SearchTag) {
        if let Some(i) = self.bounds.index(c) {
            self.cells[i].tag = tag;
        }
    }

    /// Move the start marker to `c`, clearing any previous start cell.
    /// Returns `false` (and changes nothing) if `c` is outside bounds.
    pub fn place_start(&mut self, c: Coord) -> bool {
        self.place_marker(c, Role::Start)
    }

    /// Move the end marker to `c`, clearing any previous end cell.
    /// Returns `false` (and changes nothing) if `c` is outside bounds.
    pub fn place_end(&mut self, c: Coord) -> bool {
        self.place_marker(c, Role::End)
    }

    fn place_marker(&mut self, c: Coord, role: Role) -> bool {
        let Some(idx) = self.bounds.index(c) else {
            return false;
        };
        for cell in self.cells.iter_mut().filter(|cell| cell.role == role) {
            cell.role = Role::Empty;
        }
        self.cells[idx].role = role;
        true
    }

    /// First cell (row-major) whose role is `role`.
    pub fn find(&self, role: Role) -> Option<Coord> {
        self.cells
            .iter()
            .position(|cell| cell.role == role)
            .map(|i| self.bounds.coord(i))
    }

    /// The start marker, if any.
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.find(Role::Start)
    }

    /// The end marker, if any.
    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.find(Role::End)
    }

    /// Count how many cells have the given role.
    pub fn count(&self, role: Role) -> usize {
        self.cells.iter().filter(|cell| cell.role == role).count()
    }

    /// Count how many cells carry the given search tag.
    pub fn count_tag(&self, tag: SearchTag) -> usize {
        self.cells.iter().filter(|cell| cell.tag == tag).count()
    }

    /// Set every role to `role`, leaving search tags alone.
    pub fn fill(&mut self, role: Role) {
        for cell in &mut self.cells {
            cell.role = role;
        }
    }

    /// Reset every search tag to [`SearchTag::Unvisited`].
    ///
    /// Needed before re-running a search whose previous run was cancelled or
    /// left markings behind.
    pub fn reset_search(&mut self) {
        for cell in &mut self.cells {
            cell.tag = SearchTag::Unvisited;
        }
    }

    /// Row-major iterator over `(Coord, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }

    /// Row-major slice of all cells.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Coord, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Coord, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        self.grid.at(c).map(|cell| (c, cell))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Coord, Cell);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 12);
        assert_eq!(g.at(Coord::new(0, 0)), Some(Cell::default()));
        assert_eq!(g.at(Coord::new(3, 0)), None);
    }

    #[test]
    fn set_role_and_tag_are_independent() {
        let mut g = Grid::new(3, 3);
        let c = Coord::new(1, 2);
        g.set_role(c, Role::Barrier);
        g.set_tag(c, SearchTag::Closed);
        assert_eq!(g.role(c), Some(Role::Barrier));
        assert_eq!(g.tag(c), Some(SearchTag::Closed));
        g.reset_search();
        assert_eq!(g.role(c), Some(Role::Barrier));
        assert_eq!(g.tag(c), Some(SearchTag::Unvisited));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut g = Grid::new(2, 2);
        g.set_role(Coord::new(5, 5), Role::Barrier);
        g.set_tag(Coord::new(-1, 0), SearchTag::Open);
        assert_eq!(g.count(Role::Barrier), 0);
        assert_eq!(g.count_tag(SearchTag::Open), 0);
        assert!(!g.place_start(Coord::new(2, 0)));
    }

    #[test]
    fn placing_a_marker_clears_the_previous_one() {
        let mut g = Grid::new(4, 4);
        assert!(g.place_start(Coord::new(0, 0)));
        assert!(g.place_start(Coord::new(2, 3)));
        assert!(g.place_end(Coord::new(3, 3)));
        assert_eq!(g.count(Role::Start), 1);
        assert_eq!(g.start(), Some(Coord::new(2, 3)));
        assert_eq!(g.end(), Some(Coord::new(3, 3)));
    }

    #[test]
    fn passability_follows_role_and_bounds() {
        let mut g = Grid::new(2, 2);
        g.set_role(Coord::new(0, 1), Role::Barrier);
        assert!(g.is_passable(Coord::new(0, 0)));
        assert!(!g.is_passable(Coord::new(0, 1)));
        assert!(!g.is_passable(Coord::new(0, 2)));
    }

    #[test]
    fn iter_is_row_major() {
        let mut g = Grid::new(2, 3);
        g.set_role(Coord::new(1, 0), Role::End);
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[3], (Coord::new(1, 0), Cell::new(Role::End)));
    }

    #[test]
    fn fill_keeps_tags() {
        let mut g = Grid::new(2, 2);
        g.set_tag(Coord::new(1, 1), SearchTag::Path);
        g.fill(Role::Barrier);
        assert_eq!(g.count(Role::Barrier), 4);
        assert_eq!(g.tag(Coord::new(1, 1)), Some(SearchTag::Path));
    }
}
