use std::fmt;

use gridpath_core::{Bounds, Coord};

/// Why a search refused to start. Detected before any grid mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// The start coordinate lies outside the grid.
    StartOutOfBounds(Coord),
    /// The end coordinate lies outside the grid.
    EndOutOfBounds(Coord),
    /// Start and end are the same cell.
    SameCell(Coord),
    /// The start cell is a barrier.
    StartOnBarrier(Coord),
    /// The end cell is a barrier.
    EndOnBarrier(Coord),
    /// No cell carries the start role.
    MissingStart,
    /// No cell carries the end role.
    MissingEnd,
    /// The neighbor graph was built for a grid of different dimensions.
    GraphMismatch { graph: Bounds, grid: Bounds },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfBounds(c) => write!(f, "start {c} is outside the grid"),
            Self::EndOutOfBounds(c) => write!(f, "end {c} is outside the grid"),
            Self::SameCell(c) => write!(f, "start and end are the same cell {c}"),
            Self::StartOnBarrier(c) => write!(f, "start {c} is a barrier"),
            Self::EndOnBarrier(c) => write!(f, "end {c} is a barrier"),
            Self::MissingStart => f.write_str("no start cell placed"),
            Self::MissingEnd => f.write_str("no end cell placed"),
            Self::GraphMismatch { graph, grid } => {
                write!(f, "neighbor graph built for {graph} grid, searching {grid} grid")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}

/// A path found by the search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoundPath {
    /// Cells from start to end inclusive.
    pub cells: Vec<Coord>,
    /// Sum of the step costs along `cells`.
    pub cost: f64,
}

impl FoundPath {
    /// Number of moves (one less than the number of cells).
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Number of diagonal moves.
    pub fn diagonal_steps(&self) -> usize {
        self.cells
            .windows(2)
            .filter(|w| w[0].is_diagonal_to(w[1]))
            .count()
    }

    /// First cell.
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    /// Last cell.
    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// Cells strictly between start and end.
    pub fn interior(&self) -> &[Coord] {
        match self.cells.len() {
            0..=2 => &[],
            n => &self.cells[1..n - 1],
        }
    }

    /// The path as `(row, col)` pairs.
    pub fn pairs(&self) -> Vec<(i32, i32)> {
        self.cells.iter().map(|&c| c.into()).collect()
    }
}

/// Terminal result of one search run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The end cell was reached.
    Found(FoundPath),
    /// The frontier emptied without reaching the end cell.
    NotFound,
    /// The caller's cancellation was observed.
    Cancelled,
    /// The preconditions failed; nothing was touched.
    InvalidInput(InvalidInput),
}

impl Outcome {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found path, if any.
    #[inline]
    pub fn path(&self) -> Option<&FoundPath> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Take the found path, if any.
    #[inline]
    pub fn into_path(self) -> Option<FoundPath> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Short lowercase label, for logs and status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound => "not found",
            Self::Cancelled => "cancelled",
            Self::InvalidInput(_) => "invalid input",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(p) => write!(f, "found: {} steps, cost {:.3}", p.steps(), p.cost),
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped and expanded (the end cell included).
    pub expanded: usize,
    /// Frontier pushes, the initial start push and re-pushes included.
    pub pushed: usize,
    /// Outdated frontier entries discarded at pop time.
    pub stale_skipped: usize,
    /// Largest frontier size reached.
    pub frontier_high_water: usize,
}

/// An [`Outcome`] together with the run's [`SearchStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn report_parts_serialize() {
        let path = FoundPath {
            cells: vec![Coord::new(0, 0), Coord::new(1, 1)],
            cost: crate::SQRT2,
        };
        let json = serde_json::to_string(&path).unwrap();
        let back: FoundPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);

        let stats = SearchStats {
            expanded: 4,
            pushed: 9,
            stale_skipped: 1,
            frontier_high_water: 6,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"stale_skipped\":1"));
        assert_eq!(serde_json::from_str::<SearchStats>(&json).unwrap(), stats);
    }
}
