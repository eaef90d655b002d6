//! Shortest paths on 8-connected grids.
//!
//! This crate provides a deterministic A\* search over a
//! [`gridpath_core::Grid`], with orthogonal steps costing `1` and diagonal
//! steps costing `√2`. The search reports every state change through a
//! [`Visitor`] so that a caller can animate it, and polls a [`Cancel`]
//! implementation once per frontier pop so that a caller can stop it.
//!
//! # Typical use
//!
//! ```
//! use gridpath_core::{Coord, Grid};
//! use gridpath_search::{Ignore, NeighborGraph, Never, Outcome, SearchEngine};
//!
//! let mut grid = Grid::new(3, 3);
//! let graph = NeighborGraph::build(&grid);
//! let engine = SearchEngine::new(&graph);
//! let outcome = engine.run(&mut grid, Coord::new(0, 0), Coord::new(2, 2), &mut Ignore, &Never);
//! let Outcome::Found(path) = outcome else { panic!("no path") };
//! assert_eq!(path.steps(), 2);
//! ```
//!
//! # Components
//!
//! | Item | Role |
//! |---|---|
//! | [`octile`] | admissible, consistent heuristic |
//! | [`NeighborGraph`] | cached 8-neighbor relation, rebuilt when barriers change |
//! | [`Frontier`] | min-queue ordered by `(f, insertion sequence)` |
//! | [`SearchEngine`] | the expansion loop |
//! | [`reconstruct`] | predecessor walk producing the path |

mod cancel;
mod config;
mod distance;
mod engine;
mod frontier;
mod neighbors;
mod outcome;
mod reconstruct;
mod record;
mod state;
mod traits;

pub use cancel::{CancelToken, Deadline, Never};
pub use config::{ConfigError, SearchConfig};
pub use distance::{SQRT2, octile, octile_with, step_cost, step_cost_with};
pub use engine::SearchEngine;
pub use frontier::Frontier;
pub use neighbors::{NeighborGraph, Neighbors, neighbors_of};
pub use outcome::{FoundPath, InvalidInput, Outcome, SearchReport, SearchStats};
pub use reconstruct::reconstruct;
pub use record::{Visit, VisitLog};
pub use traits::{Cancel, Ignore, Visitor};
