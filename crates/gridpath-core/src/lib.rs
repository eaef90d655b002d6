//! **gridpath-core**: grid types for 8-connected shortest-path search.
//!
//! This crate provides the foundational types used across the *gridpath*
//! workspace: coordinates and bounds, cells carrying a role and a search
//! tag, the row-major [`Grid`], and the versioned [`Layout`] encodings used
//! by editors and loaders to hand a populated grid to the search engine.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, Role, SearchTag};
pub use geom::{Bounds, Coord};
pub use grid::Grid;
pub use layout::{Layout, LayoutDecoder, LayoutEncoder, LayoutError};
