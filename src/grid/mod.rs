//! Grid system: hole mask, card cells and coordinates.
//!
//! The grid knows nothing about turns or rules. It enforces placement
//! legality (bounds, holes, occupancy) and the odd card-cell invariant.

pub mod matrix;
pub mod position;

pub use matrix::Grid;
pub use position::{Placed, Position};
