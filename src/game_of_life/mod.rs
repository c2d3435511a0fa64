//! Game of Life core functionality

pub mod cells;
pub mod generator;
pub mod grid;
pub mod patterns;
pub mod rules;

pub use cells::{count_live_neighbors, Bounds, CellSets, Coord};
pub use generator::BlobLimits;
pub use grid::Grid;
pub use patterns::Pattern;
pub use rules::GameOfLifeRules;
