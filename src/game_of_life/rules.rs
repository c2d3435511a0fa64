//! Game of Life rules implementation (B3/S23)

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Next state of a cell given its current state and live neighbor count.
    /// Shared by every engine; they differ only in how counts are produced.
    pub fn next_state(currently_alive: bool, live_neighbors: u8) -> bool {
        match (currently_alive, live_neighbors) {
            (true, 2) | (true, 3) => true, // Survival
            (false, 3) => true,            // Birth
            _ => false,                    // Isolation, overcrowding or stays dead
        }
    }

    /// Apply the rules to every cell of the current grid and return the next generation.
    /// Each cell reads only `current`, so the update is synchronous even when rows run in parallel.
    pub fn evolve(current: &Grid) -> Grid {
        let next_cells: Vec<bool> = (0..current.height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..current.width).map(move |x| {
                    let neighbors = current.count_neighbors(x, y);
                    Self::next_state(current.get(x, y), neighbors)
                })
            })
            .collect();

        Grid {
            width: current.width,
            height: current.height,
            cells: next_cells,
        }
    }
}
