//! Checks that engine state and transitions obey the rules and structural guarantees

use crate::error::{SimulationError, SimulationResult};
use crate::game_of_life::{Bounds, CellSets, GameOfLifeRules, Grid};
use itertools::iproduct;
use std::fmt;

/// A cell whose next state disagrees with the rule applied to its previous neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleViolation {
    pub cell: (usize, usize),
    pub was_alive: bool,
    pub neighbors: u8,
    /// State the rule demands; the grid holds the opposite
    pub expected: bool,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = |alive: bool| if alive { "alive" } else { "dead" };
        write!(
            f,
            "cell {:?} was {} with {} live neighbors and should be {}",
            self.cell,
            state(self.was_alive),
            self.neighbors,
            state(self.expected)
        )
    }
}

pub struct TransitionValidator;

impl TransitionValidator {
    /// Cells of `next` that differ from the rule applied to `previous`, row by row
    pub fn validate_transition(previous: &Grid, next: &Grid) -> Vec<RuleViolation> {
        iproduct!(0..previous.height, 0..previous.width)
            .filter_map(|(y, x)| {
                let was_alive = previous.get(x, y);
                let neighbors = previous.count_neighbors(x, y);
                let expected = GameOfLifeRules::next_state(was_alive, neighbors);
                (next.get(x, y) != expected).then_some(RuleViolation {
                    cell: (x, y),
                    was_alive,
                    neighbors,
                    expected,
                })
            })
            .collect()
    }

    /// A dense transition must keep the dimensions and follow the rule everywhere
    pub fn check_dense_transition(previous: &Grid, next: &Grid) -> SimulationResult<()> {
        if previous.width != next.width || previous.height != next.height {
            return Err(SimulationError::InvariantViolation(format!(
                "grid changed size from {}x{} to {}x{}",
                previous.width, previous.height, next.width, next.height
            )));
        }

        let violations = Self::validate_transition(previous, next);
        match violations.first() {
            None => Ok(()),
            Some(first) => Err(SimulationError::InvariantViolation(format!(
                "{} rule violations, first: {}",
                violations.len(),
                first
            ))),
        }
    }

    /// Live and dead sets are disjoint and together cover exactly the cell origins of `bounds`
    pub fn check_cell_sets(cells: &CellSets, bounds: &Bounds) -> SimulationResult<()> {
        let overlap = cells.overlap();
        if let Some(coord) = overlap.first() {
            return Err(SimulationError::InvariantViolation(format!(
                "{} coordinates are both alive and dead, first {:?}",
                overlap.len(),
                coord
            )));
        }

        if let Some(coord) = cells.alive.iter().chain(cells.dead.iter()).find(|&&c| !bounds.holds(c)) {
            return Err(SimulationError::InvariantViolation(format!(
                "coordinate {:?} is not a cell of the visible area",
                coord
            )));
        }

        let expected = bounds.columns() * bounds.rows();
        if cells.coordinate_count() != expected {
            return Err(SimulationError::InvariantViolation(format!(
                "live and dead sets hold {} coordinates, visible area has {}",
                cells.coordinate_count(),
                expected
            )));
        }

        Ok(())
    }
}
