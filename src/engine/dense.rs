//! Dense engine: every cell of a fixed toroidal grid is stored

use super::{make_rng, RunState, SimulationEngine};
use crate::error::{ConfigurationError, SimulationResult};
use crate::game_of_life::{generator, GameOfLifeRules, Grid};
use crate::simulation::validator::TransitionValidator;
use rand::rngs::StdRng;

/// Smallest grid side for which wrapped neighbors are all distinct from the cell and each other
pub const MIN_GRID_SIDE: usize = 3;

pub fn check_grid_size(width: usize, height: usize) -> Result<(), ConfigurationError> {
    if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
        return Err(ConfigurationError::GridTooSmall {
            width,
            height,
            min: MIN_GRID_SIDE,
        });
    }
    Ok(())
}

pub struct DenseEngine {
    grid: Grid,
    /// Grid before the latest step, kept for transition checks
    previous: Option<Grid>,
    rng: StdRng,
    state: RunState,
    generation: u64,
}

impl DenseEngine {
    /// Build an engine over a `width x height` torus seeded with random cells
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Result<Self, ConfigurationError> {
        check_grid_size(width, height)?;

        let mut rng = make_rng(seed);
        let grid = generator::random_grid(width, height, &mut rng);
        log::debug!("dense engine seeded {}x{} grid, {} alive", width, height, grid.living_count());

        Ok(Self {
            grid,
            previous: None,
            rng,
            state: RunState::Running,
            generation: 0,
        })
    }

    /// Build an engine around an existing grid; `seed` drives later resets
    pub fn from_grid(grid: Grid, seed: Option<u64>) -> Result<Self, ConfigurationError> {
        check_grid_size(grid.width, grid.height)?;

        Ok(Self {
            grid,
            previous: None,
            rng: make_rng(seed),
            state: RunState::Running,
            generation: 0,
        })
    }

    /// Build an engine with only the given `(x, y)` cells alive; cells off the grid are skipped
    pub fn with_living(
        width: usize,
        height: usize,
        living: &[(usize, usize)],
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        check_grid_size(width, height)?;

        Self::from_grid(Grid::with_living(width, height, living), seed)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        self.grid.count_neighbors(x, y)
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

impl SimulationEngine for DenseEngine {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn step(&mut self) {
        let next = GameOfLifeRules::evolve(&self.grid);
        self.previous = Some(std::mem::replace(&mut self.grid, next));
        self.generation += 1;
        log::trace!("dense generation {}: {} alive", self.generation, self.grid.living_count());
    }

    fn reset(&mut self) {
        self.grid = generator::random_grid(self.grid.width, self.grid.height, &mut self.rng);
        self.previous = None;
        self.generation = 0;
        log::debug!("dense engine reset, {} alive", self.grid.living_count());
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.grid.width, self.grid.height)
    }

    fn is_alive(&self, col: usize, row: usize) -> bool {
        self.grid.get(col, row)
    }

    fn live_cells(&self) -> Vec<(usize, usize)> {
        self.grid.living_cells()
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn population(&self) -> usize {
        self.grid.living_count()
    }

    /// Replays the latest step against the rule
    fn check_invariants(&self) -> SimulationResult<()> {
        match &self.previous {
            Some(previous) => TransitionValidator::check_dense_transition(previous, &self.grid),
            None => Ok(()),
        }
    }
}
