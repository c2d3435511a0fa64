//! Sparse engine: live and dead cells kept as coordinate sets over a bounded area

use super::{make_rng, RunState, SimulationEngine};
use crate::error::{ConfigurationError, SimulationResult};
use crate::game_of_life::cells::count_live_neighbors;
use crate::game_of_life::generator::{self, BlobLimits};
use crate::game_of_life::{Bounds, CellSets, Coord, GameOfLifeRules};
use crate::simulation::validator::TransitionValidator;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::collections::HashSet;

pub fn check_blob_limits(limits: BlobLimits) -> Result<(), ConfigurationError> {
    if limits.max_groups == 0 || limits.max_group_size == 0 {
        return Err(ConfigurationError::InvalidGroupLimits {
            max_groups: limits.max_groups,
            max_group_size: limits.max_group_size,
        });
    }
    Ok(())
}

/// Coordinates outside the visible area never materialize: construction and `reset` drop them
/// and backfill every other in-bounds coordinate as dead. `step` only repartitions the existing
/// coordinates, so `alive` and `dead` together always cover the visible area exactly.
pub struct SparseEngine {
    bounds: Bounds,
    limits: BlobLimits,
    cells: CellSets,
    rng: StdRng,
    state: RunState,
    generation: u64,
}

impl SparseEngine {
    /// Build an engine seeded with random-walk cell groups
    pub fn new(bounds: Bounds, limits: BlobLimits, seed: Option<u64>) -> Result<Self, ConfigurationError> {
        check_blob_limits(limits)?;

        let mut engine = Self {
            bounds,
            limits,
            cells: CellSets::default(),
            rng: make_rng(seed),
            state: RunState::Running,
            generation: 0,
        };
        engine.reset();
        Ok(engine)
    }

    /// Build an engine with exactly the given live coordinates; `seed` drives later resets
    pub fn with_alive<I>(bounds: Bounds, alive: I, seed: Option<u64>) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut engine = Self {
            bounds,
            limits: BlobLimits::default(),
            cells: CellSets::backfilled(alive.into_iter().collect(), &bounds),
            rng: make_rng(seed),
            state: RunState::Running,
            generation: 0,
        };
        engine.remove_out_of_bounds();
        engine
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn cells(&self) -> &CellSets {
        &self.cells
    }

    /// Snapshot of live coordinates in pixel units, sorted by row then column
    pub fn alive_coordinates(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.cells.alive.iter().copied().collect();
        coords.sort_unstable_by_key(|&(x, y)| (y, x));
        coords
    }

    pub fn is_alive_at(&self, coord: Coord) -> bool {
        self.cells.alive.contains(&coord)
    }

    pub fn count_live_neighbors(&self, coord: Coord) -> u8 {
        count_live_neighbors(&self.cells.alive, coord, self.bounds.cell_size())
    }

    /// Drop live coordinates outside the visible area or off the cell grid.
    /// The kept cells are collected into a fresh set rather than removed from the one being read.
    pub fn remove_out_of_bounds(&mut self) {
        let bounds = self.bounds;
        let retained: HashSet<Coord> = self
            .cells
            .alive
            .iter()
            .copied()
            .filter(|&coord| bounds.holds(coord))
            .collect();

        let removed = self.cells.alive.len() - retained.len();
        if removed > 0 {
            log::debug!("dropped {} live cells outside the visible cell grid", removed);
        }
        self.cells.alive = retained;
    }
}

impl SimulationEngine for SparseEngine {
    fn name(&self) -> &'static str {
        "sparse"
    }

    fn step(&mut self) {
        let alive = &self.cells.alive;
        let cell_size = self.bounds.cell_size();

        let (next_alive, next_dead): (HashSet<Coord>, HashSet<Coord>) = alive
            .par_iter()
            .chain(self.cells.dead.par_iter())
            .copied()
            .partition(|&coord| {
                GameOfLifeRules::next_state(alive.contains(&coord), count_live_neighbors(alive, coord, cell_size))
            });

        self.cells = CellSets {
            alive: next_alive,
            dead: next_dead,
        };
        self.generation += 1;
        log::trace!("sparse generation {}: {} alive", self.generation, self.cells.alive.len());
    }

    fn reset(&mut self) {
        let groups = generator::random_groups(&self.bounds, self.limits, &mut self.rng);
        self.cells = generator::seed_cells(&groups, &self.bounds);
        self.remove_out_of_bounds();
        self.generation = 0;
        log::debug!(
            "sparse engine reset with {} groups, {} alive",
            groups.len(),
            self.cells.alive.len()
        );
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.bounds.columns(), self.bounds.rows())
    }

    fn is_alive(&self, col: usize, row: usize) -> bool {
        self.is_alive_at(self.bounds.to_coord(col, row))
    }

    fn live_cells(&self) -> Vec<(usize, usize)> {
        self.alive_coordinates()
            .into_iter()
            .filter_map(|coord| self.bounds.to_cell(coord))
            .collect()
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn population(&self) -> usize {
        self.cells.alive.len()
    }

    fn check_invariants(&self) -> SimulationResult<()> {
        TransitionValidator::check_cell_sets(&self.cells, &self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(200, 150, 10).unwrap()
    }

    fn assert_exact_partition(engine: &SparseEngine) {
        assert_eq!(engine.check_invariants(), Ok(()));
        let cells = engine.cells();
        assert!(cells.overlap().is_empty(), "overlap {:?}", cells.overlap());
        assert_eq!(cells.coordinate_count(), engine.bounds().coords().count());
        assert!(cells.alive.iter().all(|&c| engine.bounds().holds(c)));
    }

    #[test]
    fn test_rejects_empty_limits() {
        let limits = BlobLimits {
            max_groups: 0,
            max_group_size: 15,
        };
        assert!(matches!(
            SparseEngine::new(bounds(), limits, Some(1)),
            Err(ConfigurationError::InvalidGroupLimits { .. })
        ));
    }

    #[test]
    fn test_partition_holds_across_steps() {
        for seed in 0..25 {
            let mut engine = SparseEngine::new(bounds(), BlobLimits::default(), Some(seed)).unwrap();
            assert_exact_partition(&engine);
            assert!(engine.population() > 0);

            for _ in 0..15 {
                engine.step();
                assert_exact_partition(&engine);
            }
        }
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let cells = vec![(-10, 0), (0, 0), (200, 10), (190, 140), (50, 150)];
        let mut engine = SparseEngine::with_alive(bounds(), Vec::new(), Some(0));
        engine.cells = CellSets {
            alive: cells.into_iter().collect(),
            dead: HashSet::new(),
        };

        engine.remove_out_of_bounds();
        assert_eq!(engine.alive_coordinates(), vec![(0, 0), (190, 140)]);
    }

    #[test]
    fn test_with_alive_drops_outside_cells() {
        let engine = SparseEngine::with_alive(bounds(), vec![(-10, -10), (10, 10)], None);
        assert_eq!(engine.population(), 1);
        assert!(engine.is_alive(1, 1));
        assert_exact_partition(&engine);
    }

    #[test]
    fn test_with_alive_drops_unaligned_cells() {
        let mut engine = SparseEngine::with_alive(bounds(), vec![(15, 15), (20, 20)], None);
        assert_eq!(engine.alive_coordinates(), vec![(20, 20)]);
        assert_eq!(engine.live_cells(), vec![(2, 2)]);
        assert!(!engine.is_alive(1, 1));
        assert_exact_partition(&engine);

        engine.step();
        assert_exact_partition(&engine);
    }

    #[test]
    fn test_no_wraparound_at_edges() {
        // Vertical blinker on the left edge: the birth left of it falls outside and never happens
        let mut engine = SparseEngine::with_alive(bounds(), vec![(0, 40), (0, 50), (0, 60)], None);
        engine.step();
        assert_eq!(engine.alive_coordinates(), vec![(0, 50), (10, 50)]);

        // A corner cell of a block has no neighbors across the corner
        let corner = vec![(0, 0), (190, 0), (0, 140), (190, 140)];
        let mut engine = SparseEngine::with_alive(bounds(), corner, None);
        assert_eq!(engine.count_live_neighbors((0, 0)), 0);
        engine.step();
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_birth_from_dead_set() {
        let mut engine = SparseEngine::with_alive(bounds(), vec![(10, 10), (20, 10), (10, 20)], None);
        assert!(engine.cells().dead.contains(&(20, 20)));
        engine.step();
        // Three live cells in an L give birth to the fourth corner of a block
        assert!(engine.is_alive_at((20, 20)));
        assert_eq!(engine.population(), 4);
        assert_exact_partition(&engine);
    }

    #[test]
    fn test_reset_is_seeded() {
        let a = SparseEngine::new(bounds(), BlobLimits::default(), Some(17)).unwrap();
        let b = SparseEngine::new(bounds(), BlobLimits::default(), Some(17)).unwrap();
        assert_eq!(a.alive_coordinates(), b.alive_coordinates());
        assert_eq!(a.dimensions(), (20, 15));
    }
}
