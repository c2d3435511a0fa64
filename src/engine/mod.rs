//! Simulation engines sharing one interface
//!
//! Both engines own their generation state outright. `step`, `reset` and `toggle_pause` are the
//! only mutators, and the driver never reads state while a step is running.

pub mod dense;
pub mod sparse;

pub use dense::DenseEngine;
pub use sparse::SparseEngine;

use crate::error::SimulationResult;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Whether the driver should advance the engine on each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// A Game of Life engine as seen by the driver and renderer.
///
/// Read accessors address cells by grid column and row, whatever the engine stores internally.
pub trait SimulationEngine {
    /// Short engine name for logs and summaries
    fn name(&self) -> &'static str;

    /// Advance one generation
    fn step(&mut self);

    /// Replace the whole state with fresh random initial conditions
    fn reset(&mut self);

    fn toggle_pause(&mut self);

    fn is_paused(&self) -> bool;

    /// `(columns, rows)` of the visible grid
    fn dimensions(&self) -> (usize, usize);

    fn is_alive(&self, col: usize, row: usize) -> bool;

    /// Live cells as `(col, row)`, row by row
    fn live_cells(&self) -> Vec<(usize, usize)>;

    /// Generations advanced since the last reset
    fn generation(&self) -> u64;

    fn population(&self) -> usize;

    /// Probe the structural guarantees of the current state
    fn check_invariants(&self) -> SimulationResult<()>;
}

/// Deterministic when a seed is given, otherwise seeded from the OS
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
