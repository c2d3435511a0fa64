//! Conway's Game of Life simulation engine
//!
//! Two interchangeable engines advance B3/S23 generations: a dense toroidal grid and a sparse
//! pair of live/dead coordinate sets over a bounded area. A small driver serializes input,
//! stepping and rendering for whatever front end sits on top.

pub mod config;
pub mod engine;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use engine::{DenseEngine, SimulationEngine, SparseEngine};
pub use error::{ConfigurationError, SimulationError};
pub use simulation::{Command, RunSummary, Simulation};

use anyhow::{Context, Result};
use config::EngineKind;
use game_of_life::Pattern;

/// Options for a run beyond the settings file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Start from a known pattern instead of random initial conditions
    pub pattern: Option<Pattern>,
    /// Issue a reset whenever the population dies out
    pub reset_on_extinction: bool,
}

/// Build the configured engine and drive it for `settings.simulation.generations` ticks
pub fn run_simulation<R>(settings: &Settings, options: &RunOptions, mut render: R) -> Result<RunSummary>
where
    R: FnMut(&dyn SimulationEngine),
{
    settings.validate()?;
    let seed = settings.simulation.seed;

    match settings.simulation.engine {
        EngineKind::Dense => {
            let (width, height) = (settings.dense.grid_width, settings.dense.grid_height);
            let engine = match options.pattern {
                Some(pattern) => {
                    let cells = pattern
                        .centered(width, height)
                        .with_context(|| format!("{:?} does not fit a {}x{} grid", pattern, width, height))?;
                    DenseEngine::with_living(width, height, &cells, seed)?
                }
                None => DenseEngine::new(width, height, seed)?,
            };
            drive(engine, settings, options, &mut render)
        }
        EngineKind::Sparse => {
            let bounds = settings.sparse.bounds()?;
            let engine = match options.pattern {
                Some(pattern) => {
                    let cells = pattern
                        .centered(bounds.columns(), bounds.rows())
                        .with_context(|| format!("{:?} does not fit the visible area", pattern))?;
                    let coords = cells.into_iter().map(|(col, row)| bounds.to_coord(col, row));
                    SparseEngine::with_alive(bounds, coords, seed)
                }
                None => SparseEngine::new(bounds, settings.sparse.limits(), seed)?,
            };
            drive(engine, settings, options, &mut render)
        }
    }
}

fn drive<E: SimulationEngine>(
    engine: E,
    settings: &Settings,
    options: &RunOptions,
    render: &mut dyn FnMut(&dyn SimulationEngine),
) -> Result<RunSummary> {
    let fps = if settings.output.render_frames { settings.simulation.fps } else { 0 };
    let mut simulation = Simulation::new(engine)
        .with_invariant_checks(settings.simulation.check_invariants)
        .with_frame_rate(fps);

    log::info!(
        "running {} engine for {} generations, {} alive",
        simulation.engine().name(),
        settings.simulation.generations,
        simulation.engine().population()
    );

    let reset_on_extinction = options.reset_on_extinction;
    let summary = simulation.run(
        settings.simulation.generations,
        |engine| {
            if reset_on_extinction && engine.population() == 0 && engine.generation() > 0 {
                vec![Command::Reset]
            } else {
                Vec::new()
            }
        },
        |engine| {
            let engine: &dyn SimulationEngine = engine;
            render(engine)
        },
    )?;

    Ok(summary)
}
