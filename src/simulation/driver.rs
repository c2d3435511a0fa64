//! Tick loop serializing input, generation advance and rendering

use crate::engine::SimulationEngine;
use crate::error::SimulationResult;
use serde::Serialize;
use std::time::{Duration, Instant};

/// User actions delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Stepped,
    Paused,
    Quit,
}

/// What happened during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub engine: String,
    pub ticks: u64,
    pub generations_advanced: u64,
    pub paused_ticks: u64,
    pub resets: u64,
    pub final_generation: u64,
    pub final_population: usize,
    pub population_history: Vec<usize>,
}

/// Owns an engine and drives it one tick at a time.
///
/// Within a tick the order is fixed: commands are applied, the engine steps unless paused,
/// then the render callback reads the state. Nothing reads the engine during a step.
pub struct Simulation<E: SimulationEngine> {
    engine: E,
    check_invariants: bool,
    frame_interval: Option<Duration>,
    summary: RunSummary,
}

impl<E: SimulationEngine> Simulation<E> {
    pub fn new(engine: E) -> Self {
        let summary = RunSummary {
            engine: engine.name().to_string(),
            final_population: engine.population(),
            ..Default::default()
        };

        Self {
            engine,
            check_invariants: false,
            frame_interval: None,
            summary,
        }
    }

    /// Probe engine invariants after every step
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Sleep between ticks so the loop runs at most `fps` ticks per second
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Run a single tick
    pub fn tick<R: FnMut(&E)>(&mut self, commands: &[Command], mut render: R) -> SimulationResult<TickOutcome> {
        for command in commands {
            match command {
                Command::TogglePause => {
                    self.engine.toggle_pause();
                    log::info!(
                        "{} at generation {}",
                        if self.engine.is_paused() { "paused" } else { "resumed" },
                        self.engine.generation()
                    );
                }
                Command::Reset => {
                    self.engine.reset();
                    self.summary.resets += 1;
                    log::info!("reset to new initial conditions, {} alive", self.engine.population());
                }
                Command::Quit => {
                    log::info!("quit requested after {} ticks", self.summary.ticks);
                    return Ok(TickOutcome::Quit);
                }
            }
        }

        let outcome = if self.engine.is_paused() {
            self.summary.paused_ticks += 1;
            TickOutcome::Paused
        } else {
            self.engine.step();
            self.summary.generations_advanced += 1;

            if self.check_invariants {
                if let Err(err) = self.engine.check_invariants() {
                    log::warn!("{} engine at generation {}: {}", self.engine.name(), self.engine.generation(), err);
                    return Err(err);
                }
            }
            TickOutcome::Stepped
        };

        self.summary.ticks += 1;
        self.summary.final_generation = self.engine.generation();
        self.summary.final_population = self.engine.population();
        self.summary.population_history.push(self.summary.final_population);

        render(&self.engine);
        Ok(outcome)
    }

    /// Tick until `max_ticks` have run or a `Quit` command arrives.
    /// `input` is polled once at the start of every tick.
    pub fn run<I, R>(&mut self, max_ticks: usize, mut input: I, mut render: R) -> SimulationResult<RunSummary>
    where
        I: FnMut(&E) -> Vec<Command>,
        R: FnMut(&E),
    {
        for _ in 0..max_ticks {
            let started = Instant::now();
            let commands = input(&self.engine);

            if self.tick(&commands, &mut render)? == TickOutcome::Quit {
                break;
            }

            if let Some(interval) = self.frame_interval {
                if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }

        Ok(self.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DenseEngine, SparseEngine};
    use crate::error::SimulationError;
    use crate::game_of_life::{BlobLimits, Bounds, Pattern};

    fn blinker() -> DenseEngine {
        let cells = Pattern::Blinker.centered(6, 6).unwrap();
        DenseEngine::with_living(6, 6, &cells, Some(2)).unwrap()
    }

    #[test]
    fn test_tick_steps_and_renders() {
        let mut sim = Simulation::new(blinker());
        let mut frames = Vec::new();

        let outcome = sim.tick(&[], |engine| frames.push(engine.live_cells())).unwrap();
        assert_eq!(outcome, TickOutcome::Stepped);
        assert_eq!(frames, vec![vec![(2, 1), (2, 2), (2, 3)]]);
        assert_eq!(sim.engine().generation(), 1);
    }

    #[test]
    fn test_paused_ticks_render_without_stepping() {
        let mut sim = Simulation::new(blinker());
        let mut rendered = 0;

        let outcome = sim.tick(&[Command::TogglePause], |_| rendered += 1).unwrap();
        assert_eq!(outcome, TickOutcome::Paused);
        assert_eq!(sim.tick(&[], |_| rendered += 1).unwrap(), TickOutcome::Paused);
        assert_eq!(rendered, 2);
        assert_eq!(sim.engine().generation(), 0);
        assert_eq!(sim.summary().paused_ticks, 2);

        assert_eq!(sim.tick(&[Command::TogglePause], |_| ()).unwrap(), TickOutcome::Stepped);
        assert_eq!(sim.engine().generation(), 1);
    }

    #[test]
    fn test_reset_command() {
        let mut sim = Simulation::new(blinker());
        sim.tick(&[], |_| ()).unwrap();
        sim.tick(&[Command::Reset], |_| ()).unwrap();

        // Reset happens before the step of the same tick
        assert_eq!(sim.engine().generation(), 1);
        assert_eq!(sim.summary().resets, 1);
    }

    #[test]
    fn test_quit_stops_run() {
        let mut sim = Simulation::new(blinker());
        let mut polls = 0;

        let summary = sim
            .run(
                100,
                |engine| {
                    polls += 1;
                    if engine.generation() == 3 {
                        vec![Command::Quit]
                    } else {
                        Vec::new()
                    }
                },
                |_| (),
            )
            .unwrap();

        assert_eq!(polls, 4);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.generations_advanced, 3);
        assert_eq!(summary.population_history, vec![3, 3, 3]);
        assert_eq!(summary.engine, "dense");
    }

    #[test]
    fn test_run_with_invariant_checks() {
        let bounds = Bounds::new(300, 200, 10).unwrap();
        let engine = SparseEngine::new(bounds, BlobLimits::default(), Some(4)).unwrap();
        let mut sim = Simulation::new(engine).with_invariant_checks(true);

        let summary = sim.run(30, |_| Vec::new(), |_| ()).unwrap();
        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.final_generation, 30);
        assert_eq!(summary.population_history.len(), 30);
    }

    /// Dense engine whose grid gets a stray live cell after `faulty_generation`
    struct StrayCell {
        inner: DenseEngine,
        faulty_generation: u64,
    }

    impl SimulationEngine for StrayCell {
        fn name(&self) -> &'static str {
            "stray"
        }

        fn step(&mut self) {
            self.inner.step();
            if self.inner.generation() == self.faulty_generation {
                let idx = self.inner.grid().index(0, 0);
                self.inner.grid_mut().cells[idx] = true;
            }
        }

        fn reset(&mut self) {
            self.inner.reset()
        }

        fn toggle_pause(&mut self) {
            self.inner.toggle_pause()
        }

        fn is_paused(&self) -> bool {
            self.inner.is_paused()
        }

        fn dimensions(&self) -> (usize, usize) {
            self.inner.dimensions()
        }

        fn is_alive(&self, col: usize, row: usize) -> bool {
            self.inner.is_alive(col, row)
        }

        fn live_cells(&self) -> Vec<(usize, usize)> {
            self.inner.live_cells()
        }

        fn generation(&self) -> u64 {
            self.inner.generation()
        }

        fn population(&self) -> usize {
            self.inner.population()
        }

        fn check_invariants(&self) -> SimulationResult<()> {
            self.inner.check_invariants()
        }
    }

    #[test]
    fn test_invariant_checks_stop_bad_transition() {
        let engine = StrayCell {
            inner: blinker(),
            faulty_generation: 3,
        };
        let mut sim = Simulation::new(engine).with_invariant_checks(true);

        let mut rendered = 0;
        let err = sim.run(10, |_| Vec::new(), |_| rendered += 1).unwrap_err();
        assert!(matches!(err, SimulationError::InvariantViolation(_)));
        assert!(err.to_string().contains("cell (0, 0)"));
        assert_eq!(rendered, 2);
        assert_eq!(sim.summary().ticks, 2);

        // Unchecked runs let the bad state through
        let engine = StrayCell {
            inner: blinker(),
            faulty_generation: 3,
        };
        let summary = Simulation::new(engine).run(5, |_| Vec::new(), |_| ()).unwrap();
        assert_eq!(summary.ticks, 5);
    }

    #[test]
    fn test_frame_rate_paces_ticks() {
        let mut sim = Simulation::new(blinker()).with_frame_rate(100);
        let started = Instant::now();
        sim.run(5, |_| Vec::new(), |_| ()).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_summary_serializes() {
        let mut sim = Simulation::new(blinker());
        let summary = sim.run(2, |_| Vec::new(), |_| ()).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["engine"], "dense");
        assert_eq!(json["ticks"], 2);
        assert_eq!(json["final_population"], 3);
    }
}
