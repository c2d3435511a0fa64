//! Display and output formatting utilities

use crate::engine::SimulationEngine;
use crate::simulation::RunSummary;

/// Format engine state as text frames
pub struct GridFormatter;

impl GridFormatter {
    /// One character per cell
    pub fn format_compact<E: SimulationEngine + ?Sized>(engine: &E) -> String {
        let (cols, rows) = engine.dimensions();
        let mut output = String::with_capacity(rows * (cols + 1));
        for y in 0..rows {
            for x in 0..cols {
                output.push(if engine.is_alive(x, y) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Two characters per cell with row and column numbers
    pub fn format_with_coords<E: SimulationEngine + ?Sized>(engine: &E) -> String {
        let (cols, rows) = engine.dimensions();
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..cols {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..rows {
            output.push_str(&format!("{:2} ", y));
            for x in 0..cols {
                output.push_str(if engine.is_alive(x, y) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Generation, population and pause flag on one line
    pub fn status_line<E: SimulationEngine + ?Sized>(engine: &E) -> String {
        let (cols, rows) = engine.dimensions();
        format!(
            "[{}] generation {} | population {} / {}{}",
            engine.name(),
            engine.generation(),
            engine.population(),
            cols * rows,
            if engine.is_paused() { " | PAUSED" } else { "" }
        )
    }

    /// Status line followed by the grid, numbered when `with_coords` is set
    pub fn format_frame<E: SimulationEngine + ?Sized>(engine: &E, with_coords: bool) -> String {
        let grid = if with_coords {
            Self::format_with_coords(engine)
        } else {
            Self::format_compact(engine)
        };
        format!("{}\n{}", Self::status_line(engine), grid)
    }

    pub fn format_summary(summary: &RunSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!("Engine: {}\n", summary.engine));
        output.push_str(&format!("Ticks: {}\n", summary.ticks));
        output.push_str(&format!("Generations advanced: {}\n", summary.generations_advanced));
        output.push_str(&format!("Paused ticks: {}\n", summary.paused_ticks));
        output.push_str(&format!("Resets: {}\n", summary.resets));
        output.push_str(&format!("Final generation: {}\n", summary.final_generation));
        output.push_str(&format!("Final population: {}\n", summary.final_population));

        if let (Some(min), Some(max)) = (
            summary.population_history.iter().min(),
            summary.population_history.iter().max(),
        ) {
            output.push_str(&format!("Population range: {} - {}\n", min, max));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Blue => 34,
        }
    }
}
