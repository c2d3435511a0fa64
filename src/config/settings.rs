//! Configuration settings for the Game of Life simulation

use crate::engine::dense::check_grid_size;
use crate::engine::sparse::check_blob_limits;
use crate::error::ConfigurationError;
use crate::game_of_life::{BlobLimits, Bounds};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub dense: DenseConfig,
    pub sparse: SparseConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub engine: EngineKind,
    pub generations: usize,
    pub fps: u32,
    pub seed: Option<u64>,
    pub check_invariants: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Dense,
    Sparse,
}

/// Dense grid size, in cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseConfig {
    pub grid_width: usize,
    pub grid_height: usize,
}

/// Sparse visible area, in pixels, and random-walk seeding limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub cell_size: i32,
    pub max_groups: usize,
    pub max_group_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub render_frames: bool,
    /// Number rows and columns in rendered frames
    #[serde(default)]
    pub show_coordinates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                engine: EngineKind::Dense,
                generations: 100,
                fps: 60,
                seed: None,
                check_invariants: false,
            },
            dense: DenseConfig {
                grid_width: 60,
                grid_height: 60,
            },
            sparse: SparseConfig {
                screen_width: 600,
                screen_height: 600,
                cell_size: 10,
                max_groups: 20,
                max_group_size: 15,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                render_frames: true,
                show_coordinates: false,
            },
        }
    }
}

impl DenseConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_grid_size(self.grid_width, self.grid_height)
    }
}

impl SparseConfig {
    pub fn bounds(&self) -> Result<Bounds, ConfigurationError> {
        Bounds::new(self.screen_width, self.screen_height, self.cell_size)
    }

    pub fn limits(&self) -> BlobLimits {
        BlobLimits {
            max_groups: self.max_groups,
            max_group_size: self.max_group_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.bounds()?;
        check_blob_limits(self.limits())
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        // fps only paces rendered frames
        if self.output.render_frames && self.simulation.fps == 0 {
            anyhow::bail!("Frame rate must be positive when rendering frames");
        }

        match self.simulation.engine {
            EngineKind::Dense => self.dense.validate().context("Invalid dense engine settings")?,
            EngineKind::Sparse => self.sparse.validate().context("Invalid sparse engine settings")?,
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(engine) = cli_overrides.engine {
            self.simulation.engine = engine;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(fps) = cli_overrides.fps {
            self.simulation.fps = fps;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if cli_overrides.check_invariants {
            self.simulation.check_invariants = true;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.no_render {
            self.output.render_frames = false;
        }
        if cli_overrides.coords {
            self.output.show_coordinates = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub engine: Option<EngineKind>,
    pub generations: Option<usize>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub check_invariants: bool,
    pub format: Option<OutputFormat>,
    pub no_render: bool,
    pub coords: bool,
}
