//! Command line front end for the Game of Life simulation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_engine::{
    config::{CliOverrides, EngineKind, OutputFormat, Settings},
    game_of_life::Pattern,
    run_simulation,
    utils::{ColorOutput, GridFormatter},
    RunOptions,
};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Conway's Game of Life simulation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print each generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Engine to run (overrides config)
        #[arg(short, long, value_enum)]
        engine: Option<EngineKind>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Random seed for initial conditions (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Frames per second while rendering (overrides config)
        #[arg(long)]
        fps: Option<u32>,

        /// Start from a known pattern instead of random cells
        #[arg(short, long, value_enum)]
        pattern: Option<Pattern>,

        /// Summary output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Skip frame output and pacing
        #[arg(long)]
        no_render: bool,

        /// Number rows and columns in rendered frames
        #[arg(long)]
        coords: bool,

        /// Regenerate initial conditions whenever every cell has died
        #[arg(long)]
        reset_on_extinction: bool,

        /// Check engine invariants after every generation
        #[arg(long)]
        check_invariants: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create default and example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config, engine, generations, seed, fps, pattern, format,
            no_render, coords, reset_on_extinction, check_invariants, verbose,
        } => {
            init_logging(verbose);
            let overrides = CliOverrides {
                engine,
                generations,
                fps,
                seed,
                check_invariants,
                format,
                no_render,
                coords,
            };
            let options = RunOptions {
                pattern,
                reset_on_extinction,
            };
            run_command(config, overrides, options, verbose)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

/// `RUST_LOG` takes precedence over the `--verbose` level
fn logger_builder(verbose: bool) -> env_logger::Builder {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env().format_timestamp(None);
    builder
}

fn init_logging(verbose: bool) {
    logger_builder(verbose).init();
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, options: RunOptions, verbose: bool) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    if verbose {
        log::debug!("Engine: {:?}", settings.simulation.engine);
        log::debug!("Generations: {}", settings.simulation.generations);
        log::debug!("Seed: {:?}", settings.simulation.seed);
        log::debug!("Dense grid: {}x{}", settings.dense.grid_width, settings.dense.grid_height);
        log::debug!(
            "Sparse area: {}x{} px, cell size {}",
            settings.sparse.screen_width, settings.sparse.screen_height, settings.sparse.cell_size
        );
    }

    let render_frames = settings.output.render_frames;
    let show_coordinates = settings.output.show_coordinates;
    let start_time = Instant::now();
    let summary = run_simulation(&settings, &options, |engine| {
        if render_frames {
            println!("{}", GridFormatter::format_frame(engine, show_coordinates));
        }
    })
    .context("Simulation failed")?;

    log::info!(
        "Finished {} ticks in {:.3}s",
        summary.ticks,
        start_time.elapsed().as_secs_f64()
    );

    match settings.output.format {
        OutputFormat::Text => {
            println!("{}", ColorOutput::success("Simulation Summary:"));
            println!("{}", GridFormatter::format_summary(&summary));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize run summary")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up configuration files..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Small dense torus, fast enough to watch
    let mut dense_config = Settings::default();
    dense_config.simulation.engine = EngineKind::Dense;
    dense_config.simulation.fps = 10;
    dense_config.dense.grid_width = 40;
    dense_config.dense.grid_height = 20;
    dense_config.to_file(&examples_dir.join("dense.yaml"))?;

    // Random-walk blobs on a bounded area with invariant checks
    let mut sparse_config = Settings::default();
    sparse_config.simulation.engine = EngineKind::Sparse;
    sparse_config.simulation.fps = 10;
    sparse_config.simulation.check_invariants = true;
    sparse_config.sparse.screen_width = 400;
    sparse_config.sparse.screen_height = 200;
    sparse_config.to_file(&examples_dir.join("sparse.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/examples/sparse.yaml");

    Ok(())
}
