//! Configuration management for the Game of Life simulation

pub mod settings;

pub use settings::{
    CliOverrides, DenseConfig, EngineKind, OutputConfig, OutputFormat, Settings, SimulationConfig,
    SparseConfig,
};
