//! Driving loop and state validation for the simulation engines

pub mod driver;
pub mod validator;

pub use driver::{Command, RunSummary, Simulation, TickOutcome};
pub use validator::{RuleViolation, TransitionValidator};
