//! Tooling & Integration Layer
//!
//! Command-line surface over the engine.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
