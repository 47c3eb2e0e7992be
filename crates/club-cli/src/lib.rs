//! Computer-club simulator CLI library.
//!
//! This crate provides the command-line interface for the simulator.

mod cli;

pub use cli::Cli;
