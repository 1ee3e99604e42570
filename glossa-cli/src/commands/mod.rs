//! Command modules for the glossa-cli host.
//!
//! This module contains implementations for all available subcommands.
//! Each subcommand is implemented in its own file following a standardized pattern.

pub mod traits;

pub mod check;
pub mod run;

// Re-export command types and functions (used by main.rs)
#[allow(unused_imports)]
pub use check::{run_check, CheckArgs};
#[allow(unused_imports)]
pub use run::{run_program, RunArgs};
