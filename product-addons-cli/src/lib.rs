//! `addons` command implementation.
//!
//! Exposed as a library so the commands can be exercised without spawning
//! the binary.

pub mod check;
pub mod cli;

pub use cli::{Cli, Commands};

/// Exit code returned when a submission fails validation.
pub const VALIDATION_FAILED_EXIT_CODE: i32 = 2;
