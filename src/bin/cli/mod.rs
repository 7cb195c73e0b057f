//! CLI Module Organization
//!
//! - args: CLI argument structures and output enums
//! - commands: command execution, input loading and result display

pub mod args;
pub mod commands;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
