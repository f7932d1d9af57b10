//! CLI subcommand implementations.

pub mod check;
pub mod needs;
pub mod peaks;
pub mod production;
