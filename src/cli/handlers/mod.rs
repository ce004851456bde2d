//! Command handlers for CLI subcommands

mod check_config;
mod serve;

pub use check_config::CheckConfigCommandHandler;
pub use serve::ServeCommandHandler;
