//! User interface and interaction
//!
//! CLI parsing, result printing and shell completion generation.

pub mod cli;
pub mod output;

pub use cli::{Cli, Commands, cli_to_config, print_completions};
pub use output::{ExitStatus, print_result};
