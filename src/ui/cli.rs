// Command-line interface definitions and parsing for lapstat

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Command, Parser, Subcommand};
use clap_complete::{Generator, generate};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Output & Verbosity
    /// Suppress all logging
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: json)
    #[arg(long, global = true, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pace, consistency and tyre-management profile per driver
    Pace {
        /// Session snapshot (JSON)
        snapshot: String,
    },
    /// Gaps to the car ahead and to the leader
    Gap {
        /// Session snapshot (JSON)
        snapshot: String,
    },
    /// Estimated qualifying sectors and theoretical best lap
    Sector {
        /// Session snapshot (JSON)
        snapshot: String,
    },
    /// Reconstructed overtakes per driver
    Overtake {
        /// Session snapshot (JSON)
        snapshot: String,
    },
    /// Lap-time progression chart for one driver
    Plot {
        /// Session snapshot (JSON)
        snapshot: String,

        /// Driver to chart (falls back to `default_driver` from config)
        #[arg(short = 'd', long, value_name = "ID")]
        driver: Option<String>,

        /// Print the character grid instead of JSON
        #[arg(long)]
        grid: bool,
    },
    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Snapshot path for analysis commands
    pub fn snapshot(&self) -> Option<&str> {
        match self {
            Commands::Pace { snapshot }
            | Commands::Gap { snapshot }
            | Commands::Sector { snapshot }
            | Commands::Overtake { snapshot }
            | Commands::Plot { snapshot, .. } => Some(snapshot),
            Commands::Completions { .. } => None,
        }
    }

    /// Name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Pace { .. } => "pace",
            Commands::Gap { .. } => "gap",
            Commands::Sector { .. } => "sector",
            Commands::Overtake { .. } => "overtake",
            Commands::Plot { .. } => "plot",
            Commands::Completions { .. } => "completions",
        }
    }
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let driver = match cli.command {
        Commands::Plot { ref driver, .. } => driver.clone(),
        _ => None,
    };

    CliConfig {
        output_format: cli.format.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        driver,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// Print shell completions to stdout
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    generate(
        generator,
        app,
        app.get_name().to_string(),
        &mut std::io::stdout(),
    );
}
