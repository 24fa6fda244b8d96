use clap::{CommandFactory, Parser};
use lapstat::analysis::{PlotResult, gap, overtake, pace, plot, sector};
use lapstat::config::{CliConfig, Config};
use lapstat::logging;
use lapstat::snapshot::{SessionSnapshot, driver_laps};
use lapstat::ui::output::{ExitStatus, format_grid, print_result};
use lapstat::ui::{Cli, Commands, cli_to_config, print_completions};
use lapstat::{LapRecord, LapstatError, Result};

use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_lapstat_logic(&cli) {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(ExitStatus::Failure.code());
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main analysis logic extracted from main() for testing
pub fn run_lapstat_logic(cli: &Cli) -> Result<ExitStatus> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    let (snapshot, records) = load_snapshot(&cli.command)?;
    let pretty = config.is_pretty();
    let started = Instant::now();
    let operation = cli.command.name();

    let status = match cli.command {
        Commands::Pace { .. } => {
            let profiles = pace(&snapshot.results, &records);
            logging::log_analysis_complete(operation, profiles.len(), started.elapsed().as_millis());
            print_result(&profiles, pretty)?;
            ExitStatus::Success
        }
        Commands::Gap { .. } => {
            let profiles = gap(&snapshot.results, &records);
            logging::log_analysis_complete(operation, profiles.len(), started.elapsed().as_millis());
            print_result(&profiles, pretty)?;
            ExitStatus::Success
        }
        Commands::Sector { .. } => {
            let report = sector(&snapshot.qualifying);
            logging::log_analysis_complete(
                operation,
                report.profiles.len(),
                started.elapsed().as_millis(),
            );
            print_result(&report, pretty)?;
            ExitStatus::Success
        }
        Commands::Overtake { .. } => {
            let overtakes = overtake(&snapshot.results, &records);
            logging::log_analysis_complete(operation, overtakes.len(), started.elapsed().as_millis());
            print_result(&overtakes, pretty)?;
            ExitStatus::Success
        }
        Commands::Plot { grid, .. } => {
            let driver = config.default_driver.as_deref().ok_or_else(|| {
                LapstatError::InvalidArgument(
                    "plot needs a driver: pass --driver or set default_driver in config"
                        .to_string(),
                )
            })?;
            let result = plot(&driver_laps(&records, driver)?);
            let plotted = match result {
                PlotResult::Rendered(ref chart) => chart.points.len(),
                PlotResult::InsufficientData { .. } => 0,
            };
            logging::log_analysis_complete(operation, plotted, started.elapsed().as_millis());
            display_plot(&result, driver, grid, pretty)?;
            ExitStatus::for_plot(&result)
        }
        Commands::Completions { .. } => ExitStatus::Success,
    };

    Ok(status)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Read the snapshot named by an analysis command, parse its laps once
/// and log what it holds
pub fn load_snapshot(command: &Commands) -> Result<(SessionSnapshot, Vec<LapRecord>)> {
    let path = command.snapshot().ok_or_else(|| {
        LapstatError::InvalidArgument(format!("'{}' takes no snapshot", command.name()))
    })?;
    let snapshot = SessionSnapshot::load_from_file(path)
        .inspect_err(|e| logging::log_error("Could not load snapshot", Some(e)))?;

    logging::log_snapshot_info(
        snapshot.season,
        snapshot.round,
        snapshot.results.len(),
        snapshot.laps.len(),
        snapshot.qualifying.len(),
    );
    let (records, dropped) = snapshot.lap_records();
    logging::log_dropped_records(dropped, dropped + records.len());

    Ok((snapshot, records))
}

/// Print a plot outcome as a character grid or as JSON
pub fn display_plot(result: &PlotResult, driver: &str, grid: bool, pretty: bool) -> Result<()> {
    if !grid {
        return print_result(result, pretty);
    }
    match result {
        PlotResult::Rendered(chart) => println!("{}", format_grid(chart)),
        PlotResult::InsufficientData {
            available,
            required,
        } => eprintln!(
            "Not enough valid laps to chart {driver}: {available} available, {required} required"
        ),
    }
    Ok(())
}
