use crate::config::Config;
use log::{debug, error, info, warn};

/// Level filter for the given verbosity flags. Quiet wins over verbose.
pub fn level_filter(verbose: bool, quiet: bool) -> log::LevelFilter {
    if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = level_filter(verbose, quiet);

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let format = config.output_format.as_deref().unwrap_or("json");
    let driver = config.default_driver.as_deref().unwrap_or("-");
    info!("Configuration: format={format}, default_driver={driver}");
}

/// Log what a snapshot contains
pub fn log_snapshot_info(
    season: Option<u32>,
    round: Option<u32>,
    results: usize,
    laps: usize,
    qualifying: usize,
) {
    match (season, round) {
        (Some(season), Some(round)) => info!("Snapshot: season {season}, round {round}"),
        _ => info!("Snapshot: unlabelled session"),
    }
    debug!("  {results} result(s), {laps} lap(s), {qualifying} qualifying entry(ies)");
}

/// Warning text for raw laps that could not be turned into lap records
pub fn dropped_records_message(dropped: usize, total: usize) -> Option<String> {
    (dropped > 0).then(|| format!("Dropped {dropped} of {total} lap record(s) with unusable times"))
}

/// Log raw laps that could not be turned into lap records
pub fn log_dropped_records(dropped: usize, total: usize) {
    if let Some(message) = dropped_records_message(dropped, total) {
        warn!("{message}");
    }
}

/// Log analysis completion
pub fn log_analysis_complete(operation: &str, entries: usize, duration_ms: u128) {
    info!("{operation}: {entries} entr(ies) produced ({duration_ms}ms)");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
