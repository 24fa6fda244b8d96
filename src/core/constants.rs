/// Analysis-wide constants to avoid magic values throughout the codebase.
///
/// Every threshold here is a literal cutoff with no underlying model. They are
/// grouped by the analysis that consumes them so a reader can find the number
/// next to its siblings.
/// Output format constants
pub mod output_formats {
    /// Compact single-line JSON
    pub const JSON: &str = "json";
    /// Indented JSON for humans
    pub const PRETTY: &str = "pretty";

    /// Default output format
    pub const DEFAULT: &str = JSON;

    /// All valid output formats
    pub const ALL: [&str; 2] = [JSON, PRETTY];
}

/// Lap-time plausibility limits applied when records enter an analysis
pub mod lap_limits {
    /// Race laps slower than this (seconds) are dropped
    pub const RACE_LAP_CEILING_SECONDS: f64 = 120.0;
    /// Plot and qualifying laps must be strictly below this (seconds)
    pub const STAT_LAP_CEILING_SECONDS: f64 = 300.0;
}

/// Stint segmentation thresholds
pub mod stints {
    /// A gap of more than this many lap numbers starts a new stint
    pub const MAX_LAP_NUMBER_GAP: u32 = 3;
    /// A lap-to-lap time jump of more than this (seconds) starts a new stint
    pub const MAX_LAP_TIME_JUMP_SECONDS: f64 = 3.5;
    /// Fragments shorter than this are discarded
    pub const MIN_STINT_LAPS: usize = 3;
}

/// Tyre management scoring weights and parameters
pub mod tire_score {
    pub const STINT_LENGTH_WEIGHT: f64 = 0.35;
    pub const CONSISTENCY_WEIGHT: f64 = 0.30;
    pub const TREND_WEIGHT: f64 = 0.15;
    pub const RANGE_WEIGHT: f64 = 0.10;
    pub const POSITION_WEIGHT: f64 = 0.10;

    /// Score returned when there is nothing to score
    pub const NEUTRAL_SCORE: f64 = 5.0;
    pub const MAX_SCORE: f64 = 10.0;

    /// Race laps covered by one expected stop
    pub const LAPS_PER_STOP: f64 = 25.0;
    pub const STINT_LENGTH_SCALE: f64 = 9.5;
    pub const MAX_LONG_STINT_BONUS: f64 = 2.0;

    /// Base degradation threshold (seconds per lap)
    pub const DEGRADATION_THRESHOLD: f64 = 0.12;

    pub const TREND_BASELINE: f64 = 7.0;
    pub const TREND_PENALTY_SCALE: f64 = 10.0;
    pub const TREND_REWARD_SCALE: f64 = 5.0;
    pub const POSITION_FACTOR_STEP: f64 = 0.02;
    pub const POSITION_FACTOR_FLOOR: f64 = 0.8;

    pub const BASE_EXPECTED_RANGE: f64 = 2.0;
    pub const EXPECTED_RANGE_STEP: f64 = 0.15;
    pub const RANGE_PENALTY_SCALE: f64 = 5.0;

    pub const POSITION_BASELINE: f64 = 7.0;
    pub const POSITION_GAIN_STEP: f64 = 0.5;
    pub const POSITION_LOSS_STEP: f64 = 0.4;
    pub const POSITION_SCORE_MIN: f64 = 4.0;
    pub const POSITION_SCORE_MAX: f64 = 10.0;

    pub const PODIUM_GAINED_BONUS: f64 = 1.15;
    pub const PODIUM_HELD_BONUS: f64 = 1.10;
    pub const TOP_TEN_FIGHT_BONUS: f64 = 1.08;
    pub const PODIUM_POSITION: u32 = 3;
    pub const POINTS_POSITION: u32 = 10;
}

/// Qualitative rating cutoffs
pub mod ratings {
    /// Stddev (seconds) below which consistency is rated High
    pub const HIGH_CONSISTENCY: f64 = 0.5;
    /// Stddev (seconds) below which consistency is rated Medium
    pub const MEDIUM_CONSISTENCY: f64 = 1.0;

    pub const EXCELLENT_TIRE_SCORE: f64 = 8.0;
    pub const GOOD_TIRE_SCORE: f64 = 6.5;
    pub const AVERAGE_TIRE_SCORE: f64 = 5.0;
}

/// Proximity tiers relative to a session best
pub mod tiers {
    /// Within this fraction of the best is tier 2
    pub const CLOSE_FRACTION: f64 = 0.01;
    /// Within this fraction of the best is tier 3
    pub const NEAR_FRACTION: f64 = 0.02;
}

/// Position reconstruction thresholds
pub mod overtakes {
    /// A lap this much faster (seconds, negative) than the previous counts as DRS-assisted
    pub const DRS_DELTA_SECONDS: f64 = -0.6;
}

/// ASCII chart geometry
pub mod chart {
    pub const WIDTH: usize = 60;
    pub const HEIGHT: usize = 20;
    /// Columns reserved for the y-axis labels and the axis line
    pub const PLOT_LEFT: usize = 7;
    pub const Y_TICKS: usize = 5;
    /// Fraction of the time range added above and below the data
    pub const RANGE_PADDING: f64 = 0.10;
    /// Padding (seconds) used when every lap has the same time
    pub const FLAT_RANGE_PADDING_SECONDS: f64 = 0.5;
    pub const MIN_POINTS: usize = 3;

    pub const FASTEST_MARKER: char = '*';
    pub const CLOSE_MARKER: char = 'o';
    pub const NEAR_MARKER: char = '+';
    pub const SLOWER_MARKER: char = '.';
    pub const Y_AXIS: char = '|';
    pub const X_AXIS: char = '-';
    pub const ORIGIN: char = '+';
}
