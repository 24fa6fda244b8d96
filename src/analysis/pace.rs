//! Race pace profiles and the tyre management score.
//!
//! The score is a 0-10 heuristic built from five weighted parts (stint
//! length, per-stint degradation, pace trend, lap-time range and positions
//! gained), then scaled by a small bonus for podium or top-ten results.

use log::debug;
use serde::Serialize;

use super::stints::{self, Stint};
use super::{laps_by_driver, race_length, stats, times};
use crate::core::constants::{lap_limits, ratings, tire_score as ts};
use crate::core::types::{LapRecord, RaceResult, by_finish_position, cmp_seconds};

/// Qualitative consistency label from a lap-time standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConsistencyRating {
    High,
    Medium,
    Low,
}

impl ConsistencyRating {
    pub fn from_std_dev(std_dev: f64) -> Self {
        if std_dev < ratings::HIGH_CONSISTENCY {
            Self::High
        } else if std_dev < ratings::MEDIUM_CONSISTENCY {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Qualitative label for a tyre management score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TireManagementRating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl TireManagementRating {
    pub fn from_score(score: f64) -> Self {
        if score >= ratings::EXCELLENT_TIRE_SCORE {
            Self::Excellent
        } else if score >= ratings::GOOD_TIRE_SCORE {
            Self::Good
        } else if score >= ratings::AVERAGE_TIRE_SCORE {
            Self::Average
        } else {
            Self::Poor
        }
    }
}

/// Aggregate pace statistics for one driver in one race
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverPaceProfile {
    pub driver_id: String,
    pub constructor_name: String,
    pub finish_position: u32,
    pub has_fastest_lap: bool,
    /// Valid lap times in lap order
    pub times_in_seconds: Vec<f64>,
    pub avg_time: f64,
    pub median: f64,
    pub best_time: f64,
    /// Population standard deviation over all valid laps
    pub consistency: f64,
    /// Nearest-rank interquartile range
    pub iqr: f64,
    pub stints: Vec<Stint>,
    /// Stint with the lowest average time, if any stint was long enough
    pub best_stint: Option<Stint>,
    pub tire_management_score: f64,
    pub consistency_rating: ConsistencyRating,
    pub tire_rating: TireManagementRating,
}

/// Race context needed to position-adjust the tyre score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    /// Laps in the race (highest lap number recorded by anyone)
    pub total_race_laps: u32,
    pub start_position: u32,
    pub finish_position: u32,
}

impl ScoringContext {
    fn finish_index(&self) -> f64 {
        f64::from(self.finish_position.saturating_sub(1))
    }

    fn position_factor(&self) -> f64 {
        (1.0 - self.finish_index() * ts::POSITION_FACTOR_STEP).max(ts::POSITION_FACTOR_FLOOR)
    }
}

/// Expected stint length given one stop per 25 laps plus one.
pub fn target_stint_length(total_race_laps: u32) -> f64 {
    let total = f64::from(total_race_laps);
    total / ((total / ts::LAPS_PER_STOP).ceil() + 1.0)
}

fn stint_length_score(stints: &[Stint], target: f64) -> f64 {
    let lengths: Vec<f64> = stints.iter().map(|s| s.lap_count as f64).collect();
    let (Some(avg), Some(longest)) = (stats::mean(&lengths), stats::max(&lengths)) else {
        return ts::NEUTRAL_SCORE;
    };

    let base = (avg / target * ts::STINT_LENGTH_SCALE).min(ts::MAX_SCORE);
    let bonus = if longest > target {
        ((longest / target - 1.0) * ts::MAX_LONG_STINT_BONUS).min(ts::MAX_LONG_STINT_BONUS)
    } else {
        0.0
    };
    base + bonus
}

fn degradation_score(stints: &[Stint], target: f64) -> f64 {
    let per_stint: Vec<f64> = stints
        .iter()
        .map(|stint| {
            let threshold = ts::DEGRADATION_THRESHOLD * (1.0 + stint.lap_count as f64 / target);
            (ts::MAX_SCORE - stint.degradation() / threshold * ts::MAX_SCORE).max(0.0)
        })
        .collect();
    stats::mean(&per_stint).unwrap_or(ts::NEUTRAL_SCORE)
}

fn trend_score(trend: f64, ctx: &ScoringContext) -> f64 {
    if trend > 0.0 {
        (ts::TREND_BASELINE - trend * ts::TREND_PENALTY_SCALE * ctx.position_factor()).max(0.0)
    } else {
        (ts::TREND_BASELINE + trend.abs() * ts::TREND_REWARD_SCALE).min(ts::MAX_SCORE)
    }
}

fn range_score(times: &[f64], ctx: &ScoringContext) -> f64 {
    let (Some(fastest), Some(slowest)) = (stats::min(times), stats::max(times)) else {
        return ts::NEUTRAL_SCORE;
    };
    let expected = ts::BASE_EXPECTED_RANGE + ctx.finish_index() * ts::EXPECTED_RANGE_STEP;
    (ts::MAX_SCORE - (slowest - fastest) / expected * ts::RANGE_PENALTY_SCALE).max(0.0)
}

fn position_change_score(ctx: &ScoringContext) -> f64 {
    let gained = f64::from(ctx.start_position) - f64::from(ctx.finish_position);
    let score = if gained >= 0.0 {
        ts::POSITION_BASELINE + gained * ts::POSITION_GAIN_STEP
    } else {
        ts::POSITION_BASELINE + gained * ts::POSITION_LOSS_STEP
    };
    score.clamp(ts::POSITION_SCORE_MIN, ts::POSITION_SCORE_MAX)
}

/// Multiplier for podium finishes held or gained, or a climb into the top ten.
pub fn result_bonus(start_position: u32, finish_position: u32) -> f64 {
    if finish_position <= ts::PODIUM_POSITION {
        if start_position > ts::PODIUM_POSITION {
            ts::PODIUM_GAINED_BONUS
        } else {
            ts::PODIUM_HELD_BONUS
        }
    } else if finish_position <= ts::POINTS_POSITION && start_position > ts::POINTS_POSITION {
        ts::TOP_TEN_FIGHT_BONUS
    } else {
        1.0
    }
}

/// Composite 0-10 tyre management score.
///
/// Returns the neutral score 5.0 for an empty lap list.
pub fn tire_management_score(times: &[f64], stints: &[Stint], ctx: &ScoringContext) -> f64 {
    if times.is_empty() {
        return ts::NEUTRAL_SCORE;
    }

    let total_laps = ctx.total_race_laps.max(times.len() as u32);
    let target = target_stint_length(total_laps);

    let stint_trends: Vec<f64> = stints.iter().map(|s| s.trend).collect();
    let trend = stats::mean(&stint_trends)
        .or_else(|| stats::trend(times))
        .unwrap_or(0.0);

    let weighted = stint_length_score(stints, target) * ts::STINT_LENGTH_WEIGHT
        + degradation_score(stints, target) * ts::CONSISTENCY_WEIGHT
        + trend_score(trend, ctx) * ts::TREND_WEIGHT
        + range_score(times, ctx) * ts::RANGE_WEIGHT
        + position_change_score(ctx) * ts::POSITION_WEIGHT;

    (weighted * result_bonus(ctx.start_position, ctx.finish_position)).clamp(0.0, ts::MAX_SCORE)
}

fn build_profile(
    result: &RaceResult,
    series: &[(u32, f64)],
    ctx: &ScoringContext,
) -> Option<DriverPaceProfile> {
    let times = times(series);
    let consistency = stats::std_dev(&times)?;
    let stints = stints::segment(series);
    let best_stint = stints
        .iter()
        .min_by(|a, b| cmp_seconds(&a.avg_time, &b.avg_time))
        .cloned();
    let score = tire_management_score(&times, &stints, ctx);

    Some(DriverPaceProfile {
        driver_id: result.driver_id.clone(),
        constructor_name: result.constructor_name.clone(),
        finish_position: result.finish_position,
        has_fastest_lap: result.is_fastest_lap,
        avg_time: stats::mean(&times)?,
        median: stats::median(&times)?,
        best_time: stats::min(&times)?,
        consistency,
        iqr: stats::iqr(&times)?,
        times_in_seconds: times,
        stints,
        best_stint,
        tire_management_score: score,
        consistency_rating: ConsistencyRating::from_std_dev(consistency),
        tire_rating: TireManagementRating::from_score(score),
    })
}

/// Pace profile for every classified driver with at least one valid lap,
/// in finishing order.
pub fn pace(race_results: &[RaceResult], lap_records: &[LapRecord]) -> Vec<DriverPaceProfile> {
    let grouped = laps_by_driver(lap_records, lap_limits::RACE_LAP_CEILING_SECONDS);
    let total_race_laps = race_length(&grouped);
    let driver_count = race_results.len();

    let profiles: Vec<DriverPaceProfile> = by_finish_position(race_results)
        .into_iter()
        .filter_map(|result| {
            let Some(series) = grouped.get(result.driver_id.as_str()) else {
                debug!("pace: no valid laps for {}", result.driver_id);
                return None;
            };
            let ctx = ScoringContext {
                total_race_laps,
                start_position: result.start_position(driver_count),
                finish_position: result.finish_position,
            };
            build_profile(result, series, &ctx)
        })
        .collect();

    debug!(
        "pace: {} profile(s) from {} result(s), {} race laps",
        profiles.len(),
        driver_count,
        total_race_laps
    );
    profiles
}
