//! Inter-driver gap and interval analysis.
//!
//! Every comparison pairs the i-th recorded lap of one driver with the i-th
//! recorded lap of the other, not laps with the same number. When the two
//! series differ in length (retirements, missing laps) the comparison
//! silently truncates to the shorter one.

use log::{debug, warn};
use serde::Serialize;

use super::{LapSeries, laps_by_driver, stats};
use crate::core::constants::lap_limits;
use crate::core::types::{LapRecord, RaceResult, by_finish_position};

/// The driver whose laps track this driver's most closely
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestRival {
    pub driver_id: String,
    /// Mean absolute per-lap delta in seconds
    pub avg_gap: f64,
}

/// Interval statistics for one driver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapProfile {
    pub driver_id: String,
    pub finish_position: u32,
    /// Driver classified one place ahead, if any
    pub driver_ahead: Option<String>,
    /// Mean per-lap delta to the driver ahead (positive = slower)
    pub gap_to_ahead: Option<f64>,
    /// Mean per-lap delta to the race winner
    pub avg_gap_to_leader: Option<f64>,
    /// Standard deviation of the per-lap deltas to the leader
    pub gap_consistency: Option<f64>,
    pub closest_rival: Option<ClosestRival>,
}

/// Index-aligned `this[i] - other[i]` over the laps both drivers recorded.
fn lap_deltas(this: &[(u32, f64)], other: &[(u32, f64)]) -> Vec<f64> {
    this.iter()
        .zip(other)
        .map(|(&(_, mine), &(_, theirs))| mine - theirs)
        .collect()
}

fn closest_rival<'a>(
    driver_id: &str,
    series: &[(u32, f64)],
    field: &[(&'a str, &'a LapSeries)],
) -> Option<ClosestRival> {
    let mut best: Option<(&str, f64)> = None;

    for &(rival_id, rival_series) in field {
        if rival_id == driver_id {
            continue;
        }
        let absolute: Vec<f64> = lap_deltas(series, rival_series)
            .into_iter()
            .map(f64::abs)
            .collect();
        let Some(avg) = stats::mean(&absolute) else {
            continue;
        };
        if best.is_none_or(|(_, current)| avg < current) {
            best = Some((rival_id, avg));
        }
    }

    best.map(|(driver_id, avg_gap)| ClosestRival {
        driver_id: driver_id.to_string(),
        avg_gap,
    })
}

/// Gap profile for every classified driver, in finishing order.
///
/// A driver with no laps, or with no overlapping laps against the car ahead or
/// the leader, gets `None` for that gap; the rest of the field is unaffected.
pub fn gap(race_results: &[RaceResult], lap_records: &[LapRecord]) -> Vec<GapProfile> {
    let grouped = laps_by_driver(lap_records, lap_limits::RACE_LAP_CEILING_SECONDS);
    let classified = by_finish_position(race_results);
    let leader = classified.first().map(|r| r.driver_id.as_str());

    // Only drivers with laps can be rivals; keep finishing order for stable ties
    let field: Vec<(&str, &LapSeries)> = classified
        .iter()
        .filter_map(|r| {
            grouped
                .get_key_value(r.driver_id.as_str())
                .map(|(id, series)| (*id, series))
        })
        .collect();

    let profiles: Vec<GapProfile> = classified
        .iter()
        .map(|result| {
            let driver_id = result.driver_id.as_str();
            let ahead = classified
                .iter()
                .find(|r| r.finish_position + 1 == result.finish_position)
                .map(|r| r.driver_id.as_str());

            let Some(series) = grouped.get(driver_id) else {
                debug!("gap: no valid laps for {driver_id}");
                return GapProfile {
                    driver_id: driver_id.to_string(),
                    finish_position: result.finish_position,
                    driver_ahead: ahead.map(str::to_string),
                    gap_to_ahead: None,
                    avg_gap_to_leader: None,
                    gap_consistency: None,
                    closest_rival: None,
                };
            };

            let deltas_to = |other: &str| -> Vec<f64> {
                grouped
                    .get(other)
                    .map(|other_series| lap_deltas(series, other_series))
                    .unwrap_or_default()
            };

            let gap_to_ahead = ahead.and_then(|id| {
                let mean = stats::mean(&deltas_to(id));
                if mean.is_none() {
                    warn!("gap: no overlapping laps between {driver_id} and {id}");
                }
                mean
            });

            let leader_deltas = match leader {
                Some(id) if id != driver_id => deltas_to(id),
                _ => Vec::new(),
            };

            GapProfile {
                driver_id: driver_id.to_string(),
                finish_position: result.finish_position,
                driver_ahead: ahead.map(str::to_string),
                gap_to_ahead,
                avg_gap_to_leader: stats::mean(&leader_deltas),
                gap_consistency: stats::std_dev(&leader_deltas),
                closest_rival: closest_rival(driver_id, series, &field),
            }
        })
        .collect();

    debug!("gap: {} profile(s)", profiles.len());
    profiles
}
