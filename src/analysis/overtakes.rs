//! Overtake reconstruction from lap times.
//!
//! Positions are approximated by ranking every driver's time for a single lap
//! number, fastest first. This is not cumulative race time, so it diverges
//! from true track order around pit stops and lapped traffic. Drivers with no
//! time for a lap are left out of that lap's ranking.

use log::debug;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::{laps_by_driver, race_length};
use crate::core::constants::{lap_limits, overtakes::DRS_DELTA_SECONDS};
use crate::core::types::{LapRecord, RaceResult, by_finish_position, cmp_seconds};

/// A position gain on one lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overtake {
    pub lap: u32,
    pub positions_gained: u32,
    /// Gain coincided with a lap more than 0.6 s faster than the previous one
    pub is_drs: bool,
}

/// Reconstructed overtakes for one driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OvertakeRecord {
    pub driver_id: String,
    pub start_pos: u32,
    pub finish_pos: u32,
    pub overtakes: Vec<Overtake>,
    /// `max(0, start_pos - finish_pos)`
    pub total_positions_gained: u32,
}

impl OvertakeRecord {
    pub fn drs_overtakes(&self) -> usize {
        self.overtakes.iter().filter(|o| o.is_drs).count()
    }
}

/// Per-lap rank of each driver, keyed by `(driver, lap)`.
fn lap_positions<'a>(
    laps: &FxHashMap<&'a str, Vec<(u32, f64)>>,
) -> FxHashMap<(&'a str, u32), u32> {
    let mut entries: Vec<(u32, f64, &str)> = laps
        .iter()
        .flat_map(|(&driver, series)| series.iter().map(move |&(lap, t)| (lap, t, driver)))
        .collect();
    // Ties on time fall back to driver id so the ranking is deterministic
    entries.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| cmp_seconds(&a.1, &b.1))
            .then_with(|| a.2.cmp(b.2))
    });

    let mut positions = FxHashMap::default();
    let mut current_lap = None;
    let mut rank = 0;
    for (lap, _, driver) in entries {
        if current_lap != Some(lap) {
            current_lap = Some(lap);
            rank = 0;
        }
        rank += 1;
        positions.insert((driver, lap), rank);
    }
    positions
}

/// Overtake record for every classified driver, in finishing order.
pub fn overtake(race_results: &[RaceResult], lap_records: &[LapRecord]) -> Vec<OvertakeRecord> {
    let grouped = laps_by_driver(lap_records, lap_limits::RACE_LAP_CEILING_SECONDS);
    let positions = lap_positions(&grouped);
    let driver_count = race_results.len();
    debug!(
        "overtake: ranking {} driver(s) over {} lap(s)",
        grouped.len(),
        race_length(&grouped)
    );

    by_finish_position(race_results)
        .into_iter()
        .map(|result| {
            let driver_id = result.driver_id.as_str();
            let mut overtakes = Vec::new();
            let mut previous: Option<(u32, f64)> = None;

            for &(lap, time) in grouped.get(driver_id).map(Vec::as_slice).unwrap_or_default() {
                let Some(&position) = positions.get(&(driver_id, lap)) else {
                    continue;
                };
                if let Some((previous_position, previous_time)) = previous
                    && position < previous_position
                {
                    overtakes.push(Overtake {
                        lap,
                        positions_gained: previous_position - position,
                        is_drs: time - previous_time < DRS_DELTA_SECONDS,
                    });
                }
                previous = Some((position, time));
            }

            let start_pos = result.start_position(driver_count);
            OvertakeRecord {
                driver_id: driver_id.to_string(),
                start_pos,
                finish_pos: result.finish_position,
                overtakes,
                total_positions_gained: start_pos.saturating_sub(result.finish_position),
            }
        })
        .collect()
}
