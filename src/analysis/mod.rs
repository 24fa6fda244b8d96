//! Race analytics
//!
//! Five independent entry points, each a pure function of caller-owned
//! records: [`pace`], [`gap`], [`sector`], [`overtake`] and [`plot`]. None of
//! them calls another, holds state between calls, or performs I/O.

pub mod chart;
pub mod gaps;
pub mod overtakes;
pub mod pace;
pub mod sectors;
pub mod stats;
pub mod stints;

pub use chart::{Chart, ChartPoint, PlotResult, PlottedPoint, plot};
pub use gaps::{ClosestRival, GapProfile, gap};
pub use overtakes::{Overtake, OvertakeRecord, overtake};
pub use pace::{ConsistencyRating, DriverPaceProfile, TireManagementRating, pace};
pub use sectors::{SectorProfile, SectorReport, SectorTimes, sector};
pub use stints::Stint;

use log::trace;
use rustc_hash::FxHashMap;

use crate::core::types::LapRecord;

/// Chronological `(lap_number, seconds)` pairs for one driver
pub(crate) type LapSeries = Vec<(u32, f64)>;

/// Group plausible laps by driver, ordered by lap number.
///
/// Laps above `ceiling` are dropped. When a driver has two records for the
/// same lap the first one supplied wins.
pub(crate) fn laps_by_driver(laps: &[LapRecord], ceiling: f64) -> FxHashMap<&str, LapSeries> {
    let mut grouped: FxHashMap<&str, LapSeries> = FxHashMap::default();
    let mut dropped = 0usize;

    for lap in laps {
        if !lap.is_within(ceiling) {
            dropped += 1;
            continue;
        }
        grouped
            .entry(lap.driver_id.as_str())
            .or_default()
            .push((lap.lap_number, lap.lap_time_seconds));
    }

    for series in grouped.values_mut() {
        series.sort_by_key(|&(lap, _)| lap);
        series.dedup_by_key(|&mut (lap, _)| lap);
    }

    if dropped > 0 {
        trace!("dropped {dropped} lap(s) above {ceiling}s");
    }
    grouped
}

/// Highest lap number among the grouped laps
pub(crate) fn race_length(grouped: &FxHashMap<&str, LapSeries>) -> u32 {
    grouped
        .values()
        .filter_map(|series| series.last().map(|&(lap, _)| lap))
        .max()
        .unwrap_or(0)
}

pub(crate) fn times(series: &[(u32, f64)]) -> Vec<f64> {
    series.iter().map(|&(_, t)| t).collect()
}
