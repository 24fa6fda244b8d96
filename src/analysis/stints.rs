//! Stint segmentation
//!
//! Splits one driver's chronological laps into pit-stop-bounded pace phases.
//! A new stint starts when lap numbers jump by more than three (missing laps,
//! usually an in/out lap pair) or when consecutive lap times differ by more
//! than 3.5 s. Fragments shorter than three laps are discarded, never merged
//! into the next stint.

use log::trace;
use serde::Serialize;

use super::stats;
use crate::core::constants::stints::{
    MAX_LAP_NUMBER_GAP, MAX_LAP_TIME_JUMP_SECONDS, MIN_STINT_LAPS,
};

/// A contiguous run of laps between inferred pit stops. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stint {
    /// 1-indexed among the stints actually emitted
    pub number: usize,
    pub start_lap: u32,
    pub end_lap: u32,
    pub lap_count: usize,
    pub avg_time: f64,
    pub median_time: f64,
    pub best_lap: f64,
    pub worst_lap: f64,
    /// `worst_lap - best_lap`
    pub range: f64,
    /// Second-half mean minus first-half mean; negative means improving
    pub trend: f64,
    /// Population standard deviation of the stint's laps
    pub consistency: f64,
}

impl Stint {
    /// Summarise a run of `(lap_number, seconds)` pairs; `None` below the minimum length.
    fn from_laps(number: usize, laps: &[(u32, f64)]) -> Option<Self> {
        if laps.len() < MIN_STINT_LAPS {
            return None;
        }
        let times: Vec<f64> = laps.iter().map(|&(_, t)| t).collect();
        let best_lap = stats::min(&times)?;
        let worst_lap = stats::max(&times)?;

        Some(Self {
            number,
            start_lap: laps.first()?.0,
            end_lap: laps.last()?.0,
            lap_count: laps.len(),
            avg_time: stats::mean(&times)?,
            median_time: stats::median(&times)?,
            best_lap,
            worst_lap,
            range: worst_lap - best_lap,
            trend: stats::trend(&times)?,
            consistency: stats::std_dev(&times)?,
        })
    }

    /// Average time lost per lap across the stint
    pub fn degradation(&self) -> f64 {
        (self.worst_lap - self.best_lap) / self.lap_count as f64
    }
}

fn is_boundary(previous: (u32, f64), current: (u32, f64)) -> bool {
    let lap_gap = current.0.saturating_sub(previous.0);
    lap_gap > MAX_LAP_NUMBER_GAP || (current.1 - previous.1).abs() > MAX_LAP_TIME_JUMP_SECONDS
}

/// Segment chronologically ordered `(lap_number, seconds)` pairs into stints.
///
/// # Examples
/// ```
/// use lapstat::analysis::stints::segment;
///
/// let laps = [(1, 90.0), (2, 90.1), (3, 90.0), (7, 91.0), (8, 90.9), (9, 91.1)];
/// let stints = segment(&laps);
/// assert_eq!(stints.len(), 2);
/// assert_eq!(stints[1].start_lap, 7);
/// ```
pub fn segment(laps: &[(u32, f64)]) -> Vec<Stint> {
    let mut stints = Vec::new();
    let mut start = 0;

    for i in 1..=laps.len() {
        let at_end = i == laps.len();
        if !at_end && !is_boundary(laps[i - 1], laps[i]) {
            continue;
        }

        let run = &laps[start..i];
        match Stint::from_laps(stints.len() + 1, run) {
            Some(stint) => stints.push(stint),
            None => trace!(
                "discarding {}-lap fragment starting at lap {}",
                run.len(),
                run[0].0
            ),
        }
        start = i;
    }

    stints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_single_stint_summary() {
        let laps = [(1, 90.0), (2, 90.2), (3, 89.8), (4, 90.1)];
        let stints = segment(&laps);

        assert_eq!(stints.len(), 1);
        let stint = &stints[0];
        assert_eq!(stint.number, 1);
        assert_eq!(stint.lap_count, 4);
        assert_eq!((stint.start_lap, stint.end_lap), (1, 4));
        assert_close(stint.best_lap, 89.8);
        assert_close(stint.worst_lap, 90.2);
        assert_close(stint.range, 0.4);
        assert_close(stint.avg_time, 90.025);
        assert_close(stint.median_time, 90.05);
        assert!(stint.consistency > 0.0);
    }

    #[test]
    fn test_lap_number_gap_starts_new_stint() {
        let laps = [(1, 90.0), (2, 90.1), (3, 90.0), (7, 91.0), (8, 90.9), (9, 91.1)];
        let stints = segment(&laps);

        assert_eq!(stints.len(), 2);
        assert_eq!(stints[0].lap_count, 3);
        assert_eq!(stints[1].lap_count, 3);
        assert_eq!(stints[1].start_lap, 7);
        assert_eq!(stints[1].number, 2);
    }

    #[test]
    fn test_gap_of_exactly_three_does_not_split() {
        let laps = [(1, 90.0), (2, 90.1), (5, 90.0), (6, 90.2)];
        assert_eq!(segment(&laps).len(), 1);
    }

    #[test]
    fn test_time_jump_isolates_pit_lap() {
        // Lap 4 is an in-lap: jumps in and out of the window are both boundaries
        let laps = [
            (1, 90.0),
            (2, 90.1),
            (3, 90.2),
            (4, 110.0),
            (5, 91.0),
            (6, 90.9),
            (7, 90.8),
        ];
        let stints = segment(&laps);

        assert_eq!(stints.len(), 2);
        assert_eq!((stints[0].start_lap, stints[0].end_lap), (1, 3));
        assert_eq!((stints[1].start_lap, stints[1].end_lap), (5, 7));
        let covered: usize = stints.iter().map(|s| s.lap_count).sum();
        assert_eq!(covered, 6);
    }

    #[test]
    fn test_short_fragments_are_discarded_not_carried() {
        let laps = [(1, 90.0), (2, 90.1), (10, 90.0), (11, 90.1), (12, 90.2)];
        let stints = segment(&laps);

        assert_eq!(stints.len(), 1);
        assert_eq!(stints[0].start_lap, 10);
        assert_eq!(stints[0].number, 1);
    }

    #[test]
    fn test_two_laps_produce_no_stint() {
        assert!(segment(&[(1, 90.0), (2, 90.1)]).is_empty());
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_identical_laps_have_zero_consistency() {
        let stints = segment(&[(1, 90.0), (2, 90.0), (3, 90.0)]);
        assert_eq!(stints[0].consistency, 0.0);
        assert_eq!(stints[0].degradation(), 0.0);

        let laps: Vec<(u32, f64)> = (1..=7).map(|lap| (lap, 90.123)).collect();
        assert_eq!(segment(&laps)[0].consistency, 0.0);
    }

    #[test]
    fn test_trend_reflects_degradation() {
        let stints = segment(&[(1, 90.0), (2, 90.3), (3, 90.6), (4, 90.9)]);
        assert_close(stints[0].trend, 0.6);
        assert_close(stints[0].degradation(), 0.9 / 4.0);
    }
}
