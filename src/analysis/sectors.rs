//! Qualifying sector estimation.
//!
//! The inputs carry no real sector timing, so each driver's best qualifying
//! lap is split by a fixed proportion table. Swap [`SECTOR_SPLITS`] for
//! measured splits if they ever become available.

use log::debug;
use serde::Serialize;

use crate::core::constants::lap_limits;
use crate::core::types::{PaceTier, QualifyingResult, cmp_seconds};
use crate::timing::{format_time, parse_lap_time};

/// Fraction of a lap attributed to each sector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSplits {
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

pub const SECTOR_SPLITS: SectorSplits = SectorSplits {
    s1: 0.31,
    s2: 0.36,
    s3: 0.33,
};

/// Three sector times in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectorTimes {
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl SectorTimes {
    /// Split a lap time using `splits`.
    pub fn estimate(lap_seconds: f64, splits: &SectorSplits) -> Self {
        Self {
            s1: lap_seconds * splits.s1,
            s2: lap_seconds * splits.s2,
            s3: lap_seconds * splits.s3,
        }
    }

    pub fn total(&self) -> f64 {
        self.s1 + self.s2 + self.s3
    }

    fn fastest_of(all: &[SectorTimes]) -> Option<Self> {
        let pick = |f: fn(&SectorTimes) -> f64| all.iter().map(f).min_by(cmp_seconds);
        Some(Self {
            s1: pick(|t| t.s1)?,
            s2: pick(|t| t.s2)?,
            s3: pick(|t| t.s3)?,
        })
    }
}

/// Which qualifying session produced the lap used for estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualifyingSession {
    Q1,
    Q2,
    Q3,
}

/// Estimated sectors for one driver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorProfile {
    pub driver_id: String,
    pub sectors: SectorTimes,
    /// Best lap formatted as `M:SS.sss`
    pub best_lap: String,
    pub best_lap_seconds: f64,
    pub best_session: QualifyingSession,
    /// Percentage gained from Q1 to the best lap; 0 without a Q1 time
    pub improvement: f64,
    /// Tier of each sector against the session-best sectors
    pub tiers: [PaceTier; 3],
}

impl SectorProfile {
    /// Sum of this driver's estimated sectors
    pub fn estimated_lap(&self) -> f64 {
        self.sectors.total()
    }
}

/// Sector estimates for a whole qualifying session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorReport {
    /// Fastest best lap first
    pub profiles: Vec<SectorProfile>,
    /// Fastest estimated time in each sector across the field
    pub session_best: Option<SectorTimes>,
    /// Sum of the session-best sectors, regardless of who set them
    pub theoretical_best_lap: Option<f64>,
}

fn parse_session(raw: Option<&String>) -> Option<f64> {
    raw.and_then(|raw| parse_lap_time(raw, lap_limits::STAT_LAP_CEILING_SECONDS).ok())
}

/// The latest session with a valid time: Q3, then Q2, then Q1.
fn best_qualifying_lap(result: &QualifyingResult) -> Option<(QualifyingSession, f64)> {
    [
        (QualifyingSession::Q3, &result.q3),
        (QualifyingSession::Q2, &result.q2),
        (QualifyingSession::Q1, &result.q1),
    ]
    .into_iter()
    .find_map(|(session, raw)| parse_session(raw.as_ref()).map(|t| (session, t)))
}

/// Estimate sectors and the theoretical best lap for a qualifying session.
///
/// Drivers without any valid qualifying time are left out.
pub fn sector(qualifying_results: &[QualifyingResult]) -> SectorReport {
    let mut estimates: Vec<(&QualifyingResult, QualifyingSession, f64, SectorTimes)> =
        qualifying_results
            .iter()
            .filter_map(|result| {
                let Some((session, best)) = best_qualifying_lap(result) else {
                    debug!("sector: no valid qualifying time for {}", result.driver_id);
                    return None;
                };
                Some((
                    result,
                    session,
                    best,
                    SectorTimes::estimate(best, &SECTOR_SPLITS),
                ))
            })
            .collect();
    estimates.sort_by(|a, b| cmp_seconds(&a.2, &b.2));

    let all: Vec<SectorTimes> = estimates.iter().map(|e| e.3).collect();
    let session_best = SectorTimes::fastest_of(&all);

    let profiles = estimates
        .into_iter()
        .map(|(result, session, best, sectors)| {
            let improvement = match parse_session(result.q1.as_ref()) {
                Some(q1) => (q1 - best) / q1 * 100.0,
                None => 0.0,
            };
            let tiers = match session_best {
                Some(fastest) => [
                    PaceTier::classify(sectors.s1, fastest.s1),
                    PaceTier::classify(sectors.s2, fastest.s2),
                    PaceTier::classify(sectors.s3, fastest.s3),
                ],
                None => [PaceTier::Fastest; 3],
            };
            SectorProfile {
                driver_id: result.driver_id.clone(),
                sectors,
                best_lap: format_time(best),
                best_lap_seconds: best,
                best_session: session,
                improvement,
                tiers,
            }
        })
        .collect();

    SectorReport {
        profiles,
        theoretical_best_lap: session_best.map(|t| t.total()),
        session_best,
    }
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

    fn quali(
        driver: &str,
        q1: Option<&str>,
        q2: Option<&str>,
        q3: Option<&str>,
    ) -> QualifyingResult {
        QualifyingResult {
            driver_id: driver.to_string(),
            q1: q1.map(str::to_string),
            q2: q2.map(str::to_string),
            q3: q3.map(str::to_string),
        }
    }

    #[test]
    fn test_sector_splits_sum_to_one() {
        assert_close(SECTOR_SPLITS.s1 + SECTOR_SPLITS.s2 + SECTOR_SPLITS.s3, 1.0);
    }

    #[test]
    fn test_sector_estimate_proportions() {
        let times = SectorTimes::estimate(100.0, &SECTOR_SPLITS);
        assert_close(times.s1, 31.0);
        assert_close(times.s2, 36.0);
        assert_close(times.s3, 33.0);
        assert_close(times.total(), 100.0);
    }

    #[test]
    fn test_best_lap_prefers_latest_session() {
        let report = sector(&[
            quali("A", Some("1:31.000"), Some("1:30.500"), Some("1:30.000")),
            quali("B", Some("1:31.200"), Some("1:30.800"), None),
            quali("C", Some("1:32.000"), None, None),
        ]);

        let sessions: Vec<(&str, QualifyingSession)> = report
            .profiles
            .iter()
            .map(|p| (p.driver_id.as_str(), p.best_session))
            .collect();
        assert_eq!(
            sessions,
            vec![
                ("A", QualifyingSession::Q3),
                ("B", QualifyingSession::Q2),
                ("C", QualifyingSession::Q1),
            ]
        );
        assert_eq!(report.profiles[0].best_lap, "1:30.000");
    }

    #[test]
    fn test_improvement_percentage() {
        let report = sector(&[
            quali("A", Some("1:40.000"), None, Some("1:30.000")),
            quali("B", None, Some("1:35.000"), None),
            quali("C", Some("1:36.000"), None, None),
        ]);

        let by_id = |id: &str| report.profiles.iter().find(|p| p.driver_id == id).unwrap();
        assert_close(by_id("A").improvement, 10.0);
        assert_eq!(by_id("B").improvement, 0.0);
        assert_eq!(by_id("C").improvement, 0.0);
    }

    #[test]
    fn test_theoretical_best_never_exceeds_any_driver() {
        let report = sector(&[
            quali("A", Some("1:30.100"), None, None),
            quali("B", Some("1:30.900"), None, None),
            quali("C", Some("1:29.700"), None, None),
        ]);

        let theoretical = report.theoretical_best_lap.unwrap();
        for profile in &report.profiles {
            assert!(theoretical <= profile.estimated_lap());
        }
        assert_eq!(report.profiles[0].driver_id, "C");
    }

    #[test]
    fn test_sector_tiers() {
        let report = sector(&[
            quali("A", Some("1:30.000"), None, None),
            quali("B", Some("1:30.500"), None, None),
            quali("C", Some("1:31.500"), None, None),
            quali("D", Some("1:35.000"), None, None),
        ]);

        let tiers: Vec<PaceTier> = report.profiles.iter().map(|p| p.tiers[0]).collect();
        assert_eq!(
            tiers,
            vec![
                PaceTier::Fastest,
                PaceTier::WithinOnePercent,
                PaceTier::WithinTwoPercent,
                PaceTier::Slower,
            ]
        );
    }

    #[test]
    fn test_invalid_times_fall_through_or_drop_driver() {
        let report = sector(&[
            quali("A", Some("1:31.000"), Some("1:30.500"), Some("DNF")),
            quali("B", Some(""), Some("abc"), None),
        ]);

        assert_eq!(report.profiles.len(), 1);
        assert_eq!(report.profiles[0].best_session, QualifyingSession::Q2);
    }

    #[test]
    fn test_empty_session() {
        let report = sector(&[]);
        assert!(report.profiles.is_empty());
        assert!(report.session_best.is_none());
        assert!(report.theoretical_best_lap.is_none());
    }
}
