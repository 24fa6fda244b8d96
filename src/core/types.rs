use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::core::constants::{chart, tiers};

/// A single timed lap for one driver.
///
/// Records are produced from raw timing strings and are never mutated after
/// construction; a record that fails validation is dropped instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Driver identifier (e.g. `"max_verstappen"` or `"VER"`)
    pub driver_id: String,
    /// Lap number within the race (1-indexed)
    pub lap_number: u32,
    /// Lap time in seconds
    pub lap_time_seconds: f64,
}

/// Errors that can occur when building a `LapRecord`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LapRecordError {
    /// Driver identifier is missing or empty
    MissingDriver,
    /// Lap number is zero
    InvalidLapNumber,
    /// Lap time is zero, negative, NaN or infinite
    InvalidLapTime,
}

impl fmt::Display for LapRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDriver => write!(f, "Driver id is required and cannot be empty"),
            Self::InvalidLapNumber => write!(f, "Lap number must be greater than 0"),
            Self::InvalidLapTime => write!(f, "Lap time must be a finite positive number"),
        }
    }
}

impl std::error::Error for LapRecordError {}

impl LapRecord {
    /// Create a new LapRecord with validation.
    ///
    /// # Examples
    /// ```
    /// use lapstat::LapRecord;
    ///
    /// let lap = LapRecord::new("VER", 12, 91.447).unwrap();
    /// assert_eq!(lap.lap_number, 12);
    /// assert!(LapRecord::new("VER", 0, 91.447).is_err());
    /// ```
    pub fn new(
        driver_id: impl Into<String>,
        lap_number: u32,
        lap_time_seconds: f64,
    ) -> Result<Self, LapRecordError> {
        let driver_id = driver_id.into();
        if driver_id.trim().is_empty() {
            return Err(LapRecordError::MissingDriver);
        }
        if lap_number == 0 {
            return Err(LapRecordError::InvalidLapNumber);
        }
        if !lap_time_seconds.is_finite() || lap_time_seconds <= 0.0 {
            return Err(LapRecordError::InvalidLapTime);
        }

        Ok(Self {
            driver_id: driver_id.trim().to_string(),
            lap_number,
            lap_time_seconds,
        })
    }

    /// Whether the lap time lies within `(0, ceiling]`.
    pub fn is_within(&self, ceiling: f64) -> bool {
        self.lap_time_seconds > 0.0 && self.lap_time_seconds <= ceiling
    }
}

/// Classification result for one driver in one race. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub driver_id: String,
    /// Starting grid slot; `0` means a pit-lane start
    pub grid_position: u32,
    pub finish_position: u32,
    #[serde(default)]
    pub constructor_name: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub is_fastest_lap: bool,
}

impl RaceResult {
    /// Effective starting position; a pit-lane start counts as behind the whole field.
    pub fn start_position(&self, driver_count: usize) -> u32 {
        if self.grid_position == 0 {
            driver_count as u32 + 1
        } else {
            self.grid_position
        }
    }
}

/// Sort results by finishing position, leaving the caller's slice untouched.
pub(crate) fn by_finish_position(results: &[RaceResult]) -> Vec<&RaceResult> {
    let mut ordered: Vec<&RaceResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.finish_position);
    ordered
}

/// Raw qualifying times for one driver, as supplied by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingResult {
    pub driver_id: String,
    #[serde(default)]
    pub q1: Option<String>,
    #[serde(default)]
    pub q2: Option<String>,
    #[serde(default)]
    pub q3: Option<String>,
}

/// Proximity of a time to the session best.
///
/// Used both for sector colouring and for chart markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceTier {
    /// Matches the session best
    Fastest,
    /// Within 1% of the session best
    WithinOnePercent,
    /// Within 2% of the session best
    WithinTwoPercent,
    /// More than 2% off the session best
    Slower,
}

impl PaceTier {
    /// Classify `time` against `best`.
    pub fn classify(time: f64, best: f64) -> Self {
        if time <= best {
            return Self::Fastest;
        }
        let off = (time - best) / best;
        if off <= tiers::CLOSE_FRACTION {
            Self::WithinOnePercent
        } else if off <= tiers::NEAR_FRACTION {
            Self::WithinTwoPercent
        } else {
            Self::Slower
        }
    }

    /// Chart marker character for this tier
    pub fn marker(self) -> char {
        match self {
            Self::Fastest => chart::FASTEST_MARKER,
            Self::WithinOnePercent => chart::CLOSE_MARKER,
            Self::WithinTwoPercent => chart::NEAR_MARKER,
            Self::Slower => chart::SLOWER_MARKER,
        }
    }
}

/// Total order over lap times; NaN never reaches here because records are validated.
pub(crate) fn cmp_seconds(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}
