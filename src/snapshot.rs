//! Completed-session snapshots read from disk.
//!
//! A snapshot is the JSON form of what a data source hands the engine: race
//! classification, raw lap timings and qualifying times. Raw lap strings are
//! run through the time codec here; unusable records are counted and dropped.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{LapstatError, Result};
use crate::core::types::{LapRecord, QualifyingResult, RaceResult};
use crate::timing::lap_record_from_raw;

/// One lap as supplied by the data source, time still a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLap {
    pub driver_id: String,
    pub lap: u32,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub results: Vec<RaceResult>,
    #[serde(default)]
    pub laps: Vec<RawLap>,
    #[serde(default)]
    pub qualifying: Vec<QualifyingResult>,
}

impl SessionSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LapstatError::InvalidArgument(format!(
                "Could not read snapshot '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parsed lap records plus the number of raw laps that were dropped.
    pub fn lap_records(&self) -> (Vec<LapRecord>, usize) {
        let records: Vec<LapRecord> = self
            .laps
            .iter()
            .filter_map(|raw| lap_record_from_raw(&raw.driver_id, raw.lap, &raw.time))
            .collect();
        let dropped = self.laps.len() - records.len();
        (records, dropped)
    }
}

/// Lap records for a single driver, taken from already parsed records
pub fn driver_laps(records: &[LapRecord], driver_id: &str) -> Result<Vec<LapRecord>> {
    let laps: Vec<LapRecord> = records
        .iter()
        .filter(|lap| lap.driver_id == driver_id)
        .cloned()
        .collect();
    if laps.is_empty() {
        return Err(LapstatError::DriverNotFound(driver_id.to_string()));
    }
    Ok(laps)
}
