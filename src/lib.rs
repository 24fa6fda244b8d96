//! lapstat - race lap analytics
//!
//! Turns completed-session race data (classification, per-lap timings and
//! qualifying times) into pace profiles, gap profiles, estimated sectors,
//! reconstructed overtakes and a lap-time progression chart.

// Core modules
pub mod core;

// Feature modules
pub mod analysis;
pub mod config;
pub mod logging;
pub mod snapshot;
pub mod timing;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::analysis::{
    DriverPaceProfile, GapProfile, OvertakeRecord, PlotResult, SectorReport, gap, overtake, pace,
    plot, sector,
};
pub use crate::config::Config;
pub use crate::core::{LapRecord, LapstatError, PaceTier, QualifyingResult, RaceResult, Result};
pub use crate::snapshot::SessionSnapshot;
