//! Core types and foundational components
//!
//! This module contains the value types shared by every analysis, error
//! handling, and the threshold constants.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{LapstatError, Result};
pub use types::{LapRecord, LapRecordError, PaceTier, QualifyingResult, RaceResult};
