//! Result printing for lapstat

use serde::Serialize;

use crate::analysis::{Chart, PlotResult};
use crate::core::error::Result;

/// Process exit status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    InsufficientData,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::InsufficientData => 2,
        }
    }

    /// Status for a plot outcome
    pub fn for_plot(result: &PlotResult) -> Self {
        match result {
            PlotResult::Rendered(_) => ExitStatus::Success,
            PlotResult::InsufficientData { .. } => ExitStatus::InsufficientData,
        }
    }
}

/// Serialize a result as JSON, compact or pretty
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Print a result as JSON on stdout
pub fn print_result<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", to_json(value, pretty)?);
    Ok(())
}

/// The chart grid followed by its x-axis label row
pub fn format_grid(chart: &Chart) -> String {
    let mut out = chart.rows.join("\n");
    out.push('\n');
    out.push_str(chart.x_label_row.trim_end());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::plot;
    use crate::core::types::LapRecord;

    fn laps(times: &[f64]) -> Vec<LapRecord> {
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| LapRecord::new("VER", i as u32 + 1, t).unwrap())
            .collect()
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
        assert_eq!(ExitStatus::InsufficientData.code(), 2);
    }

    #[test]
    fn test_exit_status_for_plot() {
        assert_eq!(
            ExitStatus::for_plot(&plot(&laps(&[90.0, 91.0]))),
            ExitStatus::InsufficientData
        );
        assert_eq!(
            ExitStatus::for_plot(&plot(&laps(&[90.0, 91.0, 90.5]))),
            ExitStatus::Success
        );
    }

    #[test]
    fn test_to_json_compact_and_pretty() -> Result<()> {
        let value = PlotResult::InsufficientData {
            available: 1,
            required: 3,
        };
        assert_eq!(
            to_json(&value, false)?,
            r#"{"status":"insufficient_data","available":1,"required":3}"#
        );
        assert!(to_json(&value, true)?.contains("\n  \"available\": 1"));
        Ok(())
    }

    #[test]
    fn test_format_grid() {
        let PlotResult::Rendered(chart) = plot(&laps(&[90.0, 91.0, 90.5])) else {
            panic!("expected a chart");
        };
        let text = format_grid(&chart);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 21);
        assert!(lines[19].starts_with("      +"));
        assert!(lines[20].trim_start().starts_with('1'));
    }
}
