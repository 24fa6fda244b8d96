//! ASCII lap-time progression chart for one driver.
//!
//! The chart is a fixed 60x20 character grid: a 7-column y-axis gutter with
//! five time ticks, 19 plot rows, and an x-axis line on the last row. Point
//! markers show how close each lap is to the driver's fastest.

use log::debug;
use serde::Serialize;

use crate::core::constants::{chart as geometry, lap_limits};
use crate::core::types::{LapRecord, PaceTier, cmp_seconds};

/// A lap on the chart's input sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub lap: u32,
    pub time: f64,
}

/// A point as placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlottedPoint {
    pub lap: u32,
    pub time: f64,
    /// Column on the grid
    pub x: usize,
    /// Row on the grid, 0 at the top
    pub y: usize,
    pub tier: PaceTier,
}

/// A rendered chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub width: usize,
    pub height: usize,
    /// `height` rows of exactly `width` characters
    pub rows: Vec<String>,
    /// Lap numbers under the first, middle and last points
    pub x_label_row: String,
    /// Tick values from the bottom of the axis to the top
    pub y_ticks: Vec<f64>,
    /// First, middle and last lap numbers
    pub x_ticks: Vec<u32>,
    pub y_min: f64,
    pub y_max: f64,
    pub fastest: ChartPoint,
    pub points: Vec<PlottedPoint>,
}

/// Outcome of [`plot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlotResult {
    Rendered(Chart),
    InsufficientData { available: usize, required: usize },
}

/// Lap-ordered points with `0 < time < 300`, produced lazily.
///
/// Implausible times are removed first; duplicate lap numbers then keep the
/// first remaining record supplied.
pub fn chart_points(laps: &[LapRecord]) -> impl Iterator<Item = ChartPoint> + '_ {
    let mut ordered: Vec<&LapRecord> = laps
        .iter()
        .filter(|lap| {
            lap.lap_time_seconds > 0.0
                && lap.lap_time_seconds < lap_limits::STAT_LAP_CEILING_SECONDS
        })
        .collect();
    ordered.sort_by_key(|lap| lap.lap_number);
    ordered.dedup_by_key(|lap| lap.lap_number);

    ordered.into_iter().map(|lap| ChartPoint {
        lap: lap.lap_number,
        time: lap.lap_time_seconds,
    })
}

/// Chart one driver's lap-time progression.
///
/// Needs at least three valid laps; otherwise returns
/// [`PlotResult::InsufficientData`] rather than a misleading chart.
pub fn plot(laps: &[LapRecord]) -> PlotResult {
    let points: Vec<ChartPoint> = chart_points(laps).collect();
    if points.len() < geometry::MIN_POINTS {
        debug!("plot: only {} valid lap(s)", points.len());
        return PlotResult::InsufficientData {
            available: points.len(),
            required: geometry::MIN_POINTS,
        };
    }
    match render(&points) {
        Some(chart) => PlotResult::Rendered(chart),
        None => PlotResult::InsufficientData {
            available: points.len(),
            required: geometry::MIN_POINTS,
        },
    }
}

fn render(points: &[ChartPoint]) -> Option<Chart> {
    let (width, height) = (geometry::WIDTH, geometry::HEIGHT);
    let plot_rows = height - 2;
    let last = points.len() - 1;

    let fastest = *points.iter().min_by(|a, b| cmp_seconds(&a.time, &b.time))?;
    let slowest = points.iter().map(|p| p.time).max_by(cmp_seconds)?;
    let range = slowest - fastest.time;
    let padding = if range > 0.0 {
        range * geometry::RANGE_PADDING
    } else {
        geometry::FLAT_RANGE_PADDING_SECONDS
    };
    let (y_min, y_max) = (fastest.time - padding, slowest + padding);
    let span = y_max - y_min;

    let mut grid = vec![vec![' '; width]; height];
    let mut tiers: Vec<Vec<Option<PaceTier>>> = vec![vec![None; width]; height];

    // Axes
    for row in grid.iter_mut().take(height - 1) {
        row[geometry::PLOT_LEFT - 1] = geometry::Y_AXIS;
    }
    let axis_row = &mut grid[height - 1];
    axis_row[geometry::PLOT_LEFT - 1] = geometry::ORIGIN;
    for cell in axis_row.iter_mut().skip(geometry::PLOT_LEFT) {
        *cell = geometry::X_AXIS;
    }

    // Y ticks, bottom to top
    let steps = (geometry::Y_TICKS - 1) as f64;
    let y_ticks: Vec<f64> = (0..geometry::Y_TICKS)
        .map(|k| y_min + span * k as f64 / steps)
        .collect();
    for (k, value) in y_ticks.iter().enumerate() {
        let row = ((1.0 - k as f64 / steps) * plot_rows as f64).floor() as usize;
        let label = format!("{value:>6.1}");
        for (col, ch) in label.chars().take(geometry::PLOT_LEFT - 1).enumerate() {
            grid[row][col] = ch;
        }
    }

    // Points
    let plotted: Vec<PlottedPoint> = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = geometry::PLOT_LEFT + (width - 8) * i / last;
            let normalized = (point.time - y_min) / span;
            let y = (((1.0 - normalized) * plot_rows as f64).floor().max(0.0) as usize)
                .min(plot_rows);
            let tier = PaceTier::classify(point.time, fastest.time);
            PlottedPoint {
                lap: point.lap,
                time: point.time,
                x,
                y,
                tier,
            }
        })
        .collect();

    for point in &plotted {
        let slot = &mut tiers[point.y][point.x];
        if slot.is_none_or(|existing| point.tier < existing) {
            *slot = Some(point.tier);
            grid[point.y][point.x] = point.tier.marker();
        }
    }

    // X labels: first, middle, last
    let x_ticks = vec![points[0].lap, points[last / 2].lap, points[last].lap];
    let mut label_row = vec![' '; width];
    for index in [0, last / 2, last] {
        let text = points[index].lap.to_string();
        let start = plotted[index].x.min(width.saturating_sub(text.len()));
        for (offset, ch) in text.chars().enumerate() {
            label_row[start + offset] = ch;
        }
    }

    Some(Chart {
        width,
        height,
        rows: grid.into_iter().map(|row| row.into_iter().collect()).collect(),
        x_label_row: label_row.into_iter().collect(),
        y_ticks,
        x_ticks,
        y_min,
        y_max,
        fastest,
        points: plotted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{lap, laps};

    fn rendered(result: PlotResult) -> Chart {
        match result {
            PlotResult::Rendered(chart) => chart,
            other => panic!("expected a chart, got {other:?}"),
        }
    }

    #[test]
    fn test_plot_two_laps_is_insufficient() {
        let result = plot(&laps("VER", &[90.0, 90.5]));
        assert_eq!(
            result,
            PlotResult::InsufficientData {
                available: 2,
                required: 3
            }
        );
    }

    #[test]
    fn test_plot_filters_implausible_laps_before_counting() {
        let mut records = laps("VER", &[90.0, 90.5]);
        records.push(lap("VER", 3, 300.0));
        assert!(matches!(
            plot(&records),
            PlotResult::InsufficientData { available: 2, .. }
        ));
    }

    #[test]
    fn test_chart_points_are_lap_ordered() {
        let records = vec![lap("VER", 3, 91.0), lap("VER", 1, 90.0), lap("VER", 2, 90.5)];
        let laps: Vec<u32> = chart_points(&records).map(|p| p.lap).collect();
        assert_eq!(laps, vec![1, 2, 3]);
    }

    #[test]
    fn test_chart_points_implausible_duplicate_does_not_hide_valid_lap() {
        let records = vec![lap("VER", 1, 350.0), lap("VER", 1, 90.0), lap("VER", 1, 91.0)];
        let points: Vec<ChartPoint> = chart_points(&records).collect();
        assert_eq!(points, vec![ChartPoint { lap: 1, time: 90.0 }]);

        let mut records = records;
        records.extend([lap("VER", 2, 90.5), lap("VER", 3, 91.0)]);
        assert!(matches!(plot(&records), PlotResult::Rendered(_)));
    }

    #[test]
    fn test_grid_dimensions() {
        let chart = rendered(plot(&laps("VER", &[90.0, 91.0, 92.0, 90.5])));

        assert_eq!(chart.rows.len(), 20);
        assert!(chart.rows.iter().all(|row| row.chars().count() == 60));
        assert_eq!(chart.x_label_row.chars().count(), 60);
        assert_eq!(chart.y_ticks.len(), 5);
    }

    #[test]
    fn test_point_placement() {
        let chart = rendered(plot(&laps("VER", &[90.0, 90.7, 92.0])));

        let xs: Vec<usize> = chart.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![7, 33, 59]);

        // Range 2.0 padded by 0.2 either side: fastest sits near the bottom
        let ys: Vec<usize> = chart.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![16, 11, 1]);
        assert!((chart.y_min - 89.8).abs() < 1e-9);
        assert!((chart.y_max - 92.2).abs() < 1e-9);
    }

    #[test]
    fn test_markers_follow_tiers() {
        let chart = rendered(plot(&laps("VER", &[90.0, 90.5, 91.5, 95.0])));

        let tiers: Vec<PaceTier> = chart.points.iter().map(|p| p.tier).collect();
        assert_eq!(
            tiers,
            vec![
                PaceTier::Fastest,
                PaceTier::WithinOnePercent,
                PaceTier::WithinTwoPercent,
                PaceTier::Slower,
            ]
        );
        for point in &chart.points {
            let row: Vec<char> = chart.rows[point.y].chars().collect();
            assert_eq!(row[point.x], point.tier.marker());
        }
        assert_eq!(chart.fastest.lap, 1);
    }

    #[test]
    fn test_axes_and_labels() {
        let chart = rendered(plot(&laps("VER", &[90.0, 91.0, 92.0, 93.0, 94.0])));

        assert!(chart.rows[19].starts_with("      +-"));
        assert!(chart.rows[0].starts_with("  94.4|"));
        assert!(chart.rows[18].starts_with("  89.6|"));
        assert_eq!(chart.x_ticks, vec![1, 3, 5]);
        assert!(chart.x_label_row.starts_with("       1"));
        assert!(chart.x_label_row.ends_with('5'));
    }

    #[test]
    fn test_flat_times_still_render() {
        let chart = rendered(plot(&laps("VER", &[90.0, 90.0, 90.0])));
        assert!(chart.y_min < 90.0 && chart.y_max > 90.0);
        assert!(chart.points.iter().all(|p| p.tier == PaceTier::Fastest));
    }
}
