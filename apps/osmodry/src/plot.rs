//! # Chart Rendering
//!
//! Draws the weight and moisture trajectories as SVG line charts.

use osmodry_core::{Bounds, ProcessError, Trajectory};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// File name of the weight chart.
pub const WEIGHT_CHART: &str = "weight_vs_time.svg";

/// File name of the moisture chart.
pub const MOISTURE_CHART: &str = "moisture_vs_time.svg";

const CHART_SIZE: (u32, u32) = (640, 480);
const AXIS_PADDING: f64 = 0.05;
/// Widest axis span the tick search can handle without overflowing.
const MAX_AXIS_SPAN: f64 = 1e300;

struct ChartSpec<'a> {
    title: &'a str,
    y_label: &'a str,
    color: RGBColor,
}

fn render_error<E: std::fmt::Display>(e: E) -> ProcessError {
    ProcessError::RenderError(e.to_string())
}

fn check_axis(name: &str, bounds: Bounds) -> Result<(), ProcessError> {
    let span = bounds.span();
    if span.is_finite() && span <= MAX_AXIS_SPAN {
        Ok(())
    } else {
        Err(ProcessError::RenderError(format!(
            "{} axis range [{}, {}] is too wide to draw",
            name, bounds.min, bounds.max
        )))
    }
}

fn render_chart(
    spec: &ChartSpec<'_>,
    points: &[(f64, f64)],
    x: Bounds,
    y: Bounds,
    path: &Path,
) -> Result<(), ProcessError> {
    let x = x.padded(AXIS_PADDING);
    let y = y.padded(AXIS_PADDING);
    check_axis("time", x)?;
    check_axis(spec.y_label, y)?;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(x.min..x.max, y.min..y.max)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("Time (hours)")
        .y_desc(spec.y_label)
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &spec.color))
        .map_err(render_error)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, spec.color.filled())),
        )
        .map_err(render_error)?;

    root.present().map_err(render_error)
}

/// Write both charts into `dir` and return their paths.
pub fn render_charts(trajectory: &Trajectory, dir: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ProcessError::IoError(format!("Create '{}': {}", dir.display(), e)))?;

    let time = trajectory.time_bounds()?;

    let weight_path = dir.join(WEIGHT_CHART);
    render_chart(
        &ChartSpec {
            title: "Weight vs Time",
            y_label: "Weight (g)",
            color: GREEN,
        },
        &trajectory.weight_series(),
        time,
        trajectory.weight_bounds()?,
        &weight_path,
    )?;

    let moisture_path = dir.join(MOISTURE_CHART);
    render_chart(
        &ChartSpec {
            title: "Moisture Content vs Time",
            y_label: "Moisture (%)",
            color: BLUE,
        },
        &trajectory.moisture_series(),
        time,
        trajectory.moisture_bounds()?,
        &moisture_path,
    )?;

    Ok(vec![weight_path, moisture_path])
}
