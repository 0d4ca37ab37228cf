//! Chart geometry engine.
//!
//! Pure transformations from numeric series into drawable primitives
//! for three chart kinds:
//! - Line: polyline points plus decimated baseline labels
//! - Donut: proportional wedges with arc endpoints and legend percentages
//! - Bar: equal-width bars anchored to the baseline
//!
//! No rendering happens here; see the `svg` module for that.

use crate::{
    AxisLabel, Bar, BarGeometry, CategorySlice, ChartArea, DonutGeometry, Error, LineGeometry,
    PlottedPoint, Result, Wedge,
};

/// Gap between adjacent bars, in canvas units
const BAR_GAP: f64 = 8.0;

/// Maximum number of baseline labels emitted by the line operation
const MAX_AXIS_LABELS: usize = 5;

/// Compute line-chart geometry for a series of samples.
///
/// The horizontal position interpolates across `[margin, width - margin]`;
/// a single-sample series places its point at the horizontal center.
/// The vertical position interpolates the normalized value across
/// `[height - margin, margin]`, so higher values render nearer the top.
/// An all-equal series uses an effective range of 1 so every point lands
/// on the baseline with finite coordinates.
///
/// `labels` may be empty; otherwise it is decimated to at most
/// [`MAX_AXIS_LABELS`] entries, keeping every `ceil(n / 5)`-th label.
///
/// Returns an error for an empty series or a label sequence whose length
/// matches neither zero nor the series length.
pub fn line_geometry(series: &[f64], labels: &[String], area: &ChartArea) -> Result<LineGeometry> {
    if series.is_empty() {
        return Err(Error::Chart("line chart requires a non-empty series".into()));
    }
    if !labels.is_empty() && labels.len() != series.len() {
        return Err(Error::Chart(format!(
            "label count {} does not match series length {}",
            labels.len(),
            series.len()
        )));
    }

    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Flat series: treat the effective range as 1 to avoid division by zero
    let range = if max == min { 1.0 } else { max - min };

    let n = series.len();
    let points: Vec<PlottedPoint> = series
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = horizontal_position(i, n, area);
            let y = area.height - area.margin - ((value - min) / range) * area.inner_height();
            PlottedPoint { x, y }
        })
        .collect();

    let stride = (n + MAX_AXIS_LABELS - 1) / MAX_AXIS_LABELS;
    let labels = labels
        .iter()
        .enumerate()
        .filter(|(i, _)| i % stride.max(1) == 0)
        .map(|(i, text)| AxisLabel {
            x: horizontal_position(i, n, area),
            y: area.height - 5.0,
            text: text.clone(),
        })
        .collect();

    Ok(LineGeometry { points, labels })
}

fn horizontal_position(index: usize, count: usize, area: &ChartArea) -> f64 {
    if count == 1 {
        area.width / 2.0
    } else {
        area.margin + (index as f64 / (count - 1) as f64) * area.inner_width()
    }
}

/// Compute donut-chart geometry for a set of category slices.
///
/// Each slice is allocated a sweep of `value / total * 360°` starting
/// from a running cumulative angle at 0°, with arc endpoints on a radius
/// of `size / 2 - 10` around the chart center. The `large_arc` flag is
/// set when a sweep exceeds 180°.
///
/// Degenerate-input policy (documented, never panics):
/// - empty input is an error
/// - any negative value is rejected with [`Error::InvalidInput`]
/// - a zero total falls back to equal-sized wedges (`360 / n` each,
///   percent `round(100 / n)`) so legends stay populated
pub fn donut_geometry(slices: &[CategorySlice], size: f64) -> Result<DonutGeometry> {
    if slices.is_empty() {
        return Err(Error::Chart("donut chart requires at least one slice".into()));
    }
    if let Some(bad) = slices.iter().find(|s| s.value < 0.0) {
        return Err(Error::InvalidInput(format!(
            "negative donut value {} for '{}'",
            bad.value, bad.label
        )));
    }

    let center = size / 2.0;
    let radius = center - 10.0;
    let total: f64 = slices.iter().map(|s| s.value).sum();

    let equal_share = total == 0.0;
    if equal_share {
        tracing::debug!("Donut total is zero, falling back to equal-sized wedges");
    }

    let n = slices.len() as f64;
    let mut current_angle = 0.0;
    let mut wedges = Vec::with_capacity(slices.len());

    for slice in slices {
        let fraction = if equal_share {
            1.0 / n
        } else {
            slice.value / total
        };
        let sweep = fraction * 360.0;

        wedges.push(Wedge {
            label: slice.label.clone(),
            color: slice.color.clone(),
            value: slice.value,
            start_angle: current_angle,
            sweep_angle: sweep,
            large_arc: sweep > 180.0,
            start: point_on_circle(center, radius, current_angle),
            end: point_on_circle(center, radius, current_angle + sweep),
            percent: (fraction * 100.0).round() as u32,
        });

        current_angle += sweep;
    }

    Ok(DonutGeometry {
        center: PlottedPoint {
            x: center,
            y: center,
        },
        radius,
        total,
        wedges,
    })
}

fn point_on_circle(center: f64, radius: f64, angle_deg: f64) -> PlottedPoint {
    let rad = angle_deg.to_radians();
    PlottedPoint {
        x: center + radius * rad.cos(),
        y: center + radius * rad.sin(),
    }
}

/// Compute bar-chart geometry for a sequence of non-negative values.
///
/// Bars get equal widths across the inner canvas with a fixed gap
/// between them; heights are proportional to `value / max(values, 1)`,
/// so an all-zero input yields zero-height bars rather than dividing
/// by zero. Bars anchor to the bottom margin and grow upward.
pub fn bar_geometry(values: &[f64], labels: &[String], area: &ChartArea) -> Result<BarGeometry> {
    if values.is_empty() {
        return Err(Error::Chart("bar chart requires a non-empty series".into()));
    }
    if !labels.is_empty() && labels.len() != values.len() {
        return Err(Error::Chart(format!(
            "label count {} does not match value count {}",
            labels.len(),
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|v| **v < 0.0) {
        return Err(Error::InvalidInput(format!("negative bar value {}", bad)));
    }

    // Denominator is clamped to at least 1 so all-zero inputs are safe
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max).max(1.0);

    let bar_width = area.inner_width() / values.len() as f64 - BAR_GAP;
    let bars = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let height = (value / max) * area.inner_height();
            Bar {
                x: area.margin + i as f64 * (bar_width + BAR_GAP),
                y: area.height - area.margin - height,
                width: bar_width,
                height,
                value: *value,
                label: labels.get(i).cloned().unwrap_or_default(),
            }
        })
        .collect();

    Ok(BarGeometry { area: *area, bars })
}
