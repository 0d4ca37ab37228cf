//! SVG rendering of chart geometry.
//!
//! Pure string builders that turn the geometry produced by the `chart`
//! module into standalone SVG documents. No I/O; callers decide where
//! the markup goes.

use crate::{BarGeometry, ChartArea, DonutGeometry, LineGeometry};

/// Horizontal grid-line ratios drawn behind line and bar charts
const GRID_RATIOS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Render a line chart: grid, connected polyline, per-point markers,
/// and decimated baseline labels.
pub fn line_chart_svg(geometry: &LineGeometry, area: &ChartArea, color: &str) -> String {
    let mut body = String::new();

    body.push_str(&grid_lines(area));

    let points: Vec<String> = geometry
        .points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect();
    body.push_str(&format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="3" points="{}"/>"#,
        color,
        points.join(" ")
    ));

    for point in &geometry.points {
        body.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}"/>"#,
            point.x, point.y, color
        ));
    }

    for label in &geometry.labels {
        body.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="#6b7280">{}</text>"##,
            label.x,
            label.y,
            escape(&label.text)
        ));
    }

    document(area.width, area.height, &body)
}

/// Render a donut chart: one closed wedge path per segment
/// (center → start → arc → close), an inner hole, and the total
/// in the middle.
pub fn donut_chart_svg(geometry: &DonutGeometry) -> String {
    let size = geometry.center.x * 2.0;
    let mut body = String::new();

    for wedge in &geometry.wedges {
        let large_arc = if wedge.large_arc { 1 } else { 0 };
        body.push_str(&format!(
            r#"<path d="M {cx:.1} {cy:.1} L {sx:.1} {sy:.1} A {r:.1} {r:.1} 0 {flag} 1 {ex:.1} {ey:.1} Z" fill="{color}" opacity="0.8"/>"#,
            cx = geometry.center.x,
            cy = geometry.center.y,
            sx = wedge.start.x,
            sy = wedge.start.y,
            r = geometry.radius,
            flag = large_arc,
            ex = wedge.end.x,
            ey = wedge.end.y,
            color = wedge.color,
        ));
    }

    body.push_str(&format!(
        r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="white"/>"#,
        geometry.center.x,
        geometry.center.y,
        geometry.radius * 0.5
    ));
    body.push_str(&format!(
        r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" dy="0.3em" font-size="14" font-weight="bold" fill="#4b5563">{}</text>"##,
        geometry.center.x, geometry.center.y, geometry.total
    ));

    document(size, size, &body)
}

/// Render a bar chart: grid, bars, numeric labels above each non-empty
/// bar, and category labels along the baseline.
pub fn bar_chart_svg(geometry: &BarGeometry, color: &str) -> String {
    let area = geometry.area;
    let mut body = String::new();

    body.push_str(&grid_lines(&area));

    for bar in &geometry.bars {
        body.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" opacity="0.8"/>"#,
            bar.x, bar.y, bar.width, bar.height, color
        ));

        if bar.height > 0.0 {
            body.push_str(&format!(
                r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="#374151" font-weight="bold">{}</text>"##,
                bar.x + bar.width / 2.0,
                bar.y - 6.0,
                bar.value
            ));
        }

        if !bar.label.is_empty() {
            body.push_str(&format!(
                r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="#6b7280">{}</text>"##,
                bar.x + bar.width / 2.0,
                area.height - 6.0,
                escape(&bar.label)
            ));
        }
    }

    document(area.width, area.height, &body)
}

fn grid_lines(area: &ChartArea) -> String {
    let mut lines = String::new();
    for ratio in GRID_RATIOS {
        let y = area.margin + ratio * area.inner_height();
        lines.push_str(&format!(
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#e5e7eb" stroke-width="1"/>"##,
            area.margin,
            y,
            area.width - area.margin,
            y
        ));
    }
    lines
}

fn document(width: f64, height: f64, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">{}</svg>"#,
        width, height, width, height, body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bar_geometry, donut_geometry, line_geometry, CategorySlice};

    fn test_area() -> ChartArea {
        ChartArea::new(300.0, 150.0, 20.0)
    }

    #[test]
    fn test_line_svg_contains_polyline_and_markers() {
        let labels = vec!["Mon".to_string(), "Tue".to_string(), "Wed".to_string()];
        let geometry = line_geometry(&[1.0, 3.0, 2.0], &labels, &test_area()).unwrap();
        let svg = line_chart_svg(&geometry, &test_area(), "#60a5fa");

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Mon"));
    }

    #[test]
    fn test_donut_svg_one_path_per_wedge() {
        let slices = vec![
            CategorySlice {
                value: 1.0,
                label: "A".into(),
                color: "#60a5fa".into(),
            },
            CategorySlice {
                value: 3.0,
                label: "B".into(),
                color: "#34d399".into(),
            },
        ];
        let geometry = donut_geometry(&slices, 120.0).unwrap();
        let svg = donut_chart_svg(&geometry);

        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("A 50.0 50.0 0 1 1")); // 270° sweep takes the large arc
    }

    #[test]
    fn test_bar_svg_skips_value_label_for_zero_bars() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let geometry = bar_geometry(&[0.0, 4.0], &labels, &test_area()).unwrap();
        let svg = bar_chart_svg(&geometry, "#34d399");

        assert_eq!(svg.matches("<rect").count(), 2);
        // One value label (above the non-zero bar) plus two category labels
        assert_eq!(svg.matches("<text").count(), 3);
    }

    #[test]
    fn test_labels_are_escaped() {
        let labels = vec!["a<b".to_string()];
        let geometry = line_geometry(&[1.0], &labels, &test_area()).unwrap();
        let svg = line_chart_svg(&geometry, &test_area(), "#60a5fa");

        assert!(svg.contains("a&lt;b"));
        assert!(!svg.contains("a<b"));
    }
}
