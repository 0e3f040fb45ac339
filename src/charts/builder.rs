//! Chart Builder Module
//! Turns a circle spec and its points into a ready-to-draw chart description.
//!
//! The resulting [`CircleChart`] is what the interactive viewer displays and
//! what the PDF exporter embeds, so both always show the same content.

use crate::geometry::{CircleSpec, ParameterError, Point, PointColor, PointSet};
use thiserror::Error;
use tracing::debug;

pub const CHART_TITLE: &str = "Points on a Circle";
pub const X_AXIS_LABEL: &str = "x [m]";
pub const Y_AXIS_LABEL: &str = "y [m]";

/// View bounds extend this many radii from the center on every side.
pub const VIEW_PADDING: f64 = 1.2;
/// Number of straight segments used for the circle outline.
pub const OUTLINE_SEGMENTS: usize = 180;

/// Fixed colors (RGB)
pub const CENTER_COLOR: PointColor = PointColor::from_rgb(0, 0, 0);
pub const OUTLINE_COLOR: PointColor = PointColor::from_rgb(0, 0, 255);
pub const LABEL_COLOR: PointColor = PointColor::from_rgb(255, 255, 255);
pub const GRID_COLOR: PointColor = PointColor::from_rgb(200, 200, 200);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),
    #[error("Cannot render chart: {0}")]
    RenderFailure(String),
}

/// Chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Center,
    Points,
    Outline,
}

impl Series {
    /// Back to front; labels go on top of the points.
    pub const DRAW_ORDER: [Series; 3] = [Series::Outline, Series::Center, Series::Points];

    /// Drawn as a line in the legend rather than a dot.
    pub fn is_line(&self) -> bool {
        matches!(self, Series::Outline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: PointColor,
    pub series: Series,
}

/// Square view window in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartBounds {
    /// `center ± padding·radius` on both axes.
    pub fn around(center: (f64, f64), radius: f64) -> Self {
        let pad = radius * VIEW_PADDING;
        Self {
            x_min: center.0 - pad,
            x_max: center.0 + pad,
            y_min: center.1 - pad,
            y_max: center.1 + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn is_drawable(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

/// A labeled point as shown on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub position: Point,
    pub label: String,
}

/// One rendered chart: everything needed to display or export the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleChart {
    spec: CircleSpec,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bounds: ChartBounds,
    pub center: Point,
    pub outline: Vec<Point>,
    pub points: Vec<ChartPoint>,
    pub legend: Vec<LegendEntry>,
}

impl CircleChart {
    /// Parameters this chart was built from.
    pub fn spec(&self) -> &CircleSpec {
        &self.spec
    }

    pub fn point_color(&self) -> PointColor {
        self.spec.point_color
    }

    pub fn legend_entry(&self, series: Series) -> Option<&LegendEntry> {
        self.legend.iter().find(|e| e.series == series)
    }

    /// Check that the handle still describes a drawable figure.
    pub fn check_drawable(&self) -> Result<(), ChartError> {
        if !self.bounds.is_drawable() {
            return Err(ChartError::RenderFailure(format!(
                "degenerate view bounds {:?}",
                self.bounds
            )));
        }
        if self.points.len() != self.spec.point_count {
            return Err(ChartError::RenderFailure(format!(
                "chart holds {} points but parameters ask for {}",
                self.points.len(),
                self.spec.point_count
            )));
        }
        let all_finite = std::iter::once(&self.center)
            .chain(self.outline.iter())
            .chain(self.points.iter().map(|p| &p.position))
            .all(|p| p.x.is_finite() && p.y.is_finite());
        if !all_finite {
            return Err(ChartError::RenderFailure(
                "chart contains non-finite coordinates".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds [`CircleChart`]s. Stateless; a new chart is built for every interaction.
pub struct ChartBuilder;

impl ChartBuilder {
    pub fn build(spec: &CircleSpec, points: &PointSet) -> Result<CircleChart, ChartError> {
        spec.validate()?;

        let center = Point::new(spec.center.0, spec.center.1);
        let chart = CircleChart {
            spec: spec.clone(),
            title: CHART_TITLE,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            bounds: ChartBounds::around(spec.center, spec.radius),
            center,
            outline: Self::outline(center, spec.radius),
            points: points
                .labeled()
                .map(|(label, p)| ChartPoint {
                    position: *p,
                    label: label.to_string(),
                })
                .collect(),
            legend: vec![
                LegendEntry {
                    label: "Center",
                    color: CENTER_COLOR,
                    series: Series::Center,
                },
                LegendEntry {
                    label: "Points",
                    color: spec.point_color,
                    series: Series::Points,
                },
                LegendEntry {
                    label: "Circle",
                    color: OUTLINE_COLOR,
                    series: Series::Outline,
                },
            ],
        };

        chart.check_drawable()?;
        debug!(
            points = chart.points.len(),
            radius = spec.radius,
            "Built circle chart"
        );
        Ok(chart)
    }

    /// Closed polyline approximating the circle; first and last vertex coincide.
    fn outline(center: Point, radius: f64) -> Vec<Point> {
        let step = std::f64::consts::TAU / OUTLINE_SEGMENTS as f64;
        (0..=OUTLINE_SEGMENTS)
            .map(|i| {
                let theta = step * (i % OUTLINE_SEGMENTS) as f64;
                Point::new(
                    center.x + radius * theta.cos(),
                    center.y + radius * theta.sin(),
                )
            })
            .collect()
    }
}

/// Axis tick step of 1, 2 or 5 times a power of ten.
pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

const MAX_TICK_INDEX: f64 = (1u64 << 53) as f64;

/// Tick positions inside `[min, max]`, aligned to multiples of the step.
pub fn ticks(min: f64, max: f64, target_steps: usize) -> Vec<f64> {
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return Vec::new();
    }
    let step = nice_step(range, target_steps);
    let (first, last) = ((min / step).ceil(), (max / step).floor());
    // Tick indices must fit an i64 and stay few.
    let too_many = last - first > (4 * target_steps) as f64;
    if first.abs().max(last.abs()) >= MAX_TICK_INDEX || too_many {
        return Vec::new();
    }
    (first as i64..=last as i64).map(|k| k as f64 * step).collect()
}

/// Tick label with just enough decimals for the step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    // Avoid printing "-0.00".
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PointGenerator;
    use approx::assert_abs_diff_eq;

    fn build(spec: &CircleSpec) -> CircleChart {
        let points = PointGenerator::for_spec(spec).unwrap();
        ChartBuilder::build(spec, &points).unwrap()
    }

    #[test]
    fn bounds_pad_radius_around_center() {
        let spec = CircleSpec {
            center: (10.0, -4.0),
            radius: 2.5,
            ..CircleSpec::default()
        };
        let chart = build(&spec);

        assert_abs_diff_eq!(chart.bounds.x_min, 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(chart.bounds.x_max, 13.0, epsilon = 1e-12);
        assert_abs_diff_eq!(chart.bounds.y_min, -7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(chart.bounds.y_max, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(chart.bounds.width(), chart.bounds.height(), epsilon = 1e-12);
    }

    #[test]
    fn points_are_labeled_in_generation_order() {
        let spec = CircleSpec {
            point_count: 4,
            ..CircleSpec::default()
        };
        let chart = build(&spec);

        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4"]);
        assert_abs_diff_eq!(chart.points[0].position.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(chart.points[1].position.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn outline_is_closed_and_on_circle() {
        let spec = CircleSpec {
            center: (1.0, 2.0),
            radius: 3.0,
            ..CircleSpec::default()
        };
        let chart = build(&spec);

        assert_eq!(chart.outline.len(), OUTLINE_SEGMENTS + 1);
        assert_eq!(chart.outline.first(), chart.outline.last());
        for p in &chart.outline {
            assert_abs_diff_eq!(p.distance_to(&chart.center), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn legend_uses_point_color() {
        let spec = CircleSpec {
            point_color: PointColor::from_rgb(0x12, 0x34, 0x56),
            ..CircleSpec::default()
        };
        let chart = build(&spec);

        let labels: Vec<&str> = chart.legend.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Center", "Points", "Circle"]);
        assert_eq!(chart.legend[1].color, spec.point_color);
        assert_eq!(
            chart.legend_entry(Series::Outline).map(|e| e.color),
            Some(OUTLINE_COLOR)
        );
        assert_eq!(chart.point_color(), spec.point_color);
        assert_eq!(chart.spec(), &spec);
    }

    #[test]
    fn mismatched_point_set_is_a_render_failure() {
        let spec = CircleSpec::default();
        let points = PointGenerator::generate(spec.center, spec.radius, 3).unwrap();

        assert!(matches!(
            ChartBuilder::build(&spec, &points),
            Err(ChartError::RenderFailure(_))
        ));
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let bad = CircleSpec {
            radius: -1.0,
            ..CircleSpec::default()
        };
        let points = PointGenerator::for_spec(&CircleSpec::default()).unwrap();

        assert!(matches!(
            ChartBuilder::build(&bad, &points),
            Err(ChartError::InvalidParameter(ParameterError::InvalidRadius(_)))
        ));
    }

    #[test]
    fn corrupted_handle_is_not_drawable() {
        let mut chart = build(&CircleSpec::default());
        chart.bounds.x_max = f64::NAN;
        assert!(chart.check_drawable().is_err());

        let mut chart = build(&CircleSpec::default());
        chart.points.pop();
        assert!(chart.check_drawable().is_err());
    }

    #[test]
    fn nice_steps() {
        assert_abs_diff_eq!(nice_step(2.4, 5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(nice_step(24.0, 5), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(nice_step(0.024, 5), 0.005, epsilon = 1e-12);
    }

    #[test]
    fn ticks_cover_range() {
        let t = ticks(-1.2, 1.2, 5);
        assert_eq!(t.len(), 5);
        assert_abs_diff_eq!(t[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t[4], 1.0, epsilon = 1e-12);
        assert!(ticks(1.0, 1.0, 5).is_empty());
    }

    #[test]
    fn ticks_stay_empty_when_indices_overflow() {
        assert!(ticks(-1e17, -1e17 + 32.0, 5).is_empty());
    }

    #[test]
    fn far_center_within_ratio_limit_still_builds() {
        let spec = CircleSpec {
            center: (1e9, -1e9),
            radius: 0.01,
            point_count: 100,
            ..CircleSpec::default()
        };
        let chart = build(&spec);

        assert!(chart.bounds.is_drawable());
        assert!(!ticks(chart.bounds.x_min, chart.bounds.x_max, 6).is_empty());
    }

    #[test]
    fn center_beyond_ratio_limit_is_invalid_parameter() {
        let spec = CircleSpec {
            center: (1e17, 0.0),
            radius: 0.01,
            ..CircleSpec::default()
        };
        let points = PointGenerator::for_spec(&CircleSpec::default()).unwrap();

        assert!(matches!(
            ChartBuilder::build(&spec, &points),
            Err(ChartError::InvalidParameter(ParameterError::CenterTooFar(..)))
        ));
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(1.0, 0.5), "1.0");
        assert_eq!(format_tick(-0.0000000001, 0.5), "0.0");
        assert_eq!(format_tick(20.0, 5.0), "20");
        assert_eq!(format_tick(0.005, 0.005), "0.005");
    }
}
