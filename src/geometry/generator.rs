//! Point Generator Module
//! Places N points at equal angular spacing on a circle.
//!
//! Point 0 sits at angle 0 (east of the center) and the rest follow
//! counter-clockwise, so the generation order is also the label order.

use crate::geometry::spec::{validate_geometry, CircleSpec, ParameterError};
use std::f64::consts::TAU;

/// A point in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Ordered points of one computation. Index `i` is displayed as label `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Points paired with their 1-based display label.
    pub fn labeled(&self) -> impl Iterator<Item = (usize, &Point)> {
        self.points.iter().enumerate().map(|(i, p)| (i + 1, p))
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Computes circle points from center, radius and count.
pub struct PointGenerator;

impl PointGenerator {
    /// Generate `point_count` points with angle `2π·i / point_count`.
    ///
    /// Out-of-range inputs fail fast with a [`ParameterError`].
    pub fn generate(
        center: (f64, f64),
        radius: f64,
        point_count: usize,
    ) -> Result<PointSet, ParameterError> {
        validate_geometry(center, radius, point_count)?;

        let (cx, cy) = center;
        let step = TAU / point_count as f64;
        let points = (0..point_count)
            .map(|i| {
                let theta = step * i as f64;
                Point::new(cx + radius * theta.cos(), cy + radius * theta.sin())
            })
            .collect();

        Ok(PointSet { points })
    }

    pub fn for_spec(spec: &CircleSpec) -> Result<PointSet, ParameterError> {
        Self::generate(spec.center, spec.radius, spec.point_count)
    }
}
