//! Geometry module - Circle parameters and point placement

mod generator;
mod spec;

pub use generator::{Point, PointGenerator, PointSet};
pub use spec::{
    CircleSpec, ParameterError, PointColor, DEFAULT_COLOR_HEX, DEFAULT_POINTS, DEFAULT_RADIUS,
    MAX_CENTER_TO_RADIUS, MAX_POINTS, MIN_POINTS, MIN_RADIUS,
};
