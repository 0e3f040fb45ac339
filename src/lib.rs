//! Points on a Circle - evenly spaced circle points with chart and PDF export
//!
//! Each interaction runs the same pipeline: parameters are turned into a
//! [`geometry::CircleSpec`], [`geometry::PointGenerator`] places the points,
//! [`charts::ChartBuilder`] produces the chart that is displayed, and on
//! request [`export::PdfExporter`] turns that very chart into a report.

pub mod charts;
pub mod export;
pub mod geometry;
pub mod gui;
