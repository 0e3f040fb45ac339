//! Charts module - Chart construction and rendering

mod builder;
mod plotter;

pub use builder::{
    format_tick, nice_step, ticks, ChartBounds, ChartBuilder, ChartError, ChartPoint,
    CircleChart, LegendEntry, Series, CENTER_COLOR, CHART_TITLE, GRID_COLOR, LABEL_COLOR,
    OUTLINE_COLOR, OUTLINE_SEGMENTS, VIEW_PADDING, X_AXIS_LABEL, Y_AXIS_LABEL,
};
pub use plotter::ChartPlotter;
