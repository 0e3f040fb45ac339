//! Chart Plotter Module
//! Draws a [`CircleChart`] interactively using egui_plot.

use crate::charts::builder::{CircleChart, Series, LABEL_COLOR};
use crate::geometry::PointColor;
use egui::{Align2, Color32, RichText};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};

const POINT_RADIUS: f32 = 7.0;
const CENTER_RADIUS: f32 = 4.0;
const OUTLINE_WIDTH: f32 = 2.0;
const LABEL_SIZE: f32 = 10.0;

/// Draws circle charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color32(color: PointColor) -> Color32 {
        Color32::from_rgb(color.r, color.g, color.b)
    }

    /// Draw the chart as a square plot with grid, legend and point labels.
    pub fn draw_circle_chart(ui: &mut egui::Ui, chart: &CircleChart) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(chart.title).size(16.0).strong());
        });
        ui.add_space(4.0);

        let bounds = PlotBounds::from_min_max(
            [chart.bounds.x_min, chart.bounds.y_min],
            [chart.bounds.x_max, chart.bounds.y_max],
        );

        Plot::new("circle_chart")
            .view_aspect(1.0)
            .data_aspect(1.0)
            .legend(Legend::default())
            .show_grid(true)
            .x_axis_label(chart.x_label)
            .y_axis_label(chart.y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(bounds);

                for entry in Series::DRAW_ORDER
                    .iter()
                    .filter_map(|&series| chart.legend_entry(series))
                {
                    let color = Self::color32(entry.color);
                    match entry.series {
                        Series::Outline => {
                            let outline: PlotPoints =
                                chart.outline.iter().map(|p| [p.x, p.y]).collect();
                            plot_ui.line(
                                Line::new(outline)
                                    .color(color)
                                    .width(OUTLINE_WIDTH)
                                    .name(entry.label),
                            );
                        }
                        Series::Center => {
                            plot_ui.points(
                                Points::new(PlotPoints::new(vec![[chart.center.x, chart.center.y]]))
                                    .shape(MarkerShape::Circle)
                                    .filled(true)
                                    .radius(CENTER_RADIUS)
                                    .color(color)
                                    .name(entry.label),
                            );
                        }
                        Series::Points => {
                            let points: PlotPoints = chart
                                .points
                                .iter()
                                .map(|p| [p.position.x, p.position.y])
                                .collect();
                            plot_ui.points(
                                Points::new(points)
                                    .shape(MarkerShape::Circle)
                                    .filled(true)
                                    .radius(POINT_RADIUS)
                                    .color(color)
                                    .name(entry.label),
                            );
                        }
                    }
                }

                // Index labels on top of the markers
                let label_color = Self::color32(LABEL_COLOR);
                for point in &chart.points {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(point.position.x, point.position.y),
                            RichText::new(&point.label)
                                .size(LABEL_SIZE)
                                .strong()
                                .color(label_color),
                        )
                        .anchor(Align2::CENTER_CENTER),
                    );
                }
            });
    }
}
