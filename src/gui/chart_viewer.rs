//! Chart Viewer Widget
//! Central panel showing the current circle chart and application info.

use crate::charts::{ChartError, ChartPlotter, CircleChart};
use crate::export::AuthorInfo;
use egui::{Color32, RichText};

/// Largest edge of the square chart area.
const MAX_CHART_SIZE: f32 = 720.0;

/// Displays the chart built for the current frame.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the chart, or the reason it could not be built.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        chart: Result<&CircleChart, &ChartError>,
        author: &AuthorInfo,
    ) {
        match chart {
            Ok(chart) => {
                let size = ui
                    .available_width()
                    .min(ui.available_height() - 60.0)
                    .clamp(200.0, MAX_CHART_SIZE);
                ui.vertical_centered(|ui| {
                    ui.allocate_ui(egui::vec2(size, size + 30.0), |ui| {
                        ChartPlotter::draw_circle_chart(ui, chart);
                    });
                });
            }
            Err(error) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Error: {}", error))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
        }

        ui.add_space(10.0);
        Self::draw_about(ui, author);
    }

    fn draw_about(ui: &mut egui::Ui, author: &AuthorInfo) {
        ui.collapsing("About this application", |ui| {
            for line in author.lines() {
                ui.label(RichText::new(line).strong());
            }
            ui.label("Technologies: Rust, egui, egui_plot, printpdf");
            ui.add_space(4.0);
            ui.label(
                "Visualizes points evenly distributed on a circle and exports the \
                 chart with its parameters to a two-page PDF.",
            );
        });
    }
}
