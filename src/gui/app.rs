//! Points on a Circle Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartBuilder, ChartError, CircleChart};
use crate::export::{ExportDocument, PdfExporter, EXPORT_FILE_NAME};
use crate::geometry::{CircleSpec, PointGenerator};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StatusKind};
use anyhow::Context;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main application window.
pub struct CircleApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl CircleApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    /// Recompute points and chart from the current inputs.
    fn build_chart(&self) -> Result<(CircleSpec, CircleChart), ChartError> {
        let spec = self.control_panel.circle_spec()?;
        let points = PointGenerator::for_spec(&spec)?;
        let chart = ChartBuilder::build(&spec, &points)?;
        Ok((spec, chart))
    }

    /// Handle PDF export of the chart currently on screen
    fn handle_export_pdf(&mut self, spec: &CircleSpec, chart: &CircleChart) {
        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(EXPORT_FILE_NAME)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let author = self.control_panel.author();
        let document = match PdfExporter::export(chart, spec, &author) {
            Ok(document) => document,
            Err(e) => {
                warn!("PDF export failed: {}", e);
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {}", e));
                return;
            }
        };

        let pages = document.page_count();
        match Self::save_document(document, &output_path) {
            Ok(path) => {
                info!(path = %path.display(), "PDF report saved");
                self.control_panel.set_status(
                    StatusKind::Success,
                    format!("Exported {} pages to {}", pages, path.display()),
                );
            }
            Err(e) => {
                warn!("Saving PDF failed: {:#}", e);
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {:#}", e));
            }
        }
    }

    fn save_document(document: ExportDocument, path: &Path) -> anyhow::Result<PathBuf> {
        let mut reader = document.into_reader();
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        std::io::copy(&mut reader, &mut file)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        Ok(path.to_path_buf())
    }
}

impl eframe::App for CircleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = ControlPanelAction::None;

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.control_panel.show(ui);
                });
            });

        // Rebuilt from scratch every frame; export reuses this exact chart.
        let built = self.build_chart();
        let author = self.control_panel.author();

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, built.as_ref().map(|(_, chart)| chart), &author);
        });

        match (action, &built) {
            (ControlPanelAction::ExportPdf, Ok((spec, chart))) => {
                self.handle_export_pdf(spec, chart);
            }
            (ControlPanelAction::ExportPdf, Err(e)) => {
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {}", e));
            }
            (ControlPanelAction::None, _) => {}
        }
    }
}
