//! Points on a Circle - Interactive circle point viewer with PDF export
//!
//! Desktop front end: adjust the circle parameters, see the chart update,
//! and export the chart with a parameter summary as a PDF.

use circle_points::gui::CircleApp;
use eframe::egui;
use tracing::Level;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 820.0])
            .with_min_inner_size([900.0, 640.0])
            .with_title("Points on a Circle"),
        ..Default::default()
    };

    tracing::info!("Starting Points on a Circle");

    // Run the application
    eframe::run_native(
        "Points on a Circle",
        options,
        Box::new(|cc| Ok(Box::new(CircleApp::new(cc)))),
    )
}
