//! Control Panel Widget
//! Left side panel with the circle parameters and the export controls.

use crate::export::AuthorInfo;
use crate::geometry::{
    CircleSpec, ParameterError, PointColor, DEFAULT_POINTS, DEFAULT_RADIUS, MAX_POINTS,
    MIN_POINTS, MIN_RADIUS,
};
use egui::{Color32, DragValue, RichText, Slider};

/// Largest radius the drag value allows.
const MAX_RADIUS: f64 = 1.0e6;

/// Raw widget state, converted into a [`CircleSpec`] every frame.
#[derive(Clone, Debug)]
pub struct UserSettings {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub point_count: usize,
    pub point_color: [u8; 3],
    pub author_name: String,
    pub author_email: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        let color = PointColor::default();
        let author = AuthorInfo::default();
        Self {
            center_x: 0.0,
            center_y: 0.0,
            radius: DEFAULT_RADIUS,
            point_count: DEFAULT_POINTS,
            point_color: [color.r, color.g, color.b],
            author_name: author.name,
            author_email: author.email,
        }
    }
}

/// How the status line should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn color(self) -> Color32 {
        match self {
            StatusKind::Info => Color32::GRAY,
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
        }
    }
}

/// Left side control panel with parameter inputs and export button.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub status_kind: StatusKind,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for the current frame.
    pub fn circle_spec(&self) -> Result<CircleSpec, ParameterError> {
        let [r, g, b] = self.settings.point_color;
        CircleSpec::new(
            (self.settings.center_x, self.settings.center_y),
            self.settings.radius,
            self.settings.point_count,
            PointColor::from_rgb(r, g, b),
        )
    }

    pub fn author(&self) -> AuthorInfo {
        AuthorInfo::new(
            self.settings.author_name.trim(),
            self.settings.author_email.trim(),
        )
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("◯ Points on a Circle")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Circle Parameters =====
        ui.label(RichText::new("📐 Circle Parameters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 120.0;

        egui::Grid::new("circle_parameters")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Center X [m]:"));
                ui.add(
                    DragValue::new(&mut self.settings.center_x)
                        .speed(0.05)
                        .fixed_decimals(2),
                );
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Center Y [m]:"));
                ui.add(
                    DragValue::new(&mut self.settings.center_y)
                        .speed(0.05)
                        .fixed_decimals(2),
                );
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Radius [m]:"));
                ui.add(
                    DragValue::new(&mut self.settings.radius)
                        .speed(0.01)
                        .fixed_decimals(2)
                        .range(MIN_RADIUS..=MAX_RADIUS),
                );
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Number of points:"));
                ui.add(Slider::new(
                    &mut self.settings.point_count,
                    MIN_POINTS..=MAX_POINTS,
                ));
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Point color:"));
                ui.horizontal(|ui| {
                    ui.color_edit_button_srgb(&mut self.settings.point_color);
                    let [r, g, b] = self.settings.point_color;
                    ui.label(
                        RichText::new(PointColor::from_rgb(r, g, b).to_hex())
                            .monospace()
                            .size(12.0),
                    );
                });
                ui.end_row();
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Report Author =====
        ui.label(RichText::new("👤 Report Author").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.add_sized([60.0, 20.0], egui::Label::new("Name:"));
                    ui.text_edit_singleline(&mut self.settings.author_name);
                });
                ui.horizontal(|ui| {
                    ui.add_sized([60.0, 20.0], egui::Label::new("Email:"));
                    ui.text_edit_singleline(&mut self.settings.author_email);
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let export_enabled = self.circle_spec().is_ok();
            ui.add_enabled_ui(export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export PDF").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPdf;
                }
            });
        });

        ui.add_space(10.0);

        ui.label(
            RichText::new(&self.status)
                .size(11.0)
                .color(self.status_kind.color()),
        );

        action
    }

    /// Set status line
    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ExportPdf,
}
