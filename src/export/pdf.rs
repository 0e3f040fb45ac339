//! PDF Report Generator Module
//! Builds the two-page report: parameter summary, then the chart.
//!
//! The chart page is drawn as vector graphics straight from the
//! [`CircleChart`] handle the viewer displays; nothing is recomputed here.
//! Output stays in memory, callers decide where the bytes go.

use crate::charts::{
    format_tick, nice_step, ticks, ChartError, CircleChart, Series, GRID_COLOR, LABEL_COLOR,
};
use crate::export::summary::{AuthorInfo, ParameterSummary};
use crate::geometry::{CircleSpec, ParameterError, Point as PlotPoint, PointColor};
use printpdf::lopdf::Document as PdfObjects;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::utils::calculate_points_for_circle;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb,
};
use std::io::Cursor;
use thiserror::Error;
use tracing::{info, warn};

/// Suggested file name for the download.
pub const EXPORT_FILE_NAME: &str = "points_on_circle.pdf";
pub const EXPORT_MIME: &str = "application/pdf";

pub const REPORT_PAGES: usize = 2;
const DOCUMENT_TITLE: &str = "Points on a Circle";
const LAYER_NAME: &str = "Layer 1";

/// A4 portrait, summary page
const SUMMARY_WIDTH: Mm = Mm(210.0);
const SUMMARY_HEIGHT: Mm = Mm(297.0);
const SUMMARY_MARGIN: f32 = 20.0;
const SUMMARY_FONT_SIZE: f32 = 12.0;

/// 6 x 6 inch chart page
const CHART_PAGE_SIZE: f32 = 152.4;
const CHART_MARGIN_LEFT: f32 = 22.0;
const CHART_MARGIN_RIGHT: f32 = 8.0;
const CHART_MARGIN_BOTTOM: f32 = 18.0;
const CHART_MARGIN_TOP: f32 = 14.0;

const PT_TO_MM: f32 = 0.352_778;
/// Rough Helvetica advance width, in em.
const GLYPH_WIDTH_EM: f32 = 0.556;

/// Text encoding printpdf writes for its built-in fonts.
const BUILTIN_FONT_ENCODING: &str = "WinAnsiEncoding";

const POINT_RADIUS_MM: f32 = 2.4;
const CENTER_RADIUS_MM: f32 = 1.2;
const TARGET_TICKS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Render failure: {0}")]
    RenderFailure(String),
}

impl From<ParameterError> for ExportError {
    fn from(e: ParameterError) -> Self {
        ExportError::InvalidParameter(e.to_string())
    }
}

impl From<ChartError> for ExportError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::InvalidParameter(inner) => inner.into(),
            ChartError::RenderFailure(msg) => ExportError::RenderFailure(msg),
        }
    }
}

/// Finished report, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    bytes: Vec<u8>,
    pages: usize,
}

impl ExportDocument {
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reader positioned at the start of the document.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Creates PDF reports from a displayed chart.
pub struct PdfExporter;

impl PdfExporter {
    /// Export `chart` with its parameter summary.
    ///
    /// `spec` must be the parameters the chart was built from; the chart
    /// handle is reused as-is so the report matches what is on screen.
    pub fn export(
        chart: &CircleChart,
        spec: &CircleSpec,
        author: &AuthorInfo,
    ) -> Result<ExportDocument, ExportError> {
        spec.validate()?;
        if chart.spec() != spec {
            warn!("Export requested with parameters that differ from the displayed chart");
            return Err(ExportError::InvalidParameter(
                "parameters differ from the displayed chart".to_string(),
            ));
        }
        chart.check_drawable()?;
        let summary = ParameterSummary::from_chart(chart, author);
        Self::check_encodable(&summary)?;

        info!(points = spec.point_count, "Exporting PDF report");

        let (doc, summary_page, summary_layer) =
            PdfDocument::new(DOCUMENT_TITLE, SUMMARY_WIDTH, SUMMARY_HEIGHT, LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(Self::render_failure)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(Self::render_failure)?;

        // Page 1: parameter summary
        let layer = doc.get_page(summary_page).get_layer(summary_layer);
        Self::draw_summary(&layer, &summary, &regular);

        // Page 2: chart
        let (chart_page, chart_layer) = doc.add_page(
            Mm(CHART_PAGE_SIZE),
            Mm(CHART_PAGE_SIZE),
            LAYER_NAME,
        );
        let layer = doc.get_page(chart_page).get_layer(chart_layer);
        ChartPage::new(layer, chart, &regular, &bold).draw();

        let bytes = doc.save_to_bytes().map_err(Self::render_failure)?;
        info!(bytes = bytes.len(), "PDF report ready");

        Ok(ExportDocument {
            bytes,
            pages: REPORT_PAGES,
        })
    }

    fn render_failure<E: std::fmt::Debug>(e: E) -> ExportError {
        warn!("PDF serialization failed: {:?}", e);
        ExportError::RenderFailure(format!("{e:?}"))
    }

    /// The built-in fonts only cover WinAnsi; anything else would vanish from the page.
    fn check_encodable(summary: &ParameterSummary) -> Result<(), ExportError> {
        let mut buf = [0u8; 4];
        for line in summary.lines() {
            let missing = line.chars().find(|ch| {
                PdfObjects::encode_text(Some(BUILTIN_FONT_ENCODING), ch.encode_utf8(&mut buf))
                    .is_empty()
            });
            if let Some(ch) = missing {
                warn!(%line, "Summary text not representable in the PDF font");
                return Err(ExportError::InvalidParameter(format!(
                    "character '{ch}' in \"{line}\" cannot be written to the PDF"
                )));
            }
        }
        Ok(())
    }

    fn draw_summary(
        layer: &PdfLayerReference,
        summary: &ParameterSummary,
        font: &IndirectFontRef,
    ) {
        let line_height = SUMMARY_FONT_SIZE * 1.4 * PT_TO_MM;
        let mut y = SUMMARY_HEIGHT.0 - SUMMARY_MARGIN;

        for line in summary.lines() {
            if !line.is_empty() {
                layer.use_text(
                    line.as_str(),
                    SUMMARY_FONT_SIZE,
                    Mm(SUMMARY_MARGIN),
                    Mm(y),
                    font,
                );
            }
            y -= line_height;
        }
    }
}

fn pdf_color(color: PointColor) -> Color {
    let (r, g, b) = color.to_unit_rgb();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * GLYPH_WIDTH_EM * font_size * PT_TO_MM
}

/// Draws one chart onto a square page, mapping data coordinates to millimetres.
struct ChartPage<'a> {
    layer: PdfLayerReference,
    chart: &'a CircleChart,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    origin_x: f32,
    origin_y: f32,
    side: f32,
}

impl<'a> ChartPage<'a> {
    fn new(
        layer: PdfLayerReference,
        chart: &'a CircleChart,
        regular: &'a IndirectFontRef,
        bold: &'a IndirectFontRef,
    ) -> Self {
        let avail_w = CHART_PAGE_SIZE - CHART_MARGIN_LEFT - CHART_MARGIN_RIGHT;
        let avail_h = CHART_PAGE_SIZE - CHART_MARGIN_BOTTOM - CHART_MARGIN_TOP;
        let side = avail_w.min(avail_h);

        Self {
            layer,
            chart,
            regular,
            bold,
            origin_x: CHART_MARGIN_LEFT + (avail_w - side) / 2.0,
            origin_y: CHART_MARGIN_BOTTOM + (avail_h - side) / 2.0,
            side,
        }
    }

    fn draw(&self) {
        self.draw_grid();
        self.draw_frame();

        for entry in Series::DRAW_ORDER
            .iter()
            .filter_map(|&series| self.chart.legend_entry(series))
        {
            match entry.series {
                Series::Outline => self.draw_outline(entry.color),
                Series::Center => {
                    let c = self.map(&self.chart.center);
                    self.fill_disc(c, CENTER_RADIUS_MM, entry.color);
                }
                Series::Points => self.draw_points(entry.color),
            }
        }

        self.draw_titles();
        self.draw_legend();
    }

    fn map(&self, p: &PlotPoint) -> (f32, f32) {
        let b = &self.chart.bounds;
        let x = (p.x - b.x_min) / b.width();
        let y = (p.y - b.y_min) / b.height();
        (
            self.origin_x + x as f32 * self.side,
            self.origin_y + y as f32 * self.side,
        )
    }

    fn stroke(&self, points: &[(f32, f32)], closed: bool, color: PointColor, width_pt: f32) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(width_pt);
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn fill(&self, ring: Vec<(Point, bool)>, color: PointColor) {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn fill_rect(&self, (left, bottom): (f32, f32), (right, top): (f32, f32), color: PointColor) {
        let corners = [(left, bottom), (right, bottom), (right, top), (left, top)];
        self.fill(
            corners
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            color,
        );
    }

    fn fill_disc(&self, (cx, cy): (f32, f32), radius: f32, color: PointColor) {
        self.fill(calculate_points_for_circle(Mm(radius), Mm(cx), Mm(cy)), color);
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool, color: PointColor) {
        let font = if bold { self.bold } else { self.regular };
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    fn text_centered(&self, text: &str, size: f32, cx: f32, cy: f32, bold: bool, color: PointColor) {
        let x = cx - text_width_mm(text, size) / 2.0;
        // Baseline offset so digits sit vertically centered.
        let y = cy - size * PT_TO_MM * 0.35;
        self.text(text, size, x, y, bold, color);
    }

    fn draw_grid(&self) {
        let b = self.chart.bounds;
        let black = PointColor::from_rgb(0, 0, 0);
        let (x0, y0, s) = (self.origin_x, self.origin_y, self.side);

        let x_step = nice_step(b.width(), TARGET_TICKS);
        for t in ticks(b.x_min, b.x_max, TARGET_TICKS) {
            let (x, _) = self.map(&PlotPoint::new(t, b.y_min));
            self.stroke(&[(x, y0), (x, y0 + s)], false, GRID_COLOR, 0.3);
            self.text_centered(&format_tick(t, x_step), 8.0, x, y0 - 4.0, false, black);
        }

        let y_step = nice_step(b.height(), TARGET_TICKS);
        for t in ticks(b.y_min, b.y_max, TARGET_TICKS) {
            let (_, y) = self.map(&PlotPoint::new(b.x_min, t));
            self.stroke(&[(x0, y), (x0 + s, y)], false, GRID_COLOR, 0.3);
            let label = format_tick(t, y_step);
            let w = text_width_mm(&label, 8.0);
            self.text(&label, 8.0, x0 - 2.0 - w, y - 1.0, false, black);
        }
    }

    fn draw_frame(&self) {
        let (x0, y0, s) = (self.origin_x, self.origin_y, self.side);
        self.stroke(
            &[(x0, y0), (x0 + s, y0), (x0 + s, y0 + s), (x0, y0 + s)],
            true,
            PointColor::from_rgb(0, 0, 0),
            0.6,
        );
    }

    fn draw_outline(&self, color: PointColor) {
        let mapped: Vec<(f32, f32)> = self.chart.outline.iter().map(|p| self.map(p)).collect();
        self.stroke(&mapped, true, color, 2.0);
    }

    fn draw_points(&self, color: PointColor) {
        for point in &self.chart.points {
            let c = self.map(&point.position);
            self.fill_disc(c, POINT_RADIUS_MM, color);
        }
        for point in &self.chart.points {
            let (x, y) = self.map(&point.position);
            self.text_centered(&point.label, 7.0, x, y, true, LABEL_COLOR);
        }
    }

    fn draw_titles(&self) {
        let black = PointColor::from_rgb(0, 0, 0);
        let (x0, y0, s) = (self.origin_x, self.origin_y, self.side);

        self.text_centered(self.chart.title, 12.0, x0 + s / 2.0, y0 + s + 7.0, true, black);
        self.text_centered(self.chart.x_label, 10.0, x0 + s / 2.0, y0 - 11.0, false, black);
        let w = text_width_mm(self.chart.y_label, 10.0);
        self.text(self.chart.y_label, 10.0, (x0 - w - 12.0).max(2.0), y0 + s / 2.0, false, black);
    }

    fn draw_legend(&self) {
        let size = 8.0;
        let row_h = 5.0;
        let box_w = 28.0;
        let box_h = row_h * self.chart.legend.len() as f32 + 2.0;
        let right = self.origin_x + self.side - 2.0;
        let top = self.origin_y + self.side - 2.0;
        let left = right - box_w;
        let bottom = top - box_h;

        self.fill_rect((left, bottom), (right, top), PointColor::from_rgb(255, 255, 255));
        self.stroke(
            &[(left, bottom), (right, bottom), (right, top), (left, top)],
            true,
            GRID_COLOR,
            0.5,
        );

        for (i, entry) in self.chart.legend.iter().enumerate() {
            let y = top - 1.0 - row_h * (i as f32 + 0.5);
            let marker_x = left + 4.0;
            if entry.series.is_line() {
                self.stroke(&[(marker_x - 2.5, y), (marker_x + 2.5, y)], false, entry.color, 2.0);
            } else {
                self.fill_disc((marker_x, y), 1.2, entry.color);
            }
            self.text(
                entry.label,
                size,
                left + 9.0,
                y - size * PT_TO_MM * 0.35,
                false,
                PointColor::from_rgb(0, 0, 0),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartBuilder;
    use crate::geometry::PointGenerator;

    fn chart_for(spec: &CircleSpec) -> CircleChart {
        let points = PointGenerator::for_spec(spec).unwrap();
        ChartBuilder::build(spec, &points).unwrap()
    }

    #[test]
    fn export_produces_pdf_bytes() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);

        let doc = PdfExporter::export(&chart, &spec, &AuthorInfo::default()).unwrap();
        assert_eq!(doc.page_count(), REPORT_PAGES);
        assert!(doc.as_bytes().starts_with(b"%PDF-"));
        assert!(!doc.is_empty());
    }

    #[test]
    fn reader_starts_at_beginning() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);

        let reader = PdfExporter::export(&chart, &spec, &AuthorInfo::default())
            .unwrap()
            .into_reader();
        assert_eq!(reader.position(), 0);
        assert!(reader.get_ref().starts_with(b"%PDF-"));
    }

    #[test]
    fn export_does_not_mutate_inputs() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);
        let (spec_before, chart_before) = (spec.clone(), chart.clone());

        PdfExporter::export(&chart, &spec, &AuthorInfo::default()).unwrap();
        assert_eq!(spec, spec_before);
        assert_eq!(chart, chart_before);
    }

    #[test]
    fn rejects_parameters_that_differ_from_chart() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);
        let other = CircleSpec {
            radius: 2.0,
            ..spec.clone()
        };

        assert!(matches!(
            PdfExporter::export(&chart, &other, &AuthorInfo::default()),
            Err(ExportError::InvalidParameter(_))
        ));
    }

    #[test]
    fn corrupted_chart_is_a_render_failure() {
        let spec = CircleSpec::default();
        let mut chart = chart_for(&spec);
        chart.bounds.y_min = f64::INFINITY;

        assert!(matches!(
            PdfExporter::export(&chart, &spec, &AuthorInfo::default()),
            Err(ExportError::RenderFailure(_))
        ));
    }

    #[test]
    fn markers_are_drawn_as_bezier_circles() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);
        let doc = PdfExporter::export(&chart, &spec, &AuthorInfo::default()).unwrap();

        let pdf = lopdf::Document::load_mem(doc.as_bytes()).unwrap();
        let chart_page = pdf.get_pages()[&2];
        let content = pdf.get_and_decode_page_content(chart_page).unwrap();
        let curves = content
            .operations
            .iter()
            .filter(|op| op.operator == "c")
            .count();

        // Four curve segments per disc: every point plus the center marker.
        assert!(curves >= 4 * (spec.point_count + 1), "only {curves} curves");
    }

    #[test]
    fn author_outside_font_encoding_is_rejected() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);
        let author = AuthorInfo::new("Markéta Řezníčková", "");

        match PdfExporter::export(&chart, &spec, &author) {
            Err(ExportError::InvalidParameter(msg)) => assert!(msg.contains('Ř'), "{msg}"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn latin_author_is_accepted() {
        let spec = CircleSpec::default();
        let chart = chart_for(&spec);
        let author = AuthorInfo::new("José Müller", "jose@example.org");

        assert!(PdfExporter::export(&chart, &spec, &author).is_ok());
    }

    #[test]
    fn text_width_grows_with_length() {
        assert!(text_width_mm("100", 7.0) > text_width_mm("1", 7.0));
        assert_eq!(text_width_mm("", 12.0), 0.0);
    }
}
