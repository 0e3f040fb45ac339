use circle_points::charts::{ChartBuilder, CircleChart};
use circle_points::export::{
    AuthorInfo, ExportError, ParameterSummary, PdfExporter, EXPORT_FILE_NAME, EXPORT_MIME,
    REPORT_PAGES,
};
use circle_points::geometry::{CircleSpec, PointColor, PointGenerator};
use std::io::Read;

fn build_chart(spec: &CircleSpec) -> CircleChart {
    let points = PointGenerator::for_spec(spec).expect("valid spec");
    ChartBuilder::build(spec, &points).expect("chart builds")
}

fn page_count(bytes: &[u8]) -> usize {
    let doc = lopdf::Document::load_mem(bytes).expect("exported PDF parses");
    doc.get_pages().len()
}

#[test]
fn report_always_has_two_pages() {
    let specs = [
        CircleSpec::default(),
        CircleSpec::new((0.0, 0.0), 1.0, 4, PointColor::default()).unwrap(),
        CircleSpec::new((3.0, 5.0), 2.0, 1, PointColor::from_rgb(0, 128, 0)).unwrap(),
        CircleSpec::new((-250.0, 1e4), 0.01, 100, PointColor::from_rgb(10, 20, 30)).unwrap(),
    ];

    for spec in &specs {
        let chart = build_chart(spec);
        let document =
            PdfExporter::export(&chart, spec, &AuthorInfo::default()).expect("export succeeds");

        assert_eq!(document.page_count(), REPORT_PAGES);
        assert_eq!(page_count(document.as_bytes()), 2, "spec {:?}", spec);
    }
}

#[test]
fn reader_yields_whole_document() {
    let spec = CircleSpec::default();
    let chart = build_chart(&spec);
    let document = PdfExporter::export(&chart, &spec, &AuthorInfo::new("Jane Doe", ""))
        .expect("export succeeds");
    let expected = document.as_bytes().to_vec();

    let mut read_back = Vec::new();
    document
        .into_reader()
        .read_to_end(&mut read_back)
        .expect("in-memory read");

    assert_eq!(read_back, expected);
    assert_eq!(page_count(&read_back), 2);
}

#[test]
fn export_is_tied_to_displayed_chart() {
    let displayed = CircleSpec::default();
    let chart = build_chart(&displayed);
    let edited = CircleSpec {
        point_count: 9,
        ..displayed.clone()
    };

    let err = PdfExporter::export(&chart, &edited, &AuthorInfo::default()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidParameter(_)));

    let author = AuthorInfo::default();
    assert_eq!(
        ParameterSummary::from_chart(&chart, &author),
        ParameterSummary::new(&displayed, &author)
    );
}

fn summary_page_text(bytes: &[u8]) -> String {
    let doc = lopdf::Document::load_mem(bytes).expect("exported PDF parses");
    doc.extract_text(&[1]).expect("page 1 has text")
}

#[test]
fn summary_page_states_the_exported_parameters() {
    let spec = CircleSpec::new((1.234, -5.0), 2.5, 7, PointColor::from_rgb(0, 128, 255)).unwrap();
    let chart = build_chart(&spec);
    let author = AuthorInfo::new("Jane Doe", "jane@example.org");
    let document = PdfExporter::export(&chart, &spec, &author).expect("export succeeds");

    let text = summary_page_text(document.as_bytes());
    for expected in [
        "Task parameters:",
        "Center: [1.23, -5.00] m",
        "Radius: 2.50 m",
        "Number of points: 7",
        "Point color: #0080FF",
        "Author: Jane Doe",
        "Email: jane@example.org",
    ] {
        assert!(text.contains(expected), "missing {:?} in {:?}", expected, text);
    }
    for line in ParameterSummary::new(&spec, &author).lines() {
        assert!(text.contains(line.as_str()), "missing {:?} in {:?}", line, text);
    }
}

#[test]
fn author_the_pdf_font_cannot_show_is_refused() {
    let spec = CircleSpec::default();
    let chart = build_chart(&spec);
    let author = AuthorInfo::new("Markéta Řezníčková", "");

    let err = PdfExporter::export(&chart, &spec, &author).unwrap_err();
    assert!(matches!(err, ExportError::InvalidParameter(_)));
}

#[test]
fn download_metadata() {
    assert_eq!(EXPORT_MIME, "application/pdf");
    assert!(EXPORT_FILE_NAME.ends_with(".pdf"));
}
