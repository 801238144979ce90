mod common;

use common::{simple_document, small_page};
use texprinter::{Document, DocumentNode, ExportError, Exporter, PageConfig};

#[test]
fn export_returns_a_pdf_with_at_least_one_page() {
    common::init_logging();
    let exporter = Exporter::new();
    let summary = exporter
        .export(&simple_document(), &[], &PageConfig::default())
        .unwrap();
    assert!(summary.page_count >= 1);
    assert!(summary.bytes.starts_with(b"%PDF-1.7"));
    assert!(summary.warnings.is_empty());
}

#[test]
fn empty_document_still_produces_one_page() {
    let exporter = Exporter::new();
    let summary = exporter
        .export(&Document::default(), &[], &PageConfig::default())
        .unwrap();
    assert_eq!(summary.page_count, 1);
    let parsed = lopdf::Document::load_mem(&summary.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 1);
}

#[test]
fn malformed_document_aborts_before_layout() {
    let doc = Document::new(vec![DocumentNode::table(vec![DocumentNode::paragraph(
        "not a row",
    )])]);
    let exporter = Exporter::new();
    let err = exporter
        .export(&doc, &[], &PageConfig::default())
        .unwrap_err();
    assert!(matches!(err, ExportError::MalformedDocument(_)));
    // The error names the offending node so the GUI can highlight it.
    assert_eq!(err.node().map(|n| n.index()), Some(1));
}

#[test]
fn invalid_page_config_is_rejected() {
    let config = PageConfig {
        page_height: Some(-10.0),
        ..Default::default()
    };
    let exporter = Exporter::new();
    let err = exporter
        .export(&simple_document(), &[], &config)
        .unwrap_err();
    assert!(matches!(err, ExportError::Layout(_)));
}

#[test]
fn overflow_is_a_warning_not_a_failure() {
    let doc = Document::new(vec![DocumentNode::paragraph(
        "anextraordinarilylongunbreakabletokenthatcannotpossiblyfitanyline",
    )]);
    let exporter = Exporter::new();
    let summary = exporter.export(&doc, &[], &small_page()).unwrap();
    assert!(!summary.warnings.is_empty());
    assert!(summary.page_count >= 1);
}

#[test]
fn page_content_grows_with_the_document() {
    let exporter = Exporter::new();
    let short = exporter
        .export(
            &Document::new(vec![DocumentNode::paragraph("one line")]),
            &[],
            &small_page(),
        )
        .unwrap();
    let long_text = "many words that will wrap across plenty of lines ".repeat(30);
    let long = exporter
        .export(
            &Document::new(vec![DocumentNode::paragraph(long_text.trim())]),
            &[],
            &small_page(),
        )
        .unwrap();
    assert!(long.page_count > short.page_count);
}

#[test]
fn concurrent_exports_do_not_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let doc = Document::new(vec![DocumentNode::paragraph(format!("doc {}", i))]);
                Exporter::new()
                    .export(&doc, &[], &PageConfig::default())
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        let summary = handle.join().unwrap();
        assert_eq!(summary.page_count, 1);
    }
}
