mod common;

use common::simple_document;
use texprinter::report::default_rules;
use texprinter::{Exporter, PageConfig};

#[test]
fn repeated_export_is_byte_identical() {
    let doc = simple_document();
    let rules = default_rules();
    let config = PageConfig::default();

    let exporter = Exporter::new();
    let first = exporter.export(&doc, &rules, &config).unwrap();
    let second = exporter.export(&doc, &rules, &config).unwrap();
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.page_count, second.page_count);
}

#[test]
fn separate_exporters_agree_bit_for_bit() {
    let doc = simple_document();
    let first = Exporter::new()
        .export(&doc, &default_rules(), &PageConfig::default())
        .unwrap();
    let second = Exporter::new()
        .export(&doc, &default_rules(), &PageConfig::default())
        .unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn one_font_object_per_distinct_face() {
    // 100 paragraphs in one face across several pages.
    let blocks: Vec<_> = (0..100)
        .map(|i| texprinter::DocumentNode::paragraph(format!("repeated line number {}", i)))
        .collect();
    let doc = texprinter::Document::new(blocks);
    let summary = Exporter::new()
        .export(&doc, &[], &PageConfig::default())
        .unwrap();
    assert!(summary.page_count > 1);

    let parsed = lopdf::Document::load_mem(&summary.bytes).unwrap();
    let font_objects = parsed
        .objects
        .values()
        .filter(|obj| obj.as_dict().map(|d| d.has(b"BaseFont")).unwrap_or(false))
        .count();
    assert_eq!(font_objects, 1, "the single face must be embedded once");

    // ...while every page references the shared resources.
    assert_eq!(parsed.get_pages().len(), summary.page_count);
}

#[test]
fn styled_report_uses_multiple_deduplicated_faces() {
    let doc = common::sample_thread().to_document();
    let summary = Exporter::new()
        .export(&doc, &default_rules(), &PageConfig::default())
        .unwrap();

    let parsed = lopdf::Document::load_mem(&summary.bytes).unwrap();
    let mut base_fonts: Vec<String> = parsed
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .filter_map(|dict| dict.get(b"BaseFont").ok())
        .filter_map(|name| name.as_name().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
        .collect();
    base_fonts.sort();
    let deduped: std::collections::BTreeSet<_> = base_fonts.iter().cloned().collect();
    assert_eq!(
        base_fonts.len(),
        deduped.len(),
        "no face may be embedded twice"
    );
    // The default rules pull in serif body, bold sans headings and courier.
    assert!(deduped.iter().any(|f| f.contains("Times")));
    assert!(deduped.iter().any(|f| f.contains("Helvetica-Bold")));
    assert!(deduped.iter().any(|f| f.contains("Courier")));
}
