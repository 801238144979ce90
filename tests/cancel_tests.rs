mod common;

use common::simple_document;
use texprinter::{Document, DocumentNode, ExportError, Exporter, PageConfig};

#[test]
fn cancelled_export_returns_cancelled_and_nothing_else() {
    common::init_logging();
    let exporter = Exporter::new();
    exporter.cancel_token().cancel();
    let err = exporter
        .export(&simple_document(), &[], &PageConfig::default())
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(err.node().is_none());
}

#[test]
fn cancelled_file_export_leaves_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.pdf");

    let exporter = Exporter::new();
    exporter.cancel_token().cancel();
    let err = exporter
        .export_to_file(&simple_document(), &[], &PageConfig::default(), &target)
        .unwrap_err();
    assert!(matches!(err, ExportError::Cancelled));

    assert!(!target.exists());
    // No temporary file may remain either.
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[test]
fn failed_export_leaves_no_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.pdf");

    let malformed = Document::new(vec![DocumentNode::table_row(vec![])]);
    let err = Exporter::new()
        .export_to_file(&malformed, &[], &PageConfig::default(), &target)
        .unwrap_err();
    assert!(matches!(err, ExportError::MalformedDocument(_)));
    assert!(!target.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn successful_file_export_publishes_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("report.pdf");

    let summary = Exporter::new()
        .export_to_file(&simple_document(), &[], &PageConfig::default(), &target)
        .unwrap();
    assert!(target.exists());
    let on_disk = std::fs::read(&target).unwrap();
    assert_eq!(on_disk, summary.bytes);
    // Only the published file remains in the directory.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn spawned_export_runs_off_thread_and_is_cancellable() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("spawned.pdf");

    let (handle, _token) = Exporter::spawn(
        simple_document(),
        vec![],
        PageConfig::default(),
        target.clone(),
    );
    let summary = handle.join().unwrap().unwrap();
    assert!(summary.page_count >= 1);
    assert!(target.exists());

    // A token cancelled before the worker reaches the first stage boundary
    // aborts the run.
    let target2 = dir.path().join("never.pdf");
    let (handle, token) = Exporter::spawn(
        simple_document(),
        vec![],
        PageConfig::default(),
        target2.clone(),
    );
    token.cancel();
    let result = handle.join().unwrap();
    // The worker may have passed every checkpoint before the cancel landed;
    // either way the outcome is consistent with the file state.
    match result {
        Ok(_) => assert!(target2.exists()),
        Err(err) => {
            assert!(err.is_cancelled());
            assert!(!target2.exists());
        }
    }
}
