//! The export coordinator: runs the pipeline stages in strict sequence,
//! aggregates non-fatal warnings, and publishes output atomically.

use crate::cancel::CancelToken;
use crate::error::ExportError;
use std::io::Write;
use std::path::Path;
use std::thread::{self, JoinHandle};
use texprinter_doc::Document;
use texprinter_layout::{layout_document, LayoutWarning, PageConfig};
use texprinter_render::render_pdf;
use texprinter_style::{resolve, StyleRule};

/// A successful export: the finished PDF bytes plus the run's summary.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub page_count: usize,
    /// Non-fatal layout warnings (overflowing content), each carrying the
    /// node it points at.
    pub warnings: Vec<LayoutWarning>,
    pub bytes: Vec<u8>,
}

/// The single entry point consumed by the GUI shell.
///
/// An `Exporter` holds nothing but its cancellation token: every call is
/// self-contained, so independent exports may run concurrently on separate
/// exporters without interference. The caller must not invoke [`export`] on
/// its interaction thread — use [`Exporter::spawn`] or its own worker.
///
/// [`export`]: Exporter::export
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    cancel: CancelToken,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token a caller can use to abort this exporter's in-flight run
    /// at the next stage boundary.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs validate → resolve → layout → serialize and returns the PDF
    /// bytes with the run summary. Layout overflow is reported as warnings
    /// on the summary, never as a failure.
    pub fn export(
        &self,
        document: &Document,
        rules: &[StyleRule],
        config: &PageConfig,
    ) -> Result<ExportSummary, ExportError> {
        self.checkpoint()?;
        document.validate()?;
        log::debug!("document validated ({} nodes)", document.len());

        self.checkpoint()?;
        let styles = resolve(document, rules);

        self.checkpoint()?;
        let laid_out = layout_document(document, &styles, config)?;
        let page_count = laid_out.pages.len();

        self.checkpoint()?;
        let bytes = render_pdf(&laid_out)?;

        self.checkpoint()?;
        log::info!(
            "export finished: {} pages, {} bytes, {} warnings",
            page_count,
            bytes.len(),
            laid_out.warnings.len()
        );
        Ok(ExportSummary {
            page_count,
            warnings: laid_out.warnings,
            bytes,
        })
    }

    /// Like [`Exporter::export`], but additionally publishes the PDF to
    /// `path` atomically: the bytes are written to a temporary file in the
    /// destination directory and only renamed onto the final path on full
    /// success. No partial file is ever left behind on failure or
    /// cancellation.
    pub fn export_to_file(
        &self,
        document: &Document,
        rules: &[StyleRule],
        config: &PageConfig,
        path: &Path,
    ) -> Result<ExportSummary, ExportError> {
        let summary = self.export(document, rules, config)?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut temp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new()?,
        };
        temp.write_all(&summary.bytes)?;
        temp.flush()?;

        // Final cancellation check before the file becomes visible.
        if self.cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        temp.persist(path).map_err(|e| ExportError::Io(e.error))?;
        log::info!("published {}", path.display());
        Ok(summary)
    }

    /// Runs one export on a dedicated background worker thread and hands
    /// back the join handle together with the cancellation token. The
    /// GUI's event thread stays free to keep handling interaction.
    pub fn spawn(
        document: Document,
        rules: Vec<StyleRule>,
        config: PageConfig,
        path: std::path::PathBuf,
    ) -> (JoinHandle<Result<ExportSummary, ExportError>>, CancelToken) {
        let exporter = Exporter::new();
        let token = exporter.cancel_token();
        let handle = thread::spawn(move || {
            exporter.export_to_file(&document, &rules, &config, &path)
        });
        (handle, token)
    }

    /// The stage-boundary cancellation point.
    fn checkpoint(&self) -> Result<(), ExportError> {
        if self.cancel.is_cancelled() {
            log::info!("export cancelled at stage boundary");
            return Err(ExportError::Cancelled);
        }
        Ok(())
    }
}
