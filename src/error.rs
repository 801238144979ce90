//! The unified error taxonomy of the export pipeline.

use texprinter_doc::DocError;
use texprinter_layout::LayoutError;
use texprinter_render::RenderError;
use texprinter_types::NodeId;
use thiserror::Error;

/// A failed export. Fatal stage errors abort the remaining stages; the
/// caller receives enough context ([`ExportError::node`]) to highlight the
/// offending content.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A structural invariant of the input tree is violated. Raised before
    /// any layout work happens.
    #[error(transparent)]
    MalformedDocument(#[from] DocError),
    /// Invalid page configuration.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The laid-out document cannot be encoded into a valid PDF.
    #[error("serialization failed: {0}")]
    Serialization(#[from] RenderError),
    /// The caller requested cancellation; no output was produced.
    #[error("export cancelled")]
    Cancelled,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// The node the failure points at, when one is known.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            ExportError::MalformedDocument(err) => Some(err.node()),
            ExportError::Serialization(err) => err.node(),
            _ => None,
        }
    }

    /// True for the caller-requested abort outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExportError::Cancelled)
    }
}
