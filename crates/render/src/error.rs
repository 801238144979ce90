use texprinter_types::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// A layout box references a font family that cannot be mapped onto an
    /// embeddable base face. Fatal for the whole export: a valid PDF needs
    /// a complete font resource graph.
    #[error("font family '{family}' used by node {node} has no embeddable base face")]
    UnsupportedFont { family: String, node: NodeId },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal PDF library error: {0}")]
    Pdf(#[from] lopdf::Error),
}

impl RenderError {
    /// The offending node, when the error points at one.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            RenderError::UnsupportedFont { node, .. } => Some(*node),
            _ => None,
        }
    }
}
