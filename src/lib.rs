//! # texprinter
//!
//! The document rendering and export pipeline behind the texprinter GUI:
//! takes a parsed content tree, resolves styles, computes paginated layout
//! and serializes a PDF — synchronously, deterministically and without
//! global state.
//!
//! The pipeline runs four stages in strict sequence:
//!
//! 1. **Document model** ([`texprinter_doc`]): structural validation of the
//!    input tree.
//! 2. **Style resolver** ([`texprinter_style`]): cascading rule resolution
//!    into one immutable style per node.
//! 3. **Layout engine** ([`texprinter_layout`]): line breaking, pagination
//!    and table splitting into page descriptors.
//! 4. **PDF serializer** ([`texprinter_render`]): page descriptors to a PDF
//!    byte stream.
//!
//! [`Exporter`] is the single entry point consumed by the GUI shell. Every
//! export call is self-contained and independently re-entrant; the caller
//! owns frozen snapshots of the document, rules and page configuration for
//! the duration of the call, and must dispatch off its interaction thread
//! (see [`Exporter::spawn`]).

// Re-export pipeline crates
pub use texprinter_doc as doc;
pub use texprinter_layout as layout;
pub use texprinter_render as render;
pub use texprinter_style as style;
pub use texprinter_types as types;

mod cancel;
mod error;
mod export;
pub mod report;
pub mod settings;

pub use cancel::CancelToken;
pub use error::ExportError;
pub use export::{ExportSummary, Exporter};

// Re-export the types the GUI shell needs to drive an export.
pub use texprinter_doc::{Document, DocumentNode, NodeKind};
pub use texprinter_layout::{LayoutWarning, PageConfig};
pub use texprinter_style::{StyleProps, StyleRule};
pub use texprinter_types::NodeId;
