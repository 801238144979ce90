//! The layout engine: converts a validated document plus resolved styles
//! into a sequence of [`PageDescriptor`]s ready for serialization.
//!
//! Layout is a single forward pass. Once a page is closed it is never
//! reopened; oversized atomic content is placed with visible overflow and
//! recorded as a warning instead of failing the export.

use thiserror::Error;

pub mod config;
mod engine;
pub mod fonts;
pub mod output;
mod table;
mod text;

pub use config::{PageConfig, PageGeometry};
pub use engine::layout_document;
pub use fonts::{FontCatalog, FontFace};
pub use output::{
    BoxContent, FillKind, LaidOutDocument, LayoutBox, LayoutWarning, PageDescriptor, WarningKind,
};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("invalid page configuration: {0}")]
    Config(String),
}

/// Tolerance for floating point noise in fit checks.
pub(crate) const EPSILON: f32 = 0.01;
