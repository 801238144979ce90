//! Layout output: positioned boxes, page descriptors and non-fatal
//! warnings. Boxes are created during layout, consumed once by the
//! serializer, and never mutated in between.

use std::fmt;
use std::sync::Arc;
use texprinter_style::{Margins, ResolvedStyle};
use texprinter_types::{NodeId, Rect, Size};

/// What a layout box paints.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxContent {
    /// One shaped line fragment. `baseline` is the offset from the box top
    /// at which the text baseline sits; fragments sharing a line share it.
    Text { text: String, baseline: f32 },
    /// A decorative fill painted under the text of the same region.
    Fill(FillKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Background,
    /// Stroked rectangle along the box edges.
    Border,
    /// A single rule along the bottom edge of the box.
    BorderBottom,
}

/// A positioned, sized rectangle on one output page.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// Zero-based index of the page this box belongs to.
    pub page: usize,
    /// Top-left origin in layout space (y grows downwards).
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: Arc<ResolvedStyle>,
    /// The document node this box was produced from.
    pub node: NodeId,
    pub content: BoxContent,
}

impl LayoutBox {
    pub fn is_fill(&self) -> bool {
        matches!(self.content, BoxContent::Fill(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, BoxContent::Text { .. })
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The ordered content of one output page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub index: usize,
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub boxes: Vec<LayoutBox>,
}

impl PageDescriptor {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A non-fatal layout diagnostic. Overflowing content is rendered anyway;
/// the coordinator reports these alongside a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutWarning {
    pub node: NodeId,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// Content wider than the available line width; placed and allowed to
    /// extend past the right margin.
    HorizontalOverflow { needed: f32, available: f32 },
    /// An atomic unit taller than a page's usable height; placed and
    /// allowed to extend past the bottom margin.
    VerticalOverflow { needed: f32, available: f32 },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::HorizontalOverflow { needed, available } => write!(
                f,
                "node {} overflows horizontally: needs {:.2}pt, {:.2}pt available",
                self.node, needed, available
            ),
            WarningKind::VerticalOverflow { needed, available } => write!(
                f,
                "node {} overflows vertically: needs {:.2}pt, {:.2}pt available",
                self.node, needed, available
            ),
        }
    }
}

/// The layout stage's terminal value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<PageDescriptor>,
    pub warnings: Vec<LayoutWarning>,
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self {
            index: 0,
            width: 0.0,
            height: 0.0,
            margins: Margins::default(),
            boxes: Vec::new(),
        }
    }
}
