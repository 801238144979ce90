//! The page-filling engine: a single forward pass over the document,
//! placing blocks onto pages with a cursor that only ever moves down.
//!
//! Page filling is an explicit state machine so the break/split policy is
//! auditable: `FillingPage` while content is being placed, `PageFull` at
//! the moment a unit does not fit and a fresh page is opened, and
//! `RowSplitPending` while a table row's remainder is carried across
//! pages. Once a page is closed it is never revisited.

use crate::config::{PageConfig, PageGeometry};
use crate::fonts::FontCatalog;
use crate::output::{
    BoxContent, LaidOutDocument, LayoutBox, LayoutWarning, PageDescriptor, WarningKind,
};
use crate::table::{self, CellFlow, RelBox};
use crate::text::{self, FlowLine, FlowRun};
use crate::{LayoutError, EPSILON};
use std::sync::Arc;
use texprinter_doc::{Document, DocumentNode, NodeKind};
use texprinter_style::{ResolvedStyle, StyleSet};
use texprinter_types::NodeId;

/// Extra spacing placed before a heading unless it opens a fresh page.
const HEADING_SPACING: f32 = 12.0;
/// Horizontal indent added per list nesting level.
const LIST_INDENT: f32 = 18.0;
/// Offset from a list item's marker to its content.
pub(crate) const MARKER_COLUMN: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillState {
    FillingPage,
    PageFull,
    RowSplitPending,
}

/// Lays the document out into pages.
///
/// `styles` must have been resolved for exactly this document; the page
/// configuration is validated here. A valid document always produces at
/// least one page.
pub fn layout_document(
    doc: &Document,
    styles: &StyleSet,
    config: &PageConfig,
) -> Result<LaidOutDocument, LayoutError> {
    let geometry = config.resolve()?;
    debug_assert_eq!(styles.len(), doc.len(), "style set does not match document");

    let mut engine = Engine::new(styles, geometry);
    let mut next_id = 0usize;
    for block in doc.blocks() {
        let id = NodeId::new(next_id);
        next_id += block.subtree_len();
        engine.block(block, id, 0.0);
    }
    Ok(engine.finish())
}

struct Engine<'a> {
    styles: &'a StyleSet,
    geometry: PageGeometry,
    pages: Vec<PageDescriptor>,
    /// Vertical cursor relative to the content origin of the open page.
    cursor: f32,
    warnings: Vec<LayoutWarning>,
    state: FillState,
}

impl<'a> Engine<'a> {
    fn new(styles: &'a StyleSet, geometry: PageGeometry) -> Self {
        let first = PageDescriptor {
            index: 0,
            width: geometry.width,
            height: geometry.height,
            margins: geometry.margins,
            boxes: Vec::new(),
        };
        Self {
            styles,
            geometry,
            pages: vec![first],
            cursor: 0.0,
            warnings: Vec::new(),
            state: FillState::FillingPage,
        }
    }

    fn finish(self) -> LaidOutDocument {
        debug_assert_eq!(self.state, FillState::FillingPage);
        log::info!(
            "layout finished: {} pages, {} warnings",
            self.pages.len(),
            self.warnings.len()
        );
        LaidOutDocument {
            pages: self.pages,
            warnings: self.warnings,
        }
    }

    // --- Page state ---

    fn available(&self) -> f32 {
        (self.geometry.usable_height() - self.cursor).max(0.0)
    }

    fn fits(&self, height: f32) -> bool {
        height <= self.available() + EPSILON
    }

    fn at_page_top(&self) -> bool {
        self.cursor <= EPSILON
    }

    /// Closes the current page and opens a fresh one with a reset cursor.
    fn break_page(&mut self) {
        if self.state == FillState::FillingPage {
            self.state = FillState::PageFull;
        }
        let index = self.pages.len();
        log::debug!("page {} closed at cursor {:.2}", index - 1, self.cursor);
        self.pages.push(PageDescriptor {
            index,
            width: self.geometry.width,
            height: self.geometry.height,
            margins: self.geometry.margins,
            boxes: Vec::new(),
        });
        self.cursor = 0.0;
        if self.state == FillState::PageFull {
            self.state = FillState::FillingPage;
        }
    }

    fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Places a relative box at `dx` from the content origin and `dy` from
    /// the content top of the open page.
    fn push_rel(&mut self, rel: RelBox, dx: f32, dy: f32) {
        let page = self.pages.len() - 1;
        let layout_box = LayoutBox {
            page,
            x: self.geometry.margins.left + dx + rel.x,
            y: self.geometry.margins.top + dy + rel.y,
            width: rel.width,
            height: rel.height,
            style: rel.style,
            node: rel.node,
            content: rel.content,
        };
        if let Some(open) = self.pages.last_mut() {
            open.boxes.push(layout_box);
        }
    }

    fn warn(&mut self, node: NodeId, kind: WarningKind) {
        log::warn!("{}", LayoutWarning { node, kind: kind.clone() });
        self.warnings.push(LayoutWarning { node, kind });
    }

    // --- Block dispatch ---

    fn block(&mut self, node: &DocumentNode, id: NodeId, indent: f32) {
        match node.kind() {
            NodeKind::Heading(_) => self.text_block(node, id, indent, true),
            NodeKind::Paragraph | NodeKind::InlineRun => self.text_block(node, id, indent, false),
            NodeKind::CodeBlock => self.code_block(node, id, indent),
            NodeKind::List => self.list(node, id, indent),
            NodeKind::ListItem => self.list_item(node, id, indent, "\u{2022}"),
            NodeKind::Table => self.table(node, id, indent),
            // Validation rejects these outside tables; lay their children
            // out as plain blocks rather than dropping content.
            NodeKind::TableRow | NodeKind::TableCell => {
                let mut child_id = id.index() + 1;
                for child in node.children() {
                    self.block(child, NodeId::new(child_id), indent);
                    child_id += child.subtree_len();
                }
            }
        }
    }

    // --- Text-bearing blocks ---

    fn text_block(&mut self, node: &DocumentNode, id: NodeId, indent: f32, heading: bool) {
        let style = self.styles.get(id).clone();
        if heading && !self.at_page_top() {
            self.advance(HEADING_SPACING);
        }

        let width = (self.geometry.content_width() - indent - style.margin.horizontal()).max(1.0);
        let runs = text::collect_runs(node, id, self.styles);
        let (lines, overflows) = text::flow_runs(&runs, width);
        for (run_node, needed) in overflows {
            self.warn(
                run_node,
                WarningKind::HorizontalOverflow {
                    needed,
                    available: width,
                },
            );
        }
        self.place_text_block(&style, id, indent, width, &runs, &lines);
    }

    fn code_block(&mut self, node: &DocumentNode, id: NodeId, indent: f32) {
        let style = self.styles.get(id).clone();
        let width = (self.geometry.content_width() - indent - style.margin.horizontal()).max(1.0);
        let mut overflow_warnings = Vec::new();
        let (runs, lines) = table::code_lines(node, id, &style, width, &mut overflow_warnings);
        for warning in overflow_warnings {
            self.warn(warning.node, warning.kind);
        }
        self.place_text_block(&style, id, indent, width, &runs, &lines);
    }

    /// Places a block of flowed lines, splitting it across pages at line
    /// boundaries. Decoration (background/border) repeats per fragment.
    fn place_text_block(
        &mut self,
        style: &Arc<ResolvedStyle>,
        id: NodeId,
        indent: f32,
        width: f32,
        runs: &[FlowRun],
        lines: &[FlowLine],
    ) {
        self.advance(style.margin.top);

        let mut lines = lines;
        if lines.is_empty() {
            if style.has_decoration() {
                // A decorated empty block (e.g. a separator rule) occupies
                // one line of space.
                if !self.fits(style.line_height) && !self.at_page_top() {
                    self.break_page();
                }
                let frag_top = self.cursor;
                let mut rel = Vec::new();
                table::push_decoration(style, id, 0.0, 0.0, width, style.line_height, &mut rel);
                for b in rel {
                    self.push_rel(b, indent + style.margin.left, frag_top);
                }
                self.advance(style.line_height);
            }
            self.advance(style.margin.bottom);
            return;
        }

        while !lines.is_empty() {
            if !self.fits(lines[0].height) && !self.at_page_top() {
                self.break_page();
            }

            // Take as many whole lines as fit; always at least one so a
            // line taller than the page still makes progress.
            let mut taken = 0;
            let mut height = 0.0f32;
            for line in lines {
                if taken > 0 && !self.fits(height + line.height) {
                    break;
                }
                height += line.height;
                taken += 1;
            }
            if taken == 1 && !self.fits(lines[0].height) {
                self.warn(
                    id,
                    WarningKind::VerticalOverflow {
                        needed: lines[0].height,
                        available: self.available(),
                    },
                );
            }

            let frag_top = self.cursor;
            let mut rel = Vec::new();
            table::push_decoration(style, id, 0.0, 0.0, width, height, &mut rel);
            let mut y = 0.0f32;
            for line in &lines[..taken] {
                table::emit_line(runs, line, 0.0, width, style.text_align, y, &mut rel);
                y += line.height;
            }
            for b in rel {
                self.push_rel(b, indent + style.margin.left, frag_top);
            }
            self.advance(height);

            lines = &lines[taken..];
            if !lines.is_empty() {
                self.break_page();
            }
        }

        self.advance(style.margin.bottom);
    }

    // --- Lists ---

    fn list(&mut self, node: &DocumentNode, id: NodeId, indent: f32) {
        let style = self.styles.get(id).clone();
        self.advance(style.margin.top);

        let ordered = node.attr("ordered") == Some("true");
        let mut ordinal = 1usize;
        let mut child_id = id.index() + 1;
        for child in node.children() {
            let cid = NodeId::new(child_id);
            child_id += child.subtree_len();
            if child.kind() == NodeKind::ListItem {
                let marker = if ordered {
                    let marker = format!("{}.", ordinal);
                    ordinal += 1;
                    marker
                } else {
                    "\u{2022}".to_string()
                };
                self.list_item(child, cid, indent + LIST_INDENT, &marker);
            } else {
                self.block(child, cid, indent + LIST_INDENT);
            }
        }
        self.advance(style.margin.bottom);
    }

    fn list_item(&mut self, item: &DocumentNode, id: NodeId, indent: f32, marker: &str) {
        let style = self.styles.get(id).clone();
        self.advance(style.margin.top);

        // Keep the marker with the first line of the item.
        if !self.fits(style.line_height) && !self.at_page_top() {
            self.break_page();
        }
        let face = FontCatalog::resolve_or_default(&style.font);
        let marker_box = RelBox {
            x: (indent - MARKER_COLUMN).max(0.0),
            y: 0.0,
            width: text::measure(marker, &style),
            height: style.line_height,
            style: style.clone(),
            node: id,
            content: BoxContent::Text {
                text: marker.to_string(),
                baseline: face.ascent(style.font.size),
            },
        };
        let marker_top = self.cursor;
        self.push_rel(marker_box, 0.0, marker_top);

        if item.text().is_some() {
            let width = (self.geometry.content_width() - indent - style.margin.horizontal()).max(1.0);
            let runs = text::collect_runs(item, id, self.styles);
            let (lines, overflows) = text::flow_runs(&runs, width);
            for (run_node, needed) in overflows {
                self.warn(
                    run_node,
                    WarningKind::HorizontalOverflow {
                        needed,
                        available: width,
                    },
                );
            }
            // The item's own margins were already applied around the marker.
            let bare = Arc::new(ResolvedStyle {
                margin: texprinter_style::Margins::default(),
                ..(*style).clone()
            });
            self.place_text_block(&bare, id, indent, width, &runs, &lines);
        } else {
            let mut child_id = id.index() + 1;
            for child in item.children() {
                self.block(child, NodeId::new(child_id), indent);
                child_id += child.subtree_len();
            }
        }
        self.advance(style.margin.bottom);
    }

    // --- Tables ---

    fn table(&mut self, node: &DocumentNode, id: NodeId, indent: f32) {
        let style = self.styles.get(id).clone();
        self.advance(style.margin.top);

        let rows = node.children();
        let columns = rows.iter().map(|r| r.children().len()).max().unwrap_or(0);
        if columns == 0 {
            self.advance(style.margin.bottom);
            return;
        }

        let available_width =
            (self.geometry.content_width() - indent - style.margin.horizontal()).max(1.0);
        let col_widths = table::solve_columns(available_width, columns, node.attr("weights"));
        let x_base = indent + style.margin.left;

        let mut row_id = id.index() + 1;
        for row in rows {
            let mut flows = Vec::with_capacity(row.children().len());
            let mut cell_id = row_id + 1;
            for (i, cell) in row.children().iter().enumerate() {
                let flow = table::cell_flow(
                    cell,
                    NodeId::new(cell_id),
                    col_widths[i],
                    self.styles,
                    &mut self.warnings,
                );
                cell_id += cell.subtree_len();
                flows.push(flow);
            }
            let row_node = NodeId::new(row_id);
            row_id += row.subtree_len();

            let row_height = flows
                .iter()
                .map(|f| f.height)
                .fold(0.0f32, f32::max)
                .max(1.0);

            if self.fits(row_height) {
                self.place_row(&flows, &col_widths, row_height, x_base);
            } else if row_height <= self.geometry.usable_height() + EPSILON {
                // The row is kept intact: it fits a fresh page.
                self.break_page();
                self.place_row(&flows, &col_widths, row_height, x_base);
            } else if flows.iter().all(|f| f.text_only) {
                self.split_row(row_node, flows, &col_widths, x_base);
            } else {
                // Non-text content dominates the height: forced break, no
                // splitting, visible overflow.
                self.break_page();
                self.warn(
                    row_node,
                    WarningKind::VerticalOverflow {
                        needed: row_height,
                        available: self.geometry.usable_height(),
                    },
                );
                self.place_row(&flows, &col_widths, row_height, x_base);
            }
        }
        self.advance(style.margin.bottom);
    }

    fn place_row(&mut self, flows: &[CellFlow], col_widths: &[f32], row_height: f32, x_base: f32) {
        let row_top = self.cursor;
        for rel in table::place_row(flows, col_widths, row_height) {
            self.push_rel(rel, x_base, row_top);
        }
        self.advance(row_height);
    }

    /// Splits an over-tall all-text row across pages at line boundaries.
    fn split_row(
        &mut self,
        row_node: NodeId,
        flows: Vec<CellFlow>,
        col_widths: &[f32],
        x_base: f32,
    ) {
        log::debug!("splitting row {} across pages", row_node);
        self.state = FillState::RowSplitPending;
        let mut remaining = flows;

        loop {
            match table::split_flows(&remaining, self.available()) {
                Some(split) => {
                    self.place_row(&split.fragment, col_widths, split.fragment_height, x_base);
                    if table::flows_empty(&split.remainder) {
                        break;
                    }
                    self.break_page();
                    self.state = FillState::RowSplitPending;
                    remaining = split.remainder;
                }
                None if self.at_page_top() => {
                    // Even an empty page cannot take the first line: place
                    // the remainder whole and let it overflow.
                    let height = remaining
                        .iter()
                        .map(|f| f.height)
                        .fold(0.0f32, f32::max)
                        .max(1.0);
                    self.warn(
                        row_node,
                        WarningKind::VerticalOverflow {
                            needed: height,
                            available: self.geometry.usable_height(),
                        },
                    );
                    self.place_row(&remaining, col_widths, height, x_base);
                    break;
                }
                None => self.break_page(),
            }
        }
        self.state = FillState::FillingPage;
    }
}
