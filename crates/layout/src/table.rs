//! Table layout: column solving, unpaginated cell flows, row assembly and
//! line-boundary row splitting.
//!
//! Cell content is flowed without height constraints into boxes positioned
//! relative to the cell origin; the engine then places whole rows (or row
//! fragments) onto pages.

use crate::fonts::FontCatalog;
use crate::output::{BoxContent, FillKind, LayoutWarning, WarningKind};
use crate::text::{self, FlowLine, FlowRun};
use crate::EPSILON;
use std::sync::Arc;
use texprinter_doc::{DocumentNode, NodeKind};
use texprinter_style::{ResolvedStyle, StyleSet, TextAlign};
use texprinter_types::NodeId;

/// A box positioned relative to an enclosing origin (cell or row top-left).
#[derive(Debug, Clone)]
pub(crate) struct RelBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: Arc<ResolvedStyle>,
    pub node: NodeId,
    pub content: BoxContent,
}

impl RelBox {
    fn shifted(mut self, dx: f32, dy: f32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }
}

/// The laid-out content of one table cell.
#[derive(Debug, Clone)]
pub(crate) struct CellFlow {
    pub node: NodeId,
    pub style: Arc<ResolvedStyle>,
    pub boxes: Vec<RelBox>,
    pub height: f32,
    /// True when every child is a text-bearing block; only such cells may
    /// be split at a line boundary.
    pub text_only: bool,
}

impl CellFlow {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Resolves column widths from the available width and an optional
/// whitespace-separated weight list (the table node's `weights` attribute).
/// Without weights, columns divide the width equally.
pub(crate) fn solve_columns(available: f32, columns: usize, weights: Option<&str>) -> Vec<f32> {
    if columns == 0 {
        return Vec::new();
    }
    let weights: Vec<f32> = match weights {
        Some(list) => {
            let mut parsed: Vec<f32> = list
                .split_whitespace()
                .map(|w| w.parse::<f32>().ok().filter(|v| *v > 0.0).unwrap_or(1.0))
                .collect();
            parsed.resize(columns, 1.0);
            parsed
        }
        None => vec![1.0; columns],
    };
    let total: f32 = weights.iter().take(columns).sum();
    weights
        .iter()
        .take(columns)
        .map(|w| available * w / total)
        .collect()
}

/// Flows a cell's content into relative boxes, unconstrained in height.
/// The cell's own margin acts as its inner inset.
pub(crate) fn cell_flow(
    cell: &DocumentNode,
    cell_id: NodeId,
    width: f32,
    styles: &StyleSet,
    warnings: &mut Vec<LayoutWarning>,
) -> CellFlow {
    let style = styles.get(cell_id).clone();
    let inset = style.margin;
    let inner_width = (width - inset.horizontal()).max(1.0);

    let mut boxes = Vec::new();
    let mut cursor = inset.top;
    let mut child_id = cell_id.index() + 1;
    for child in cell.children() {
        flow_block(
            child,
            NodeId::new(child_id),
            inner_width,
            inset.left,
            &mut cursor,
            &mut boxes,
            styles,
            warnings,
        );
        child_id += child.subtree_len();
    }
    cursor += inset.bottom;

    CellFlow {
        node: cell_id,
        style,
        boxes,
        height: cursor,
        text_only: cell.children().iter().all(DocumentNode::is_text_only),
    }
}

/// Lays one block of cell content into the flow.
#[allow(clippy::too_many_arguments)]
fn flow_block(
    node: &DocumentNode,
    id: NodeId,
    width: f32,
    x0: f32,
    cursor: &mut f32,
    boxes: &mut Vec<RelBox>,
    styles: &StyleSet,
    warnings: &mut Vec<LayoutWarning>,
) {
    match node.kind() {
        NodeKind::Heading(_) | NodeKind::Paragraph | NodeKind::InlineRun => {
            let style = styles.get(id).clone();
            let runs = text::collect_runs(node, id, styles);
            let inner = (width - style.margin.horizontal()).max(1.0);
            let (lines, overflows) = text::flow_runs(&runs, inner);
            for (run_node, needed) in overflows {
                warnings.push(LayoutWarning {
                    node: run_node,
                    kind: WarningKind::HorizontalOverflow {
                        needed,
                        available: inner,
                    },
                });
            }
            emit_text_block(&style, id, &runs, &lines, x0, width, cursor, boxes);
        }
        NodeKind::CodeBlock => {
            let style = styles.get(id).clone();
            let (runs, lines) = code_lines(node, id, &style, (width - style.margin.horizontal()).max(1.0), warnings);
            emit_text_block(&style, id, &runs, &lines, x0, width, cursor, boxes);
        }
        NodeKind::List => {
            let style = styles.get(id).clone();
            *cursor += style.margin.top;
            let ordered = node.attr("ordered") == Some("true");
            let mut ordinal = 1usize;
            let mut child_id = id.index() + 1;
            for child in node.children() {
                let cid = NodeId::new(child_id);
                child_id += child.subtree_len();
                if child.kind() == NodeKind::ListItem {
                    let marker = if ordered {
                        let m = format!("{}.", ordinal);
                        ordinal += 1;
                        m
                    } else {
                        "\u{2022}".to_string()
                    };
                    flow_list_item(child, cid, &marker, width, x0, cursor, boxes, styles, warnings);
                } else {
                    flow_block(child, cid, width, x0, cursor, boxes, styles, warnings);
                }
            }
            *cursor += style.margin.bottom;
        }
        NodeKind::ListItem => {
            flow_list_item(node, id, "\u{2022}", width, x0, cursor, boxes, styles, warnings);
        }
        NodeKind::Table => {
            flow_nested_table(node, id, width, x0, cursor, boxes, styles, warnings);
        }
        // Validated trees cannot place rows/cells here; flow their content
        // rather than dropping it if one slips through.
        NodeKind::TableRow | NodeKind::TableCell => {
            let mut child_id = id.index() + 1;
            for child in node.children() {
                flow_block(child, NodeId::new(child_id), width, x0, cursor, boxes, styles, warnings);
                child_id += child.subtree_len();
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn flow_list_item(
    item: &DocumentNode,
    id: NodeId,
    marker: &str,
    width: f32,
    x0: f32,
    cursor: &mut f32,
    boxes: &mut Vec<RelBox>,
    styles: &StyleSet,
    warnings: &mut Vec<LayoutWarning>,
) {
    let style = styles.get(id).clone();
    *cursor += style.margin.top;

    let face = FontCatalog::resolve_or_default(&style.font);
    boxes.push(RelBox {
        x: x0,
        y: *cursor,
        width: text::measure(marker, &style),
        height: style.line_height,
        style: style.clone(),
        node: id,
        content: BoxContent::Text {
            text: marker.to_string(),
            baseline: face.ascent(style.font.size),
        },
    });

    let indent = crate::engine::MARKER_COLUMN;
    let inner_width = (width - indent).max(1.0);
    if item.text().is_some() {
        // The item carries its own inline content.
        let runs = text::collect_runs(item, id, styles);
        let (lines, overflows) = text::flow_runs(&runs, inner_width);
        for (run_node, needed) in overflows {
            warnings.push(LayoutWarning {
                node: run_node,
                kind: WarningKind::HorizontalOverflow {
                    needed,
                    available: inner_width,
                },
            });
        }
        emit_lines(&runs, &lines, x0 + indent, inner_width, TextAlign::Left, cursor, boxes);
    } else {
        let mut child_id = id.index() + 1;
        for child in item.children() {
            flow_block(child, NodeId::new(child_id), inner_width, x0 + indent, cursor, boxes, styles, warnings);
            child_id += child.subtree_len();
        }
    }
    *cursor += style.margin.bottom;
}

/// A nested table inside a cell: columns are solved within the cell width
/// and rows are stacked without splitting (the enclosing row is atomic).
#[allow(clippy::too_many_arguments)]
fn flow_nested_table(
    table: &DocumentNode,
    id: NodeId,
    width: f32,
    x0: f32,
    cursor: &mut f32,
    boxes: &mut Vec<RelBox>,
    styles: &StyleSet,
    warnings: &mut Vec<LayoutWarning>,
) {
    let style = styles.get(id).clone();
    *cursor += style.margin.top;

    let rows: Vec<&DocumentNode> = table.children().iter().collect();
    let columns = rows.iter().map(|r| r.children().len()).max().unwrap_or(0);
    if columns == 0 {
        *cursor += style.margin.bottom;
        return;
    }
    let avail = (width - style.margin.horizontal()).max(1.0);
    let col_widths = solve_columns(avail, columns, table.attr("weights"));

    let mut row_id = id.index() + 1;
    for row in rows {
        let mut cell_id = row_id + 1;
        let mut flows = Vec::with_capacity(row.children().len());
        for (i, cell) in row.children().iter().enumerate() {
            let flow = cell_flow(cell, NodeId::new(cell_id), col_widths[i], styles, warnings);
            cell_id += cell.subtree_len();
            flows.push(flow);
        }
        let row_height = flows.iter().map(|f| f.height).fold(0.0f32, f32::max).max(1.0);
        for rel in place_row(&flows, &col_widths, row_height) {
            boxes.push(rel.shifted(x0 + style.margin.left, *cursor));
        }
        *cursor += row_height;
        row_id += row.subtree_len();
    }
    *cursor += style.margin.bottom;
}

/// Splits a code block into unwrapped lines, one per `\n` segment.
pub(crate) fn code_lines(
    node: &DocumentNode,
    id: NodeId,
    style: &Arc<ResolvedStyle>,
    width: f32,
    warnings: &mut Vec<LayoutWarning>,
) -> (Vec<FlowRun>, Vec<FlowLine>) {
    let runs = vec![FlowRun::new(
        node.text().unwrap_or_default(),
        style.clone(),
        id,
    )];
    let face = runs[0].face;
    let size = style.font.size;
    let mut lines = Vec::new();
    for segment in runs[0].text.split('\n') {
        let line_width = face.text_width(segment, size);
        if line_width > width + EPSILON {
            warnings.push(LayoutWarning {
                node: id,
                kind: WarningKind::HorizontalOverflow {
                    needed: line_width,
                    available: width,
                },
            });
        }
        lines.push(FlowLine {
            fragments: vec![crate::text::LineFragment {
                run: 0,
                text: segment.to_string(),
                x: 0.0,
                width: line_width,
            }],
            width: line_width,
            height: style.line_height,
            baseline: face.ascent(size),
        });
    }
    (runs, lines)
}

/// Emits a text block (fills first, then its lines) into a relative flow.
#[allow(clippy::too_many_arguments)]
pub(crate) fn emit_text_block(
    style: &Arc<ResolvedStyle>,
    node: NodeId,
    runs: &[FlowRun],
    lines: &[FlowLine],
    x0: f32,
    width: f32,
    cursor: &mut f32,
    boxes: &mut Vec<RelBox>,
) {
    *cursor += style.margin.top;
    let inner = (width - style.margin.horizontal()).max(1.0);
    let block_top = *cursor;

    let mut text_boxes = Vec::new();
    let mut y = block_top;
    if lines.is_empty() && style.has_decoration() {
        // A decorated empty block (e.g. a horizontal-rule paragraph) still
        // occupies one line of vertical space.
        y += style.line_height;
    }
    for line in lines {
        emit_line(runs, line, x0 + style.margin.left, inner, style.text_align, y, &mut text_boxes);
        y += line.height;
    }
    let height = y - block_top;

    push_decoration(style, node, x0 + style.margin.left, block_top, inner, height, boxes);
    boxes.extend(text_boxes);

    *cursor = block_top + height + style.margin.bottom;
}

/// Emits lines without block decoration handling (list item content).
fn emit_lines(
    runs: &[FlowRun],
    lines: &[FlowLine],
    x0: f32,
    width: f32,
    align: TextAlign,
    cursor: &mut f32,
    boxes: &mut Vec<RelBox>,
) {
    for line in lines {
        emit_line(runs, line, x0, width, align, *cursor, boxes);
        *cursor += line.height;
    }
}

pub(crate) fn emit_line(
    runs: &[FlowRun],
    line: &FlowLine,
    x0: f32,
    width: f32,
    align: TextAlign,
    y: f32,
    boxes: &mut Vec<RelBox>,
) {
    let free = (width - line.width).max(0.0);
    let shift = match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => free / 2.0,
        TextAlign::Right => free,
    };
    for fragment in &line.fragments {
        let run = &runs[fragment.run];
        boxes.push(RelBox {
            x: x0 + shift + fragment.x,
            y,
            width: fragment.width,
            height: line.height,
            style: run.style.clone(),
            node: run.node,
            content: BoxContent::Text {
                text: fragment.text.clone(),
                baseline: line.baseline,
            },
        });
    }
}

/// Pushes the decoration boxes (background, borders) of a block region.
pub(crate) fn push_decoration(
    style: &Arc<ResolvedStyle>,
    node: NodeId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    boxes: &mut Vec<RelBox>,
) {
    if height <= 0.0 {
        return;
    }
    let mut push = |kind: FillKind| {
        boxes.push(RelBox {
            x,
            y,
            width,
            height,
            style: style.clone(),
            node,
            content: BoxContent::Fill(kind),
        });
    };
    if style.background_color.is_some() {
        push(FillKind::Background);
    }
    if style.border.is_some() {
        push(FillKind::Border);
    }
    if style.border_bottom.is_some() {
        push(FillKind::BorderBottom);
    }
}

/// Assembles one row (or row fragment) from its cell flows: per cell the
/// decoration sized to the full row height, then the cell's content boxes.
/// Output is relative to the row's top-left corner.
pub(crate) fn place_row(flows: &[CellFlow], col_widths: &[f32], row_height: f32) -> Vec<RelBox> {
    let mut out = Vec::new();
    let mut x = 0.0f32;
    for (i, flow) in flows.iter().enumerate() {
        let width = col_widths.get(i).copied().unwrap_or(0.0);
        push_decoration(&flow.style, flow.node, x, 0.0, width, row_height, &mut out);
        for rel in &flow.boxes {
            out.push(rel.clone().shifted(x, 0.0));
        }
        x += width;
    }
    out
}

/// The outcome of cutting cell flows at an available height.
pub(crate) struct RowSplit {
    pub fragment: Vec<CellFlow>,
    pub remainder: Vec<CellFlow>,
    pub fragment_height: f32,
}

/// Cuts each flow at the last line boundary within `available`. Returns
/// `None` when not a single box fits, leaving the caller to either move to
/// a fresh page or accept vertical overflow.
pub(crate) fn split_flows(flows: &[CellFlow], available: f32) -> Option<RowSplit> {
    let mut fragment = Vec::with_capacity(flows.len());
    let mut remainder = Vec::with_capacity(flows.len());
    let mut fragment_height = 0.0f32;
    let mut any_taken = false;

    for flow in flows {
        let mut taken = Vec::new();
        let mut rest = Vec::new();
        for rel in &flow.boxes {
            if rel.y + rel.height <= available + EPSILON {
                taken.push(rel.clone());
            } else if matches!(rel.content, BoxContent::Fill(_)) && rel.y < available - EPSILON {
                // A decoration spanning the cut is divided at the boundary
                // so both fragments stay painted.
                let mut head = rel.clone();
                head.height = available - rel.y;
                taken.push(head);
                let mut tail = rel.clone();
                tail.height = rel.height - (available - rel.y);
                tail.y = available;
                rest.push(tail);
            } else {
                rest.push(rel.clone());
            }
        }
        // Where the remainder restarts: its highest box defines the shift
        // back to the fragment top of the next page.
        let shift = rest
            .iter()
            .map(|b| b.y)
            .fold(f32::INFINITY, f32::min)
            .min(flow.height);
        let taken_extent = taken
            .iter()
            .map(|b| b.y + b.height)
            .fold(0.0f32, f32::max);

        any_taken |= !taken.is_empty();
        fragment_height = fragment_height.max(taken_extent);

        fragment.push(CellFlow {
            node: flow.node,
            style: flow.style.clone(),
            boxes: taken,
            height: taken_extent,
            text_only: flow.text_only,
        });
        remainder.push(CellFlow {
            node: flow.node,
            style: flow.style.clone(),
            boxes: rest.into_iter().map(|b| b.shifted(0.0, -shift)).collect(),
            height: (flow.height - shift).max(0.0),
            text_only: flow.text_only,
        });
    }

    if !any_taken {
        return None;
    }
    // Cap the fragment at the page edge it was cut for.
    let fragment_height = fragment_height.min(available.max(0.0));
    Some(RowSplit {
        fragment,
        remainder,
        fragment_height,
    })
}

/// True when every remainder flow has been drained.
pub(crate) fn flows_empty(flows: &[CellFlow]) -> bool {
    flows.iter().all(CellFlow::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_division_by_default() {
        let widths = solve_columns(300.0, 3, None);
        assert_eq!(widths, vec![100.0, 100.0, 100.0]);
    }

    #[test]
    fn weighted_division() {
        let widths = solve_columns(400.0, 3, Some("2 1 1"));
        assert_eq!(widths, vec![200.0, 100.0, 100.0]);
    }

    #[test]
    fn malformed_weights_fall_back_to_one() {
        let widths = solve_columns(300.0, 3, Some("2 bogus"));
        // weights resolve to 2, 1, 1
        assert_eq!(widths, vec![150.0, 75.0, 75.0]);
    }

    #[test]
    fn zero_columns_yield_nothing() {
        assert!(solve_columns(300.0, 0, None).is_empty());
    }
}
