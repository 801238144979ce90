//! Cascade resolution: one depth-first pass over the document producing a
//! [`ResolvedStyle`] per node, indexed by [`NodeId`].

use crate::props::StyleProps;
use crate::resolved::{FontDesc, ResolvedStyle};
use crate::rule::StyleRule;
use std::sync::Arc;
use texprinter_doc::{Document, DocumentNode, NodeKind};
use texprinter_types::NodeId;

/// The resolver's output: an `Arc<ResolvedStyle>` per node in pre-order.
#[derive(Debug, Clone, Default)]
pub struct StyleSet {
    styles: Vec<Arc<ResolvedStyle>>,
}

impl StyleSet {
    pub fn get(&self, id: NodeId) -> &Arc<ResolvedStyle> {
        &self.styles[id.index()]
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Resolves the style of every node in the document.
///
/// For each node, resolution starts from the inherited portion of the
/// parent's style (font descriptor, line height, color, alignment), applies
/// every matching rule in declaration order, and freezes the result. Box
/// properties (margin, border, background) never inherit. The document is
/// never mutated.
pub fn resolve(doc: &Document, rules: &[StyleRule]) -> StyleSet {
    let root = Arc::new(ResolvedStyle::default());
    let mut styles = Vec::with_capacity(doc.len());
    let mut ancestors: Vec<NodeKind> = Vec::new();

    for block in doc.blocks() {
        resolve_node(block, &root, rules, &mut ancestors, &mut styles);
    }
    log::debug!(
        "resolved {} node styles against {} rules",
        styles.len(),
        rules.len()
    );
    StyleSet { styles }
}

fn resolve_node(
    node: &DocumentNode,
    parent: &Arc<ResolvedStyle>,
    rules: &[StyleRule],
    ancestors: &mut Vec<NodeKind>,
    out: &mut Vec<Arc<ResolvedStyle>>,
) {
    let mut merged = StyleProps::default();
    for rule in rules {
        if rule.selector.matches(node.kind(), ancestors, node.class()) {
            merged.apply(&rule.props);
        }
    }

    let resolved = if merged.is_empty() {
        inherit_only(parent)
    } else {
        compute(&merged, parent)
    };

    out.push(resolved.clone());

    ancestors.push(node.kind());
    for child in node.children() {
        resolve_node(child, &resolved, rules, ancestors, out);
    }
    ancestors.pop();
}

/// Fast path for nodes no rule matches: carry the inherited properties and
/// reset the box model.
fn inherit_only(parent: &Arc<ResolvedStyle>) -> Arc<ResolvedStyle> {
    Arc::new(ResolvedStyle {
        font: parent.font.clone(),
        line_height: parent.line_height,
        text_align: parent.text_align,
        color: parent.color,
        ..ResolvedStyle::default()
    })
}

fn compute(merged: &StyleProps, parent: &Arc<ResolvedStyle>) -> Arc<ResolvedStyle> {
    let size = merged.font_size.unwrap_or(parent.font.size);
    Arc::new(ResolvedStyle {
        font: FontDesc {
            family: merged
                .font_family
                .as_deref()
                .map(Arc::from)
                .unwrap_or_else(|| parent.font.family.clone()),
            size,
            weight: merged.font_weight.unwrap_or(parent.font.weight),
            style: merged.font_style.unwrap_or(parent.font.style),
        },
        // An explicit line height wins; otherwise a changed font size
        // re-derives it, and an unchanged one inherits the parent's.
        line_height: merged.line_height.unwrap_or_else(|| {
            merged
                .font_size
                .map(|fs| fs * 1.2)
                .unwrap_or(parent.line_height)
        }),
        text_align: merged.text_align.unwrap_or(parent.text_align),
        color: merged.color.unwrap_or(parent.color),
        // Non-inherited properties come from the merged rules alone.
        background_color: merged.background_color,
        margin: merged.margin.unwrap_or_default(),
        border: merged.border,
        border_bottom: merged.border_bottom,
    })
}
