use std::collections::HashMap;

/// Attribute mapping attached to a node. Recognized keys:
/// `language` (code blocks), `weights` (table column weighting),
/// `ordered` (lists), `class` (class-like style selector tag).
pub type Attrs = HashMap<String, String>;

/// The closed set of content kinds.
///
/// Kept as a tagged enum rather than open subtype dispatch: the kind set is
/// fixed and exhaustive matches catch missing cases at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A heading with level 1..=6.
    Heading(u8),
    Paragraph,
    /// An inline text run inside a paragraph-level block.
    InlineRun,
    /// Preformatted text; laid out line-per-line without re-wrapping.
    CodeBlock,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Heading(_) => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::InlineRun => "inline-run",
            NodeKind::CodeBlock => "code-block",
            NodeKind::List => "list",
            NodeKind::ListItem => "list-item",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table-row",
            NodeKind::TableCell => "table-cell",
        }
    }

    /// True for kinds whose inline text participates in line flow.
    pub fn is_text_bearing(&self) -> bool {
        matches!(
            self,
            NodeKind::Heading(_) | NodeKind::Paragraph | NodeKind::InlineRun | NodeKind::CodeBlock
        )
    }
}

/// A node in the content tree: a kind, ordered children, optional inline
/// text content (for leaf-ish nodes) and an attribute map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentNode {
    kind: NodeKind,
    children: Vec<DocumentNode>,
    text: Option<String>,
    attrs: Attrs,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Paragraph
    }
}

impl DocumentNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            text: None,
            attrs: Attrs::new(),
        }
    }

    // --- Constructors ---

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Heading(level)).with_text(text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph).with_text(text)
    }

    pub fn inline_run(text: impl Into<String>) -> Self {
        Self::new(NodeKind::InlineRun).with_text(text)
    }

    pub fn code_block(text: impl Into<String>) -> Self {
        Self::new(NodeKind::CodeBlock).with_text(text)
    }

    pub fn list(items: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::List).with_children(items)
    }

    pub fn ordered_list(items: Vec<DocumentNode>) -> Self {
        Self::list(items).with_attr("ordered", "true")
    }

    pub fn list_item(children: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::ListItem).with_children(children)
    }

    pub fn table(rows: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::Table).with_children(rows)
    }

    pub fn table_row(cells: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::TableRow).with_children(cells)
    }

    pub fn table_cell(children: Vec<DocumentNode>) -> Self {
        Self::new(NodeKind::TableCell).with_children(children)
    }

    // --- Builder-style modifiers ---

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<DocumentNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Tags the node for class-based style selectors.
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    // --- Accessors ---

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    /// Number of nodes in this subtree, including the node itself.
    ///
    /// Pre-order ids are contiguous per subtree, so a sibling's id is the
    /// previous sibling's id plus its subtree length.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DocumentNode::subtree_len)
            .sum::<usize>()
    }

    /// True when the whole subtree consists of text-bearing kinds only;
    /// the layout engine uses this to decide whether a table row may be
    /// split at a line boundary.
    pub fn is_text_only(&self) -> bool {
        self.kind.is_text_bearing() && self.children.iter().all(DocumentNode::is_text_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtree_len_counts_self_and_descendants() {
        let table = DocumentNode::table(vec![DocumentNode::table_row(vec![
            DocumentNode::table_cell(vec![DocumentNode::paragraph("a")]),
            DocumentNode::table_cell(vec![DocumentNode::paragraph("b")]),
        ])]);
        // table + row + 2 * (cell + paragraph)
        assert_eq!(table.subtree_len(), 6);
    }

    #[test]
    fn text_only_rejects_nested_structure() {
        let cell = DocumentNode::table_cell(vec![DocumentNode::paragraph("plain")]);
        assert!(!cell.is_text_only()); // cells themselves are structural
        assert!(cell.children()[0].is_text_only());

        let with_list = DocumentNode::paragraph("x")
            .with_child(DocumentNode::list(vec![DocumentNode::list_item(vec![])]));
        assert!(!with_list.is_text_only());
    }

    #[test]
    fn class_attr_round_trips() {
        let node = DocumentNode::paragraph("meta").with_class("post-meta");
        assert_eq!(node.class(), Some("post-meta"));
        assert_eq!(node.attr("missing"), None);
    }
}
