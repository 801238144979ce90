use crate::props::StyleProps;
use serde::{Deserialize, Serialize};
use texprinter_doc::NodeKind;

/// Matches a node by kind. `Heading` matches any heading level;
/// `HeadingLevel` pins one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum KindMatch {
    Heading,
    HeadingLevel(u8),
    Paragraph,
    InlineRun,
    CodeBlock,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
}

impl KindMatch {
    pub fn matches(&self, kind: NodeKind) -> bool {
        match (self, kind) {
            (KindMatch::Heading, NodeKind::Heading(_)) => true,
            (KindMatch::HeadingLevel(level), NodeKind::Heading(l)) => *level == l,
            (KindMatch::Paragraph, NodeKind::Paragraph) => true,
            (KindMatch::InlineRun, NodeKind::InlineRun) => true,
            (KindMatch::CodeBlock, NodeKind::CodeBlock) => true,
            (KindMatch::List, NodeKind::List) => true,
            (KindMatch::ListItem, NodeKind::ListItem) => true,
            (KindMatch::Table, NodeKind::Table) => true,
            (KindMatch::TableRow, NodeKind::TableRow) => true,
            (KindMatch::TableCell, NodeKind::TableCell) => true,
            _ => false,
        }
    }
}

/// A rule selector: node kind, optional required ancestor kind, optional
/// class-like tag. All present parts must match.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor: Option<KindMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl Selector {
    pub fn kind(kind: KindMatch) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Default::default()
        }
    }

    /// Restricts the selector to nodes with a matching ancestor.
    pub fn within(mut self, ancestor: KindMatch) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// `ancestors` is ordered root-first and does not include the node
    /// itself.
    pub fn matches(&self, kind: NodeKind, ancestors: &[NodeKind], class: Option<&str>) -> bool {
        if let Some(kind_match) = &self.kind
            && !kind_match.matches(kind)
        {
            return false;
        }
        if let Some(ancestor_match) = &self.ancestor
            && !ancestors.iter().any(|a| ancestor_match.matches(*a))
        {
            return false;
        }
        if let Some(wanted) = &self.class
            && class != Some(wanted.as_str())
        {
            return false;
        }
        true
    }
}

/// One cascading style rule: a selector plus the properties it sets.
///
/// Rules live in an ordered list; for a matching node every rule is applied
/// in list order, so a later rule overrides an earlier one per property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleRule {
    pub selector: Selector,
    pub props: StyleProps,
}

impl StyleRule {
    pub fn new(selector: Selector, props: StyleProps) -> Self {
        Self { selector, props }
    }
}
