use crate::{DocError, Document, DocumentNode, NodeKind};
use texprinter_types::NodeId;

/// Walks the tree once, carrying the parent kind, and rejects any node that
/// breaks the table shape invariants or carries an out-of-range heading
/// level. Heading level *jumps* are allowed; reports commonly skip levels.
pub(crate) fn validate(doc: &Document) -> Result<(), DocError> {
    let mut next = 0usize;
    for block in doc.blocks() {
        check_node(block, None, &mut next)?;
    }
    log::debug!("document validated: {} nodes", next);
    Ok(())
}

fn check_node(
    node: &DocumentNode,
    parent: Option<NodeKind>,
    next: &mut usize,
) -> Result<(), DocError> {
    let id = NodeId::new(*next);
    *next += 1;

    match node.kind() {
        NodeKind::Heading(level) if !(1..=6).contains(&level) => {
            return Err(DocError::MalformedDocument {
                node: id,
                reason: format!("heading level {} outside 1..=6", level),
            });
        }
        NodeKind::Table => {
            let mut child_id = *next;
            for child in node.children() {
                if child.kind() != NodeKind::TableRow {
                    return Err(DocError::MalformedDocument {
                        node: NodeId::new(child_id),
                        reason: format!(
                            "table may only contain table-row children, found {}",
                            child.kind().name()
                        ),
                    });
                }
                child_id += child.subtree_len();
            }
        }
        NodeKind::TableRow => {
            if parent != Some(NodeKind::Table) {
                return Err(DocError::MalformedDocument {
                    node: id,
                    reason: "table-row outside a table".to_string(),
                });
            }
            let mut child_id = *next;
            for child in node.children() {
                if child.kind() != NodeKind::TableCell {
                    return Err(DocError::MalformedDocument {
                        node: NodeId::new(child_id),
                        reason: format!(
                            "table-row may only contain table-cell children, found {}",
                            child.kind().name()
                        ),
                    });
                }
                child_id += child.subtree_len();
            }
        }
        NodeKind::TableCell => {
            if parent != Some(NodeKind::TableRow) {
                return Err(DocError::MalformedDocument {
                    node: id,
                    reason: "table-cell outside a table-row".to_string(),
                });
            }
        }
        _ => {}
    }

    for child in node.children() {
        check_node(child, Some(node.kind()), next)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Document, DocumentNode};

    #[test]
    fn accepts_well_formed_table() {
        let doc = Document::new(vec![DocumentNode::table(vec![
            DocumentNode::table_row(vec![
                DocumentNode::table_cell(vec![DocumentNode::paragraph("a")]),
                DocumentNode::table_cell(vec![DocumentNode::paragraph("b")]),
            ]),
        ])]);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn rejects_row_outside_table() {
        let doc = Document::new(vec![DocumentNode::table_row(vec![])]);
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("table-row outside a table"));
    }

    #[test]
    fn rejects_cell_outside_row() {
        let doc = Document::new(vec![DocumentNode::paragraph("x")
            .with_child(DocumentNode::table_cell(vec![]))]);
        assert!(doc.validate().is_err());
    }

    #[test]
    fn rejects_non_row_table_child() {
        let doc = Document::new(vec![DocumentNode::table(vec![DocumentNode::paragraph(
            "stray",
        )])]);
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("table may only contain table-row"));
    }

    #[test]
    fn heading_jumps_are_legal() {
        let doc = Document::new(vec![
            DocumentNode::heading(1, "top"),
            DocumentNode::heading(4, "jump"),
            DocumentNode::heading(2, "back"),
        ]);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn rejects_heading_level_zero() {
        let doc = Document::new(vec![DocumentNode::heading(0, "bad")]);
        assert!(doc.validate().is_err());
    }

    #[test]
    fn error_points_at_offending_node() {
        // table(#0) -> row(#1) -> paragraph(#2): the paragraph is at fault
        let doc = Document::new(vec![DocumentNode::table(vec![
            DocumentNode::table_row(vec![DocumentNode::paragraph("oops")]),
        ])]);
        let err = doc.validate().unwrap_err();
        assert_eq!(err.node().index(), 2);
    }
}
