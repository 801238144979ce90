//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use texprinter::report::{Comment, Post, Thread, User};
use texprinter::{Document, DocumentNode, PageConfig};
use texprinter_style::Margins;

/// Routes pipeline logs through the test harness when `RUST_LOG` is set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small page so pagination effects show up with little content.
pub fn small_page() -> PageConfig {
    PageConfig::default()
        .with_page_size(300.0, 200.0)
        .with_margins(Margins::all(20.0))
}

pub fn simple_document() -> Document {
    Document::new(vec![
        DocumentNode::heading(1, "Build report"),
        DocumentNode::paragraph("Compilation finished without errors."),
        DocumentNode::code_block("latexmk -pdf main.tex\nOutput written on main.pdf"),
        DocumentNode::table(vec![
            DocumentNode::table_row(vec![
                DocumentNode::table_cell(vec![DocumentNode::paragraph("File")]),
                DocumentNode::table_cell(vec![DocumentNode::paragraph("Pages")]),
            ]),
            DocumentNode::table_row(vec![
                DocumentNode::table_cell(vec![DocumentNode::paragraph("main.pdf")]),
                DocumentNode::table_cell(vec![DocumentNode::paragraph("12")]),
            ]),
        ]),
    ])
}

pub fn sample_thread() -> Thread {
    Thread {
        question: Post {
            title: "Why does my table overflow the page?".to_string(),
            date: "2 days ago".to_string(),
            votes: 14,
            accepted: false,
            user: User {
                name: "confused-user".to_string(),
                reputation: "352".to_string(),
            },
            comments: vec![Comment {
                text: "Please post a minimal example.".to_string(),
                author: "helpful-commenter".to_string(),
                date: "2 days ago".to_string(),
                votes: 3,
            }],
            body: vec![
                DocumentNode::paragraph(
                    "My table is wider than the text block and runs off the right edge.",
                ),
                DocumentNode::code_block("\\begin{tabular}{ll}\na & b \\\\\n\\end{tabular}"),
            ],
        },
        answers: vec![
            Post {
                votes: 3,
                accepted: false,
                date: "yesterday".to_string(),
                user: User {
                    name: "first-responder".to_string(),
                    reputation: "1,024".to_string(),
                },
                body: vec![DocumentNode::paragraph("Try the tabularx package.")],
                ..Default::default()
            },
            Post {
                votes: 21,
                accepted: true,
                date: "yesterday".to_string(),
                user: User {
                    name: "expert".to_string(),
                    reputation: "88.2k".to_string(),
                },
                body: vec![
                    DocumentNode::paragraph("Use a fixed-width column type:"),
                    DocumentNode::code_block("\\begin{tabular}{p{3cm}l}"),
                ],
                ..Default::default()
            },
        ],
    }
}
