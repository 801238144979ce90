//! The printable Q&A report model: a fetched question thread (question,
//! answers, comments, votes) and its assembly into a document tree.
//!
//! The markup parser and the network layer are external collaborators; post
//! bodies arrive here as already-parsed blocks. This module only decides
//! what a printed thread looks like: ordering, metadata lines, separators
//! and the built-in style rules.

use texprinter_doc::{Document, DocumentNode};
use texprinter_style::{
    Border, BorderStyle, FontStyle, FontWeight, KindMatch, Margins, Selector, StyleProps,
    StyleRule,
};
use texprinter_types::Color;

/// The author of a post or comment. Reputation is kept as the displayed
/// string: migrated and community-wiki posts carry markers ("Migrated
/// question", "Community Wiki") instead of a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub name: String,
    pub reputation: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub date: String,
    pub votes: i32,
}

/// One question or answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    /// Set for the question; answers have no title of their own.
    pub title: String,
    pub date: String,
    pub votes: i32,
    pub accepted: bool,
    pub user: User,
    pub comments: Vec<Comment>,
    /// The post body as parsed blocks.
    pub body: Vec<DocumentNode>,
}

/// A full question thread ready for printing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thread {
    pub question: Post,
    pub answers: Vec<Post>,
}

impl Thread {
    /// Answers in print order: the accepted answer first, then by votes,
    /// highest first. Ties keep their fetch order.
    pub fn sorted_answers(&self) -> Vec<&Post> {
        let mut answers: Vec<&Post> = self.answers.iter().collect();
        answers.sort_by(|a, b| {
            b.accepted
                .cmp(&a.accepted)
                .then_with(|| b.votes.cmp(&a.votes))
        });
        answers
    }

    /// Builds the document tree for the whole thread.
    pub fn to_document(&self) -> Document {
        let mut blocks = Vec::new();

        blocks.push(
            DocumentNode::heading(1, self.question.title.as_str()).with_class("question-title"),
        );
        blocks.push(meta_line("Asked", &self.question));
        blocks.extend(self.question.body.iter().cloned());
        push_comments(&mut blocks, &self.question.comments);

        let answers = self.sorted_answers();
        let total = answers.len();
        for (index, answer) in answers.into_iter().enumerate() {
            blocks.push(separator());
            let title = if answer.accepted {
                "Accepted answer".to_string()
            } else {
                format!("Answer {} of {}", index + 1, total)
            };
            let mut heading = DocumentNode::heading(2, title);
            if answer.accepted {
                heading = heading.with_class("accepted");
            }
            blocks.push(heading);
            blocks.push(meta_line("Answered", answer));
            blocks.extend(answer.body.iter().cloned());
            push_comments(&mut blocks, &answer.comments);
        }

        Document::new(blocks)
    }
}

fn meta_line(verb: &str, post: &Post) -> DocumentNode {
    let reputation = if post.reputation_display().is_empty() {
        String::new()
    } else {
        format!(" ({})", post.reputation_display())
    };
    DocumentNode::paragraph(format!(
        "{} by {}{} on {} \u{2014} {} votes",
        verb, post.user.name, reputation, post.date, post.votes
    ))
    .with_class("post-meta")
}

impl Post {
    fn reputation_display(&self) -> &str {
        self.user.reputation.trim()
    }
}

fn push_comments(blocks: &mut Vec<DocumentNode>, comments: &[Comment]) {
    for comment in comments {
        blocks.push(
            DocumentNode::paragraph(format!(
                "{} \u{2014} {}, {} ({})",
                comment.text, comment.author, comment.date, comment.votes
            ))
            .with_class("comment"),
        );
    }
}

/// A horizontal-rule paragraph separating posts.
fn separator() -> DocumentNode {
    DocumentNode::new(texprinter_doc::NodeKind::Paragraph).with_class("rule")
}

/// The built-in look of a printed thread, so the GUI can export with zero
/// configuration. Rules cascade in order; later entries win.
pub fn default_rules() -> Vec<StyleRule> {
    let rule = |selector: Selector, props: StyleProps| StyleRule::new(selector, props);
    vec![
        // Body text rhythm.
        rule(
            Selector::kind(KindMatch::Paragraph),
            StyleProps {
                margin: Some(Margins {
                    bottom: 6.0,
                    ..Margins::default()
                }),
                ..Default::default()
            },
        ),
        // Headings: bold sans, sized per level.
        rule(
            Selector::kind(KindMatch::Heading),
            StyleProps {
                font_family: Some("Helvetica".to_string()),
                font_weight: Some(FontWeight::Bold),
                font_size: Some(13.0),
                margin: Some(Margins {
                    bottom: 6.0,
                    ..Margins::default()
                }),
                ..Default::default()
            },
        ),
        rule(
            Selector::kind(KindMatch::HeadingLevel(1)),
            StyleProps {
                font_size: Some(20.0),
                ..Default::default()
            },
        ),
        rule(
            Selector::kind(KindMatch::HeadingLevel(2)),
            StyleProps {
                font_size: Some(16.0),
                ..Default::default()
            },
        ),
        rule(
            Selector::kind(KindMatch::HeadingLevel(3)),
            StyleProps {
                font_size: Some(14.0),
                ..Default::default()
            },
        ),
        // Code listings: monospace on a light panel.
        rule(
            Selector::kind(KindMatch::CodeBlock),
            StyleProps {
                font_family: Some("Courier".to_string()),
                font_size: Some(9.5),
                background_color: Some(Color::gray(0xF2)),
                margin: Some(Margins::y(6.0)),
                ..Default::default()
            },
        ),
        // Inline code runs tagged by the parser.
        rule(
            Selector::kind(KindMatch::InlineRun).with_class("inline-code"),
            StyleProps {
                font_family: Some("Courier".to_string()),
                ..Default::default()
            },
        ),
        // Table cells get a small inner inset and a hairline box.
        rule(
            Selector::kind(KindMatch::TableCell),
            StyleProps {
                margin: Some(Margins::all(3.0)),
                border: Some(Border::solid(0.5, Color::gray(0xB0))),
                ..Default::default()
            },
        ),
        // Metadata lines under titles.
        rule(
            Selector::class("post-meta"),
            StyleProps {
                font_size: Some(10.0),
                font_style: Some(FontStyle::Italic),
                color: Some(Color::gray(0x60)),
                margin: Some(Margins {
                    bottom: 8.0,
                    ..Margins::default()
                }),
                ..Default::default()
            },
        ),
        // Comments in smaller, dimmer type, slightly indented.
        rule(
            Selector::class("comment"),
            StyleProps {
                font_size: Some(10.0),
                color: Some(Color::gray(0x50)),
                margin: Some(Margins {
                    left: 18.0,
                    bottom: 4.0,
                    ..Margins::default()
                }),
                ..Default::default()
            },
        ),
        // Blockquotes, as the parser tags them.
        rule(
            Selector::class("quote"),
            StyleProps {
                font_style: Some(FontStyle::Italic),
                color: Some(Color::gray(0x40)),
                margin: Some(Margins {
                    left: 18.0,
                    bottom: 6.0,
                    ..Margins::default()
                }),
                ..Default::default()
            },
        ),
        // Accepted-answer headings in green.
        rule(
            Selector::class("accepted"),
            StyleProps {
                color: Some(Color::new(0x2E, 0x7D, 0x32)),
                ..Default::default()
            },
        ),
        // Post separators: a hairline rule.
        rule(
            Selector::class("rule"),
            StyleProps {
                border_bottom: Some(Border {
                    width: 0.75,
                    color: Color::gray(0xB0),
                    style: BorderStyle::Solid,
                }),
                margin: Some(Margins::y(8.0)),
                ..Default::default()
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use texprinter_doc::NodeKind;

    fn answer(votes: i32, accepted: bool) -> Post {
        Post {
            votes,
            accepted,
            user: User {
                name: "someone".to_string(),
                reputation: "1,234".to_string(),
            },
            date: "yesterday".to_string(),
            body: vec![DocumentNode::paragraph(format!("answer with {} votes", votes))],
            ..Default::default()
        }
    }

    #[test]
    fn accepted_answer_prints_first_regardless_of_votes() {
        let thread = Thread {
            question: Post::default(),
            answers: vec![answer(50, false), answer(3, true), answer(12, false)],
        };
        let order: Vec<i32> = thread.sorted_answers().iter().map(|a| a.votes).collect();
        assert_eq!(order, vec![3, 50, 12]);
    }

    #[test]
    fn unaccepted_answers_sort_by_votes_descending() {
        let thread = Thread {
            question: Post::default(),
            answers: vec![answer(1, false), answer(9, false), answer(4, false)],
        };
        let order: Vec<i32> = thread.sorted_answers().iter().map(|a| a.votes).collect();
        assert_eq!(order, vec![9, 4, 1]);
    }

    #[test]
    fn thread_document_is_well_formed() {
        let thread = Thread {
            question: Post {
                title: "How do I typeset this?".to_string(),
                date: "today".to_string(),
                votes: 7,
                user: User {
                    name: "asker".to_string(),
                    reputation: "101".to_string(),
                },
                comments: vec![Comment {
                    text: "good question".to_string(),
                    author: "lurker".to_string(),
                    date: "today".to_string(),
                    votes: 2,
                }],
                body: vec![
                    DocumentNode::paragraph("The problem."),
                    DocumentNode::code_block("\\documentclass{article}"),
                ],
                ..Default::default()
            },
            answers: vec![answer(5, true)],
        };
        let doc = thread.to_document();
        assert!(doc.validate().is_ok());

        // Title first, then the metadata line.
        let blocks = doc.blocks();
        assert_eq!(blocks[0].kind(), NodeKind::Heading(1));
        assert_eq!(blocks[1].class(), Some("post-meta"));
        // The accepted answer's heading is tagged.
        assert!(blocks
            .iter()
            .any(|b| b.class() == Some("accepted") && b.kind() == NodeKind::Heading(2)));
    }

    #[test]
    fn community_wiki_reputation_is_preserved() {
        let post = Post {
            user: User {
                name: "someone".to_string(),
                reputation: "Community Wiki".to_string(),
            },
            ..Default::default()
        };
        let node = meta_line("Answered", &post);
        assert!(node.text().unwrap().contains("(Community Wiki)"));
    }
}
