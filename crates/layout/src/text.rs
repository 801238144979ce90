//! Greedy line breaking over styled inline runs.
//!
//! Breaking happens at whitespace boundaries only. A token with no
//! breakable whitespace that still exceeds the line width is placed on its
//! own line and allowed to overflow; it is never broken mid-word.

use crate::fonts::{FontCatalog, FontFace};
use crate::EPSILON;
use std::sync::Arc;
use texprinter_style::ResolvedStyle;
use texprinter_types::NodeId;

/// One styled run of source text participating in a paragraph's flow.
#[derive(Debug, Clone)]
pub struct FlowRun {
    pub text: String,
    pub style: Arc<ResolvedStyle>,
    pub node: NodeId,
    pub face: FontFace,
}

impl FlowRun {
    pub fn new(text: impl Into<String>, style: Arc<ResolvedStyle>, node: NodeId) -> Self {
        let face = FontCatalog::resolve_or_default(&style.font);
        Self {
            text: text.into(),
            style,
            node,
            face,
        }
    }
}

/// A run segment placed on one line.
#[derive(Debug, Clone)]
pub struct LineFragment {
    /// Index into the flow's run list.
    pub run: usize,
    pub text: String,
    /// Horizontal offset from the line start.
    pub x: f32,
    pub width: f32,
}

/// One finished line of flowed text.
#[derive(Debug, Clone)]
pub struct FlowLine {
    pub fragments: Vec<LineFragment>,
    /// Total advance width of the line content.
    pub width: f32,
    /// Line extent: the tallest participating run's line height.
    pub height: f32,
    /// Baseline offset from the line top: the deepest ascent on the line.
    pub baseline: f32,
}

/// A word of one run, with the spacing decision to its left.
struct Token<'a> {
    run: usize,
    word: &'a str,
    width: f32,
    space_before: bool,
}

/// Breaks the runs into lines no wider than `max_width`.
///
/// Returns the lines plus the nodes whose unbreakable content overflowed
/// the available width.
pub fn flow_runs(runs: &[FlowRun], max_width: f32) -> (Vec<FlowLine>, Vec<(NodeId, f32)>) {
    let tokens = tokenize(runs);
    let mut lines = Vec::new();
    let mut overflows: Vec<(NodeId, f32)> = Vec::new();

    let mut current: Vec<(usize, String, f32)> = Vec::new(); // (run, text, width)
    let mut current_width = 0.0f32;

    for token in &tokens {
        let space = if current.is_empty() || !token.space_before {
            0.0
        } else {
            space_width(&runs[token.run])
        };

        if !current.is_empty() && current_width + space + token.width > max_width + EPSILON {
            lines.push(finalize_line(runs, &current, current_width));
            current.clear();
            current_width = 0.0;
        }

        if current.is_empty() {
            if token.width > max_width + EPSILON {
                overflows.push((runs[token.run].node, token.width));
            }
            current.push((token.run, token.word.to_string(), token.width));
            current_width = token.width;
        } else if space > 0.0 {
            // Merge into the previous fragment when the run continues;
            // otherwise the new fragment carries the separating space so
            // fragment widths always sum to the line width.
            if let Some(last) = current.last_mut().filter(|(run, _, _)| *run == token.run) {
                last.1.push(' ');
                last.1.push_str(token.word);
                last.2 += space + token.width;
            } else {
                let mut text = String::with_capacity(token.word.len() + 1);
                text.push(' ');
                text.push_str(token.word);
                current.push((token.run, text, space + token.width));
            }
            current_width += space + token.width;
        } else {
            // No space at a run boundary: the word continues mid-token.
            if let Some(last) = current.last_mut().filter(|(run, _, _)| *run == token.run) {
                last.1.push_str(token.word);
                last.2 += token.width;
            } else {
                current.push((token.run, token.word.to_string(), token.width));
            }
            current_width += token.width;
        }
    }

    if !current.is_empty() {
        lines.push(finalize_line(runs, &current, current_width));
    }

    (lines, overflows)
}

/// Measures a single-run, single-line string (markers, code lines).
pub fn measure(text: &str, style: &ResolvedStyle) -> f32 {
    FontCatalog::resolve_or_default(&style.font).text_width(text, style.font.size)
}

/// Gathers the styled runs of a paragraph-level block: the block's own
/// inline text followed by every text-bearing descendant, in pre-order.
/// `id` must be the block's own pre-order id.
pub(crate) fn collect_runs(
    node: &texprinter_doc::DocumentNode,
    id: NodeId,
    styles: &texprinter_style::StyleSet,
) -> Vec<FlowRun> {
    fn walk(
        node: &texprinter_doc::DocumentNode,
        index: &mut usize,
        styles: &texprinter_style::StyleSet,
        out: &mut Vec<FlowRun>,
    ) {
        let id = NodeId::new(*index);
        *index += 1;
        if node.kind().is_text_bearing()
            && let Some(text) = node.text()
            && !text.is_empty()
        {
            out.push(FlowRun::new(text, styles.get(id).clone(), id));
        }
        for child in node.children() {
            walk(child, index, styles, out);
        }
    }

    let mut out = Vec::new();
    let mut index = id.index();
    walk(node, &mut index, styles, &mut out);
    out
}

fn space_width(run: &FlowRun) -> f32 {
    run.face.text_width(" ", run.style.font.size)
}

fn tokenize(runs: &[FlowRun]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut previous_trailing_ws = false;

    for (run_index, run) in runs.iter().enumerate() {
        let leading_ws = run.text.starts_with(char::is_whitespace);
        let mut first_in_run = true;
        for word in run.text.split_whitespace() {
            let space_before = if first_in_run {
                // A boundary between runs is breakable only when either
                // side carries whitespace there.
                previous_trailing_ws || leading_ws
            } else {
                true
            };
            tokens.push(Token {
                run: run_index,
                word,
                width: run.face.text_width(word, run.style.font.size),
                space_before,
            });
            first_in_run = false;
        }
        if !run.text.is_empty() {
            previous_trailing_ws = run.text.ends_with(char::is_whitespace)
                || run.text.split_whitespace().next().is_none();
        }
    }
    tokens
}

fn finalize_line(runs: &[FlowRun], parts: &[(usize, String, f32)], width: f32) -> FlowLine {
    let mut fragments = Vec::with_capacity(parts.len());
    let mut x = 0.0f32;
    let mut height = 0.0f32;
    let mut baseline = 0.0f32;

    for (run_index, text, part_width) in parts {
        let run = &runs[*run_index];
        height = height.max(run.style.line_height);
        baseline = baseline.max(run.face.ascent(run.style.font.size));
        fragments.push(LineFragment {
            run: *run_index,
            text: text.clone(),
            x,
            width: *part_width,
        });
        x += part_width;
    }

    FlowLine {
        fragments,
        width,
        height,
        baseline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texprinter_style::ResolvedStyle;
    use texprinter_types::NodeId;

    fn run(text: &str) -> FlowRun {
        FlowRun::new(text, Arc::new(ResolvedStyle::default()), NodeId::new(0))
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let (lines, overflow) = flow_runs(&[run("hello world")], 500.0);
        assert_eq!(lines.len(), 1);
        assert!(overflow.is_empty());
        assert_eq!(lines[0].fragments.len(), 1);
        assert_eq!(lines[0].fragments[0].text, "hello world");
    }

    #[test]
    fn wraps_at_whitespace() {
        let style = Arc::new(ResolvedStyle::default());
        let word_width = measure("word", &style);
        // Room for exactly two words plus the separating space.
        let max = word_width * 2.0 + measure(" ", &style) + 0.5;
        let (lines, _) = flow_runs(&[run("word word word word")], max);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].fragments[0].text, "word word");
        assert_eq!(lines[1].fragments[0].text, "word word");
    }

    #[test]
    fn unbreakable_word_overflows_on_its_own_line() {
        let (lines, overflow) = flow_runs(&[run("tiny incomprehensibilities end")], 40.0);
        assert_eq!(overflow.len(), 1);
        // The oversized word got a line of its own, unbroken.
        assert!(lines
            .iter()
            .any(|l| l.fragments.len() == 1 && l.fragments[0].text == "incomprehensibilities"));
    }

    #[test]
    fn runs_merge_without_boundary_whitespace() {
        let a = run("semi");
        let b = run("colon");
        let (lines, _) = flow_runs(&[a, b], 500.0);
        assert_eq!(lines.len(), 1);
        // Two fragments (different runs), no space between them.
        assert_eq!(lines[0].fragments.len(), 2);
        let frag_b = &lines[0].fragments[1];
        let frag_a = &lines[0].fragments[0];
        assert!((frag_b.x - (frag_a.x + frag_a.width)).abs() < 0.001);
    }

    #[test]
    fn run_boundary_with_whitespace_breaks() {
        let a = run("first ");
        let b = run("second");
        let (lines, _) = flow_runs(&[a, b], 500.0);
        assert_eq!(lines.len(), 1);
        let frag_b = &lines[0].fragments[1];
        let frag_a = &lines[0].fragments[0];
        // The second fragment carries the separating space and abuts the
        // first, so fragment widths sum to the line width.
        assert_eq!(frag_b.text, " second");
        assert!((frag_b.x - (frag_a.x + frag_a.width)).abs() < 0.001);
        assert!((lines[0].width - (frag_a.width + frag_b.width)).abs() < 0.001);
    }

    #[test]
    fn line_metrics_take_the_tallest_run() {
        let small = run("small");
        let mut big_style = ResolvedStyle::default();
        big_style.font.size = 24.0;
        big_style.line_height = 28.8;
        let big = FlowRun::new(" big", Arc::new(big_style), NodeId::new(1));
        let (lines, _) = flow_runs(&[small, big], 500.0);
        assert_eq!(lines.len(), 1);
        assert!((lines[0].height - 28.8).abs() < 0.001);
        assert!(lines[0].baseline > FontFace::TimesRoman.ascent(12.0));
    }
}
