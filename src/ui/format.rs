//! Message text formatting: `**bold**` markers and line breaks.
//!
//! Text is split into literal spans; nothing else in a message is treated as
//! markup, so user input such as `<b>` is shown exactly as typed.

use std::sync::LazyLock;

use eframe::egui::text::{LayoutJob, TextFormat};
use eframe::egui::{Color32, FontId};
use regex::Regex;

// Non-greedy and never across a line break
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), bold: false }
    }

    fn bold(text: &str) -> Self {
        Self { text: text.to_string(), bold: true }
    }
}

pub fn parse(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in BOLD.find_iter(text) {
        if m.start() > last {
            spans.push(Span::plain(&text[last..m.start()]));
        }
        let inner = &text[m.start() + 2..m.end() - 2];
        if !inner.is_empty() {
            spans.push(Span::bold(inner));
        }
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }

    spans
}

/// Text with the bold markers removed, for terminals.
pub fn to_plain(text: &str) -> String {
    parse(text).into_iter().map(|s| s.text).collect()
}

/// Builds an egui layout job; bold spans use the `strong` color and
/// newlines break lines.
pub fn layout_job(
    text: &str,
    font: FontId,
    color: Color32,
    strong: Color32,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for span in parse(text) {
        let format = TextFormat {
            font_id: font.clone(),
            color: if span.bold { strong } else { color },
            ..Default::default()
        };
        job.append(&span.text, 0.0, format);
    }

    job
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_markers_become_bold_spans() {
        assert_eq!(
            parse("**Admission Information:**\nVisit us"),
            vec![Span::bold("Admission Information:"), Span::plain("\nVisit us")]
        );
    }

    #[test]
    fn bold_is_non_greedy() {
        assert_eq!(
            parse("**a** and **b**"),
            vec![Span::bold("a"), Span::plain(" and "), Span::bold("b")]
        );
    }

    #[test]
    fn bold_does_not_cross_line_breaks() {
        assert_eq!(parse("**open\nclose**"), vec![Span::plain("**open\nclose**")]);
    }

    #[test]
    fn unmatched_and_empty_markers() {
        assert_eq!(parse("2 ** 3"), vec![Span::plain("2 ** 3")]);
        assert_eq!(parse("x****y"), vec![Span::plain("x"), Span::plain("y")]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn markup_looking_input_stays_literal() {
        let input = "<script>alert(1)</script> & <b>hi</b>";
        assert_eq!(parse(input), vec![Span::plain(input)]);
        assert_eq!(to_plain(input), input);
    }

    #[test]
    fn plain_rendering_strips_markers_only() {
        assert_eq!(to_plain("• **Faculty** - ask\nme"), "• Faculty - ask\nme");
    }

    #[test]
    fn layout_job_keeps_text_and_sections() {
        let job = layout_job(
            "**Hi** there\nfriend",
            FontId::proportional(14.0),
            Color32::BLACK,
            Color32::BLUE,
            300.0,
        );
        assert_eq!(job.text, "Hi there\nfriend");
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.sections[0].format.color, Color32::BLUE);
        assert_eq!(job.sections[1].format.color, Color32::BLACK);
        assert_eq!(job.wrap.max_width, 300.0);
    }
}
