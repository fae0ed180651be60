// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Chat-pane rendering: conversation messages to styled Ratatui lines.
//!
//! Assistant text is split into plain and math segments first, so that
//! `$x^2$` style notation gets its own styling instead of being word-wrapped
//! as ordinary prose.

use axiom_core::{segment, Message, SegmentKind};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::widgets::{block_math_prefix, step_marker};

/// A styled line ready for Ratatui rendering.
pub type StyledLines = Vec<Line<'static>>;

/// Render one conversation message as a role-labelled block of lines.
pub fn render_message(msg: &Message, wrap_width: u16, ascii: bool) -> StyledLines {
    let mut lines: StyledLines = Vec::new();

    let (label, label_style) = if msg.error {
        ("Tutor", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else if msg.role == axiom_client::Role::User {
        ("You", Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD))
    } else {
        ("Tutor", Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD))
    };
    lines.push(Line::from(Span::styled(format!("{label}:"), label_style)));

    let body_style = if msg.error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    lines.extend(render_content_styled(&msg.content, wrap_width, ascii, body_style));

    for (i, step) in msg.steps.iter().enumerate() {
        let n = step.index.unwrap_or(i as u32 + 1);
        lines.push(Line::from(Span::styled(
            format!("  {} STEP {n}", step_marker(ascii)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for line in render_content(&step.text, wrap_width.saturating_sub(4), ascii) {
            let mut spans = vec![Span::raw("    ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::default());
    lines
}

/// Render raw tutor text (plain prose interleaved with math notation) into
/// styled lines, word-wrapped at `wrap_width` display columns.
pub fn render_content(text: &str, wrap_width: u16, ascii: bool) -> StyledLines {
    render_content_styled(text, wrap_width, ascii, Style::default())
}

fn render_content_styled(
    text: &str,
    wrap_width: u16,
    ascii: bool,
    base: Style,
) -> StyledLines {
    let width = if wrap_width == 0 { 80 } else { wrap_width as usize };
    let mut lines: StyledLines = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();

    let push_line = |lines: &mut StyledLines, spans: &mut Vec<Span<'static>>| {
        if spans.is_empty() {
            lines.push(Line::default());
        } else {
            lines.push(Line::from(std::mem::take(spans)));
        }
    };

    for seg in segment(text) {
        match seg.kind {
            SegmentKind::Plain => {
                // Explicit newlines break the line; within a line, word-wrap.
                for (i, part) in seg.text.split('\n').enumerate() {
                    if i > 0 {
                        push_line(&mut lines, &mut current_spans);
                    }
                    wrap_words(part, width, base, &mut lines, &mut current_spans, &push_line);
                }
            }
            SegmentKind::InlineMath => {
                let span = math_span(&seg.text, false, base);
                let col = current_col(&current_spans);
                if col > 0 && col + span.content.width() > width {
                    push_line(&mut lines, &mut current_spans);
                }
                current_spans.push(span);
            }
            SegmentKind::BlockMath => {
                // Block math always stands on its own line.
                if !current_spans.is_empty() {
                    push_line(&mut lines, &mut current_spans);
                }
                for math_line in seg.text.split('\n') {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {}", block_math_prefix(ascii)),
                            Style::default().fg(Color::DarkGray),
                        ),
                        math_span(math_line, true, base),
                    ]));
                }
            }
        }
    }

    if !current_spans.is_empty() {
        lines.push(Line::from(current_spans));
    }

    lines
}

/// Typeset one math notation string as a styled span.
///
/// This is the seam where a real typesetter would slot in; until then the
/// notation text is shown as-is with distinct styling, `display` selecting
/// the heavier block-math look.
pub fn math_span(text: &str, display: bool, base: Style) -> Span<'static> {
    let style = if display {
        base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        base.fg(Color::Cyan).add_modifier(Modifier::ITALIC)
    };
    Span::styled(text.to_string(), style)
}

fn wrap_words(
    text: &str,
    width: usize,
    style: Style,
    lines: &mut StyledLines,
    current_spans: &mut Vec<Span<'static>>,
    push_line: &impl Fn(&mut StyledLines, &mut Vec<Span<'static>>),
) {
    let mut col = current_col(current_spans);
    let mut buf = String::new();
    for word in text.split_inclusive(' ') {
        // Wrap on display columns, not bytes; non-ASCII prose is common here.
        if col + word.width() > width && !buf.is_empty() {
            current_spans.push(Span::styled(buf.clone(), style));
            buf.clear();
            push_line(lines, current_spans);
            col = 0;
        }
        buf.push_str(word);
        col += word.width();
    }
    if !buf.is_empty() {
        current_spans.push(Span::styled(buf, style));
    }
}

fn current_col(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axiom_client::Step;
    use axiom_core::Message;

    use super::*;

    fn flat(lines: &StyledLines) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn plain_prose_stays_on_one_line() {
        let lines = render_content("solve for x", 40, false);
        assert_eq!(flat(&lines), vec!["solve for x"]);
    }

    #[test]
    fn inline_math_kept_in_text_flow() {
        let lines = render_content("the root is $x = 2$ here", 40, false);
        let joined = flat(&lines).join("\n");
        assert!(joined.contains("x = 2"));
        assert_eq!(lines.len(), 1, "inline math must not force a line break");
    }

    #[test]
    fn block_math_gets_its_own_line() {
        let lines = render_content("therefore \\[x^2 = 4\\] done", 40, false);
        let rows = flat(&lines);
        assert!(rows.iter().any(|r| r.contains("x^2 = 4")));
        // Prose before and after must be on different lines than the math.
        assert!(rows.len() >= 3);
    }

    #[test]
    fn inline_math_styled_differently_from_prose() {
        let lines = render_content("value $y$", 40, false);
        let spans = &lines[0].spans;
        let math_span = spans.iter().find(|s| s.content == "y").unwrap();
        assert_eq!(math_span.style.fg, Some(Color::Cyan));
    }

    #[test]
    fn long_prose_word_wraps() {
        let lines = render_content("one two three four five six", 10, false);
        assert!(lines.len() > 1);
    }

    #[test]
    fn greek_prose_wraps_on_display_columns_not_bytes() {
        // "παβγ δε" is 7 display columns but 13 bytes; it must fit at width 7.
        let lines = render_content("παβγ δε", 7, false);
        assert_eq!(flat(&lines), vec!["παβγ δε"]);
    }

    #[test]
    fn message_block_starts_with_role_label() {
        let msg = Message::user("hi");
        let rows = flat(&render_message(&msg, 40, false));
        assert_eq!(rows[0], "You:");
        assert_eq!(rows[1], "hi");
    }

    #[test]
    fn error_message_rendered_in_red() {
        let msg = Message::failure("down");
        let lines = render_message(&msg, 40, false);
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn steps_rendered_with_headers() {
        let msg = Message::assistant_with_steps(
            "work through it",
            vec![Step::new(1, "isolate $x$"), Step::new(2, "divide by 2")],
        );
        let rows = flat(&render_message(&msg, 60, false));
        assert!(rows.iter().any(|r| r.contains("STEP 1")));
        assert!(rows.iter().any(|r| r.contains("STEP 2")));
        assert!(rows.iter().any(|r| r.contains("divide by 2")));
    }

    #[test]
    fn step_without_index_falls_back_to_position() {
        let msg = Message::assistant_with_steps(
            "ok",
            vec![
                Step { index: None, text: "first".into() },
                Step { index: None, text: "second".into() },
            ],
        );
        let rows = flat(&render_message(&msg, 60, false));
        assert!(rows.iter().any(|r| r.contains("STEP 1")));
        assert!(rows.iter().any(|r| r.contains("STEP 2")));
    }
}
