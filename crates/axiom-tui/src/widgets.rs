// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use axiom_client::{Difficulty, Topic};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::math::StyledLines;

// ── Character sets ────────────────────────────────────────────────────────────

fn sep(ascii: bool) -> &'static str {
    if ascii { "|" } else { "│" }
}
fn busy_char(ascii: bool) -> &'static str {
    if ascii { "* " } else { "⠿ " }
}
pub(crate) fn block_math_prefix(ascii: bool) -> &'static str {
    if ascii { "| " } else { "┃ " }
}
pub(crate) fn step_marker(ascii: bool) -> &'static str {
    if ascii { ">" } else { "▸" }
}
fn border_type(ascii: bool) -> BorderType {
    if ascii { BorderType::Plain } else { BorderType::Rounded }
}

// ── Draw functions ────────────────────────────────────────────────────────────

/// Draw the status bar at the top.
pub fn draw_status(
    frame: &mut Frame,
    area: Rect,
    topic: Topic,
    difficulty: Difficulty,
    busy: bool,
    ascii: bool,
) {
    let busy_indicator = if busy { busy_char(ascii) } else { "  " };
    let separator = sep(ascii);

    let line = Line::from(vec![
        Span::styled(
            format!(" {busy_indicator}"),
            Style::default().fg(if busy { Color::Yellow } else { Color::DarkGray }),
        ),
        Span::styled(" axiom ", Style::default().fg(Color::LightCyan)),
        Span::styled(separator, Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {topic} "), topic_style(topic)),
        Span::styled(separator, Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {difficulty} "), difficulty_style(difficulty)),
        Span::styled(
            "  F1:help  F2:topic  F3:difficulty  ^w k:↑chat  ^w j:↓input  Enter:send  ^c:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Draw the conversation scroll pane.
pub fn draw_chat(
    frame: &mut Frame,
    area: Rect,
    lines: &StyledLines,
    scroll_offset: u16,
    focused: bool,
    ascii: bool,
) {
    let block = pane_block("Conversation", focused, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible: Vec<Line<'static>> = lines
        .iter()
        .skip(scroll_offset as usize)
        .take(inner.height as usize)
        .cloned()
        .collect();

    // Content is pre-wrapped to the pane width; keep Ratatui wrapping on so
    // unusually long unbroken words are still not hard-truncated.
    let para = Paragraph::new(visible).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

/// Draw the question input box at the bottom.
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    cursor_row: usize,
    cursor_col: usize,
    scroll_offset: usize,
    focused: bool,
    busy: bool,
    ascii: bool,
) {
    let title = if busy {
        "Question  [waiting for tutor]"
    } else {
        "Question  [Enter:send  Shift+Enter:newline  ^w k:↑chat]"
    };

    let block = pane_block(title, focused, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible: Vec<Line> = lines
        .iter()
        .skip(scroll_offset)
        .take(inner.height as usize)
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);

    if focused {
        if let Some(row) = cursor_row.checked_sub(scroll_offset) {
            if (row as u16) < inner.height {
                frame.set_cursor_position((
                    inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1)),
                    inner.y + row as u16,
                ));
            }
        }
    }
}

/// Draw the help overlay.
pub fn draw_help(frame: &mut Frame, ascii: bool) {
    let area = frame.area();
    let bt = border_type(ascii);

    let help_text = vec![
        Line::from(Span::styled(
            "  Axiom Key Bindings",
            Style::default().add_modifier(Modifier::BOLD).fg(Color::LightBlue),
        )),
        Line::default(),
        Line::from(" ^w k     Focus conversation pane"),
        Line::from(" ^w j     Focus question pane"),
        Line::from(" j/k      Scroll conversation down/up"),
        Line::from(" ^u/^d    Half-page up/down"),
        Line::from(" g / G    Jump to top/bottom"),
        Line::from(" Enter    Send question"),
        Line::from(" S+Enter  Insert newline"),
        Line::from(" F2       Cycle topic (algebra/geometry/calculus)"),
        Line::from(" F3       Cycle difficulty (easy/medium/hard)"),
        Line::from(" ^c       Quit"),
        Line::from(" F1       Toggle this help"),
        Line::default(),
        Line::from(Span::styled(
            " Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let width = 60u16.min(area.width);
    let height = (help_text.len() as u16 + 2).min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    let overlay = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(bt)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(Paragraph::new(help_text), inner);
}

// ── Internal helpers ──────────────────────────────────────────────────────────

pub(crate) fn pane_block(title: &str, focused: bool, ascii: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            if focused {
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue)
            } else {
                Style::default().fg(Color::Gray)
            },
        ))
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(border_style)
}

fn topic_style(topic: Topic) -> Style {
    match topic {
        Topic::Algebra  => Style::default().fg(Color::LightGreen),
        Topic::Geometry => Style::default().fg(Color::LightYellow),
        Topic::Calculus => Style::default().fg(Color::LightMagenta),
    }
}

fn difficulty_style(difficulty: Difficulty) -> Style {
    match difficulty {
        Difficulty::Easy   => Style::default().fg(Color::Green),
        Difficulty::Medium => Style::default().fg(Color::Yellow),
        Difficulty::Hard   => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
