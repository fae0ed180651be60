// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

/// One-row status bar at the top.
const STATUS_ROWS: u16 = 1;
/// Question box height, borders included.
const INPUT_ROWS: u16 = 5;
/// The chat pane refuses to shrink below this many rows.
const MIN_CHAT_ROWS: u16 = 10;

/// Screen regions: status bar on top, chat in the middle taking whatever
/// height is left, question box at the bottom.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub chat_pane: Rect,
    pub input_pane: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let [status_bar, chat_pane, input_pane] = Layout::vertical([
            Constraint::Length(STATUS_ROWS),
            Constraint::Min(MIN_CHAT_ROWS),
            Constraint::Length(INPUT_ROWS),
        ])
        .areas(area);
        AppLayout { status_bar, chat_pane, input_pane }
    }

    pub fn new(frame: &Frame) -> Self {
        Self::compute(frame.area())
    }

    /// Chat rows available for text once the border is taken off.
    pub fn chat_inner_height(&self) -> u16 {
        self.chat_pane.height.saturating_sub(2)
    }
}
