// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Visual-row bookkeeping for the question box.
//!
//! The input pane is a few rows tall, so the buffer is laid out as an
//! [`InputGrid`]: every visual row remembers the byte offset where it begins
//! in the underlying string, which makes cursor placement a lookup instead of
//! a second pass over the text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The input buffer broken into visual rows of at most `width` display
/// columns.  Rows never contain `'\n'`; an empty buffer still produces one
/// empty row so the pane always has something to draw.
pub struct InputGrid {
    rows: Vec<String>,
    /// Byte offset into the source string where each row starts.
    starts: Vec<usize>,
    width: usize,
}

impl InputGrid {
    pub fn build(content: &str, width: usize) -> Self {
        let mut grid = InputGrid { rows: Vec::new(), starts: Vec::new(), width };
        let mut base = 0;
        for paragraph in content.split('\n') {
            grid.layout_paragraph(paragraph, base);
            base += paragraph.len() + 1;
        }
        grid
    }

    /// Soft-wrap one newline-free paragraph starting at byte `base`.
    fn layout_paragraph(&mut self, paragraph: &str, base: usize) {
        let mut row = String::new();
        let mut row_start = base;
        let mut cols = 0;
        for (offset, ch) in paragraph.char_indices() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(1);
            if self.width > 0 && cols + w > self.width && !row.is_empty() {
                self.rows.push(std::mem::take(&mut row));
                self.starts.push(row_start);
                row_start = base + offset;
                cols = 0;
            }
            row.push(ch);
            cols += w;
        }
        self.rows.push(row);
        self.starts.push(row_start);
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Visual `(row, col)` of a cursor sitting before byte `cursor_byte`.
    ///
    /// Offsets past the end of the source are clamped to the last position.
    /// A cursor at the end of an exactly-full row reports the start of the
    /// row below, which may be one past the last stored row.
    pub fn locate(&self, cursor_byte: usize) -> (usize, usize) {
        let row = self
            .starts
            .partition_point(|&start| start <= cursor_byte)
            .saturating_sub(1);
        let text = &self.rows[row];
        let rel = (cursor_byte - self.starts[row]).min(text.len());
        let col = UnicodeWidthStr::width(&text[..rel]);
        if self.width > 0 && col >= self.width {
            (row + 1, 0)
        } else {
            (row, col)
        }
    }
}

/// New scroll offset that keeps `row` inside a window of `height` rows.
/// The window moves as little as possible; a zero-height window stays put.
pub fn scroll_into_view(row: usize, height: usize, offset: usize) -> usize {
    if height == 0 {
        return offset;
    }
    if row < offset {
        row
    } else if row >= offset + height {
        row + 1 - height
    } else {
        offset
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
