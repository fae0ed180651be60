// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Top-level TUI application state and event loop.

use std::sync::Arc;

use axiom_client::{Difficulty, Topic, TutorClient};
use axiom_config::Config;
use axiom_core::{Message, TurnEvent};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    keys::{map_key, Action},
    layout::AppLayout,
    math::{render_message, StyledLines},
    tutor::{tutor_task, TutorRequest},
    input::{scroll_into_view, InputGrid},
    widgets::{draw_chat, draw_help, draw_input, draw_status},
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Options passed when constructing the TUI app.
pub struct AppOptions {
    pub topic: Topic,
    pub difficulty: Difficulty,
    /// Question submitted automatically on startup.
    pub initial_prompt: Option<String>,
}

/// Which pane currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Chat,
    Input,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// The top-level TUI application state.
///
/// The conversation itself lives in the background tutor task; the App keeps
/// a display mirror of the messages plus all view state (focus, scroll,
/// input buffer).
pub struct App {
    pub(crate) config: Arc<Config>,
    client: Arc<dyn TutorClient>,
    pub(crate) topic: Topic,
    pub(crate) difficulty: Difficulty,
    pub(crate) focus: FocusPane,
    /// Display mirror of the conversation, fed by [`TurnEvent`]s.
    pub(crate) messages: Vec<Message>,
    pub(crate) chat_lines: StyledLines,
    pub(crate) scroll_offset: u16,
    pub(crate) input_buffer: String,
    /// Byte offset of the cursor in `input_buffer`.
    pub(crate) input_cursor: usize,
    /// Index of the first visible wrapped line in the input box.
    pub(crate) input_scroll_offset: usize,
    pub(crate) show_help: bool,
    /// True between sending a question and receiving `Settled`.  While set,
    /// further submissions are dropped at the UI level (the controller
    /// enforces the same rule independently).
    pub(crate) tutor_busy: bool,
    pub(crate) pending_nav: bool,
    pub(crate) chat_height: u16,
    pub(crate) last_chat_inner_width: u16,
    pub(crate) last_input_inner_width: u16,
    pub(crate) last_input_inner_height: u16,
    /// When `true`, new replies automatically scroll the chat pane to the
    /// bottom.  Cleared when the user scrolls up manually.
    pub(crate) auto_scroll: bool,
    pub(crate) tutor_tx: Option<mpsc::Sender<TutorRequest>>,
    pub(crate) event_rx: Option<mpsc::Receiver<TurnEvent>>,
    initial_prompt: Option<String>,
}

impl App {
    pub fn new(config: Arc<Config>, client: Arc<dyn TutorClient>, opts: AppOptions) -> Self {
        Self {
            config,
            client,
            topic: opts.topic,
            difficulty: opts.difficulty,
            focus: FocusPane::Input,
            messages: Vec::new(),
            chat_lines: Vec::new(),
            scroll_offset: 0,
            input_buffer: String::new(),
            input_cursor: 0,
            input_scroll_offset: 0,
            show_help: false,
            tutor_busy: false,
            pending_nav: false,
            chat_height: 24,
            // Reasonable defaults before the first frame is drawn.
            last_chat_inner_width: 78,
            last_input_inner_width: 78,
            last_input_inner_height: 3,
            auto_scroll: true,
            tutor_tx: None,
            event_rx: None,
            initial_prompt: opts.initial_prompt,
        }
    }

    fn ascii(&self) -> bool {
        self.config.tui.ascii
    }

    /// Run the TUI event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        let (submit_tx, submit_rx) = mpsc::channel::<TutorRequest>(64);
        let (event_tx, event_rx)   = mpsc::channel::<TurnEvent>(64);

        self.tutor_tx = Some(submit_tx.clone());
        self.event_rx = Some(event_rx);

        let client     = self.client.clone();
        let topic      = self.topic;
        let difficulty = self.difficulty;
        tokio::spawn(async move {
            tutor_task(client, topic, difficulty, submit_rx, event_tx).await;
        });

        if let Some(prompt) = self.initial_prompt.take() {
            self.tutor_busy = true;
            let _ = submit_tx.send(TutorRequest::Submit(prompt)).await;
        }

        let mut crossterm_events = EventStream::new();

        loop {
            if let Ok(size) = terminal.size() {
                let layout = AppLayout::compute(Rect::new(0, 0, size.width, size.height));
                self.chat_height = layout.chat_inner_height().max(1);
                let chat_width = layout.chat_pane.width.saturating_sub(2).max(20);
                if chat_width != self.last_chat_inner_width {
                    self.last_chat_inner_width = chat_width;
                    self.rerender_chat();
                }
                self.last_input_inner_width  = layout.input_pane.width.saturating_sub(2);
                self.last_input_inner_height = layout.input_pane.height.saturating_sub(2);
            }

            let ascii = self.ascii();
            let grid = InputGrid::build(&self.input_buffer, self.last_input_inner_width as usize);
            let (cursor_row, cursor_col) = grid.locate(self.input_cursor);
            self.input_scroll_offset = scroll_into_view(
                cursor_row,
                self.last_input_inner_height as usize,
                self.input_scroll_offset,
            );

            terminal.draw(|frame| {
                let layout = AppLayout::new(frame);
                draw_status(
                    frame, layout.status_bar,
                    self.topic, self.difficulty, self.tutor_busy, ascii,
                );
                draw_chat(
                    frame, layout.chat_pane, &self.chat_lines, self.scroll_offset,
                    self.focus == FocusPane::Chat, ascii,
                );
                draw_input(
                    frame, layout.input_pane,
                    grid.rows(), cursor_row, cursor_col,
                    self.input_scroll_offset,
                    self.focus == FocusPane::Input, self.tutor_busy, ascii,
                );
                if self.show_help {
                    draw_help(frame, ascii);
                }
            })?;

            tokio::select! {
                Some(turn_event) = self.recv_turn_event() => {
                    self.handle_turn_event(turn_event);
                }
                Some(Ok(term_event)) = crossterm_events.next() => {
                    if self.handle_term_event(term_event).await { break; }
                }
            }
        }

        Ok(())
    }

    async fn recv_turn_event(&mut self) -> Option<TurnEvent> {
        if let Some(rx) = &mut self.event_rx { rx.recv().await } else { None }
    }

    // ── Turn events ───────────────────────────────────────────────────────────

    pub(crate) fn handle_turn_event(&mut self, event: TurnEvent) {
        match event {
            TurnEvent::UserMessage(m) | TurnEvent::AssistantMessage(m) => {
                self.messages.push(m);
                self.rerender_chat();
                if self.auto_scroll {
                    self.scroll_to_bottom();
                }
            }
            TurnEvent::Settled => {
                self.tutor_busy = false;
            }
        }
    }

    fn rerender_chat(&mut self) {
        let width = self.last_chat_inner_width;
        let ascii = self.ascii();
        self.chat_lines = self
            .messages
            .iter()
            .flat_map(|m| render_message(m, width, ascii))
            .collect();
    }

    // ── Terminal events ───────────────────────────────────────────────────────

    /// Returns `true` when the app should quit.
    pub(crate) async fn handle_term_event(&mut self, event: Event) -> bool {
        let key = match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => k,
            _ => return false,
        };

        if self.show_help {
            self.show_help = false;
            return false;
        }

        let was_pending = self.pending_nav;
        self.pending_nav = false;
        let action = map_key(key, self.focus == FocusPane::Input, was_pending);
        match action {
            Some(a) => self.dispatch(a).await,
            None => false,
        }
    }

    pub(crate) async fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Help => self.show_help = true,
            Action::NavPrefix => self.pending_nav = true,
            Action::FocusChat => self.focus = FocusPane::Chat,
            Action::FocusInput => self.focus = FocusPane::Input,

            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollPageUp => self.scroll_by(-(self.chat_height as i32 / 2)),
            Action::ScrollPageDown => self.scroll_by(self.chat_height as i32 / 2),
            Action::ScrollTop => {
                self.scroll_offset = 0;
                self.auto_scroll = false;
            }
            Action::ScrollBottom => self.scroll_to_bottom(),

            Action::InputChar(c) => {
                self.input_buffer.insert(self.input_cursor, c);
                self.input_cursor += c.len_utf8();
            }
            Action::InputNewline => {
                self.input_buffer.insert(self.input_cursor, '\n');
                self.input_cursor += 1;
            }
            Action::InputBackspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.input_buffer.remove(prev);
                    self.input_cursor = prev;
                }
            }
            Action::InputDelete => {
                if self.input_cursor < self.input_buffer.len() {
                    self.input_buffer.remove(self.input_cursor);
                }
            }
            Action::InputMoveCursorLeft => {
                if let Some(prev) = self.prev_boundary() {
                    self.input_cursor = prev;
                }
            }
            Action::InputMoveCursorRight => {
                if let Some(c) = self.input_buffer[self.input_cursor..].chars().next() {
                    self.input_cursor += c.len_utf8();
                }
            }
            Action::InputMoveLineStart => {
                self.input_cursor = self.line_start();
            }
            Action::InputMoveLineEnd => {
                self.input_cursor = self.line_end();
            }
            Action::InputDeleteToStart => {
                let start = self.line_start();
                self.input_buffer.drain(start..self.input_cursor);
                self.input_cursor = start;
            }
            Action::InputDeleteToEnd => {
                let end = self.line_end();
                self.input_buffer.drain(self.input_cursor..end);
            }

            Action::Submit => self.submit().await,

            Action::CycleTopic => {
                self.topic = self.topic.cycle();
                debug!(topic = %self.topic, "cycling topic");
                self.send_request(TutorRequest::SetTopic(self.topic)).await;
            }
            Action::CycleDifficulty => {
                self.difficulty = self.difficulty.cycle();
                debug!(difficulty = %self.difficulty, "cycling difficulty");
                self.send_request(TutorRequest::SetDifficulty(self.difficulty)).await;
            }
        }
        false
    }

    // ── Submit path ───────────────────────────────────────────────────────────

    async fn submit(&mut self) {
        if self.input_buffer.trim().is_empty() {
            return;
        }
        // One question in flight at a time.  Keep the typed text so nothing
        // the user wrote is lost.
        if self.tutor_busy {
            debug!("submit dropped: previous question still in flight");
            return;
        }
        let question = std::mem::take(&mut self.input_buffer);
        self.input_cursor = 0;
        self.input_scroll_offset = 0;
        self.tutor_busy = true;
        self.auto_scroll = true;
        self.send_request(TutorRequest::Submit(question)).await;
    }

    async fn send_request(&mut self, req: TutorRequest) {
        if let Some(tx) = &self.tutor_tx {
            let _ = tx.send(req).await;
        }
    }

    // ── Scrolling ─────────────────────────────────────────────────────────────

    fn max_scroll(&self) -> u16 {
        // Clamp in usize first; a long session can hold more lines than u16.
        let max = self.chat_lines.len().saturating_sub(self.chat_height as usize);
        max.min(u16::MAX as usize) as u16
    }

    fn scroll_by(&mut self, delta: i32) {
        let new = (self.scroll_offset as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll_offset = new as u16;
        // Manual scrolling disengages follow mode until the user returns
        // to the bottom.
        self.auto_scroll = self.scroll_offset == self.max_scroll();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
        self.auto_scroll = true;
    }

    // ── Cursor helpers ────────────────────────────────────────────────────────

    /// Byte offset of the character immediately before the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.input_buffer[..self.input_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// Byte offset of the start of the logical line containing the cursor.
    fn line_start(&self) -> usize {
        self.input_buffer[..self.input_cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Byte offset of the end of the logical line containing the cursor.
    fn line_end(&self) -> usize {
        self.input_buffer[self.input_cursor..]
            .find('\n')
            .map(|i| self.input_cursor + i)
            .unwrap_or(self.input_buffer.len())
    }
}

// ── Test helpers ──────────────────────────────────────────────────────────────

#[cfg(test)]
impl App {
    /// Construct a minimal `App` suitable for tests.
    ///
    /// The returned receiver is the mock tutor channel; call `rx.try_recv()`
    /// to assert on requests dispatched by submit actions.
    pub fn for_testing() -> (Self, mpsc::Receiver<TutorRequest>) {
        let config = Arc::new(Config::default());
        let client: Arc<dyn TutorClient> = Arc::new(axiom_client::MockTutorClient::default());
        let opts = AppOptions {
            topic: Topic::Algebra,
            difficulty: Difficulty::Easy,
            initial_prompt: None,
        };
        let (tx, rx) = mpsc::channel(64);
        let mut app = Self::new(config, client, opts);
        app.tutor_tx = Some(tx);
        (app, rx)
    }

    pub fn inject_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.input_cursor = text.len();
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
