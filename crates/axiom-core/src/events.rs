// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use crate::Message;

/// Events emitted by the controller during a single turn.
/// Consumers (headless runner, TUI) subscribe to these to drive their output.
#[derive(Debug, Clone)]
pub enum TurnEvent {
    /// The user's message was accepted and appended (optimistic update:
    /// emitted before the remote request settles).
    UserMessage(Message),
    /// The assistant's reply — or the synthesized failure message — was
    /// appended.
    AssistantMessage(Message),
    /// The turn settled and the session is idle again.
    Settled,
}
