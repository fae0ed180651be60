// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use axiom_client::{ChatMessage, Difficulty, Topic};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Message;

/// In-memory conversation session.
///
/// Exclusively owned and mutated by the controller; the message list is
/// append-only (no deletion or edit operation exists) and insertion order is
/// chronological turn order.
#[derive(Debug)]
pub struct ConversationSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    /// True while a turn's remote request is outstanding.
    pub pending: bool,
    /// User-selected subject; mutable between turns, read at submit time.
    pub topic: Topic,
    /// User-selected level; mutable between turns, read at submit time.
    pub difficulty: Difficulty,
}

impl ConversationSession {
    pub fn new(topic: Topic, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            messages: Vec::new(),
            pending: false,
            topic,
            difficulty,
        }
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    /// The `{role, content}` history snapshot sent with a new request.
    ///
    /// Steps are flattened away: they are a display-only augmentation, not
    /// part of the conversational record the service receives back.
    pub fn history_snapshot(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|m| ChatMessage::new(m.role, m.content.clone()))
            .collect()
    }

    /// Number of completed turns (user/assistant pairs).
    pub fn turn_count(&self) -> usize {
        self.messages.len() / 2
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axiom_client::{Role, Step};

    #[test]
    fn new_session_has_unique_id() {
        let a = ConversationSession::new(Topic::Algebra, Difficulty::Easy);
        let b = ConversationSession::new(Topic::Algebra, Difficulty::Easy);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_session_starts_empty_and_idle() {
        let s = ConversationSession::new(Topic::Algebra, Difficulty::Easy);
        assert!(s.messages.is_empty());
        assert!(!s.pending);
        assert_eq!(s.turn_count(), 0);
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut s = ConversationSession::new(Topic::Algebra, Difficulty::Easy);
        s.push(Message::user("q"));
        s.push(Message::assistant("a"));
        assert_eq!(s.messages[0].role, Role::User);
        assert_eq!(s.messages[1].role, Role::Assistant);
        assert_eq!(s.turn_count(), 1);
    }

    #[test]
    fn history_snapshot_maps_role_and_content_only() {
        let mut s = ConversationSession::new(Topic::Geometry, Difficulty::Hard);
        s.push(Message::user("what is a circle"));
        s.push(Message::assistant_with_steps(
            "see steps",
            vec![Step::new(1, "draw it")],
        ));
        let hist = s.history_snapshot();
        assert_eq!(hist.len(), 2);
        assert_eq!(hist[0], ChatMessage::new(Role::User, "what is a circle"));
        // Step detail is flattened away.
        assert_eq!(hist[1], ChatMessage::new(Role::Assistant, "see steps"));
    }

    #[test]
    fn history_snapshot_includes_error_messages() {
        let mut s = ConversationSession::new(Topic::Algebra, Difficulty::Easy);
        s.push(Message::user("q"));
        s.push(Message::failure("unavailable"));
        let hist = s.history_snapshot();
        assert_eq!(hist[1].content, "unavailable");
    }
}
