// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use axiom_client::{Role, Step};
use serde::{Deserialize, Serialize};

/// One conversational turn's payload.
///
/// Created once and appended to the session's message list; never mutated
/// afterward.  `content` may be empty when `steps` is non-empty (a stepwise
/// solution with no summary prose).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Worked-solution steps; always empty for user messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    /// True only for controller-synthesized failure messages.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into(), steps: Vec::new(), error: false }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: text.into(), steps: Vec::new(), error: false }
    }

    pub fn assistant_with_steps(text: impl Into<String>, steps: Vec<Step>) -> Self {
        Self { role: Role::Assistant, content: text.into(), steps, error: false }
    }

    /// Synthesized assistant message standing in for a failed turn.
    pub fn failure(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: text.into(), steps: Vec::new(), error: true }
    }

    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_no_steps_and_no_error() {
        let m = Message::user("  hello  ");
        assert_eq!(m.role, Role::User);
        assert!(m.steps.is_empty());
        assert!(!m.error);
    }

    #[test]
    fn assistant_with_steps_keeps_order() {
        let m = Message::assistant_with_steps(
            "done",
            vec![Step::new(1, "first"), Step::new(2, "second")],
        );
        assert!(m.has_steps());
        assert_eq!(m.steps[0].text, "first");
        assert_eq!(m.steps[1].text, "second");
    }

    #[test]
    fn failure_message_is_flagged() {
        let m = Message::failure("sorry");
        assert_eq!(m.role, Role::Assistant);
        assert!(m.error);
    }

    #[test]
    fn serialisation_omits_empty_steps_and_false_error() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(!json.contains("steps"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn serialisation_round_trips_error_flag() {
        let json = serde_json::to_string(&Message::failure("x")).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert!(back.error);
    }
}
