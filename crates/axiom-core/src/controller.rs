// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The conversation controller: owns the session, drives the
//! single-outstanding-request lifecycle, and absorbs every service failure
//! into a synthesized assistant message.

use std::sync::Arc;

use axiom_client::{Difficulty, Topic, TurnRequest, TutorClient};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{ConversationSession, Message, TurnEvent};

/// Fixed, non-technical reply shown when a turn fails for any reason.
pub const FAILURE_REPLY: &str = "Tutor is momentarily unavailable. Check your connection.";

/// Result of a `submit_turn` call.  Rejections are silent by design: no
/// state changes, no network call, nothing rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The turn ran to settlement (reply or synthesized failure appended).
    Completed,
    /// Input was empty or whitespace-only.
    RejectedEmpty,
    /// A previous turn's request is still outstanding.
    RejectedBusy,
}

pub struct ConversationController {
    session: ConversationSession,
    client: Arc<dyn TutorClient>,
}

impl ConversationController {
    pub fn new(client: Arc<dyn TutorClient>, topic: Topic, difficulty: Difficulty) -> Self {
        Self {
            session: ConversationSession::new(topic, difficulty),
            client,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ConversationSession {
        &mut self.session
    }

    /// Change the subject for subsequent turns.  Safe at any time: the value
    /// is read as a snapshot when a turn is submitted, never mid-flight.
    pub fn set_topic(&mut self, topic: Topic) {
        self.session.topic = topic;
    }

    /// Change the level for subsequent turns.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.difficulty = difficulty;
    }

    /// Submit one user turn and drive it to settlement.
    ///
    /// Accepted calls append the trimmed user message, flag the session
    /// pending, send the request with the pre-append history snapshot, and
    /// append either the assistant's reply or an `error`-flagged fallback.
    /// The pending flag is cleared exactly once on every exit path, and no
    /// failure ever propagates to the caller: the UI observes only the new
    /// messages and the cleared flag, via `tx`.
    pub async fn submit_turn(
        &mut self,
        raw: &str,
        tx: &mpsc::Sender<TurnEvent>,
    ) -> SubmitOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return SubmitOutcome::RejectedEmpty;
        }
        if self.session.pending {
            debug!("submit rejected: a turn is already outstanding");
            return SubmitOutcome::RejectedBusy;
        }

        // History is snapshotted before the new user message is appended; the
        // new turn's text travels in the `message` field only.
        let history = self.session.history_snapshot();
        let user = Message::user(text);
        self.session.push(user.clone());
        self.session.pending = true;
        let _ = tx.send(TurnEvent::UserMessage(user)).await;

        let req = TurnRequest {
            message: text.to_string(),
            topic: self.session.topic,
            difficulty: self.session.difficulty,
            history,
        };

        let assistant = match self.client.send_turn(&req).await {
            Ok(reply) => {
                debug!(steps = reply.steps.len(), "turn succeeded");
                Message::assistant_with_steps(reply.reply, reply.steps)
            }
            Err(e) => {
                warn!(error = %e, "turn failed; substituting fallback reply");
                Message::failure(FAILURE_REPLY)
            }
        };

        self.session.push(assistant.clone());
        self.session.pending = false;
        let _ = tx.send(TurnEvent::AssistantMessage(assistant)).await;
        let _ = tx.send(TurnEvent::Settled).await;
        SubmitOutcome::Completed
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axiom_client::{Role, ScriptedOutcome, ScriptedTutorClient, Step, TurnReply};

    fn controller(client: ScriptedTutorClient) -> (ConversationController, Arc<ScriptedTutorClient>) {
        let client = Arc::new(client);
        let c = ConversationController::new(client.clone(), Topic::Algebra, Difficulty::Easy);
        (c, client)
    }

    fn channel() -> (mpsc::Sender<TurnEvent>, mpsc::Receiver<TurnEvent>) {
        mpsc::channel(64)
    }

    fn drain(rx: &mut mpsc::Receiver<TurnEvent>) -> Vec<TurnEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    // ── Preconditions ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_input_is_rejected_without_state_change() {
        let (mut c, client) = controller(ScriptedTutorClient::always_reply("hi"));
        let (tx, mut rx) = channel();
        assert_eq!(c.submit_turn("   \n ", &tx).await, SubmitOutcome::RejectedEmpty);
        assert!(c.session().messages.is_empty());
        assert!(!c.session().pending);
        assert!(client.recorded_request().is_none(), "no network call expected");
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn submit_while_pending_is_rejected() {
        let (mut c, client) = controller(ScriptedTutorClient::always_reply("hi"));
        let (tx, mut rx) = channel();
        c.session_mut().pending = true;
        assert_eq!(c.submit_turn("question", &tx).await, SubmitOutcome::RejectedBusy);
        assert!(c.session().messages.is_empty());
        assert!(client.recorded_request().is_none());
        assert!(drain(&mut rx).is_empty());
    }

    // ── Successful turn ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn successful_turn_appends_user_then_assistant() {
        let (mut c, _) = controller(ScriptedTutorClient::always_reply("x equals 2"));
        let (tx, mut rx) = channel();
        assert_eq!(c.submit_turn("  solve 2x=4  ", &tx).await, SubmitOutcome::Completed);

        let msgs = &c.session().messages;
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[0].content, "solve 2x=4", "input must be trimmed");
        assert_eq!(msgs[1].role, Role::Assistant);
        assert_eq!(msgs[1].content, "x equals 2");
        assert!(!msgs[1].error);
        assert!(!c.session().pending);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], TurnEvent::UserMessage(_)));
        assert!(matches!(events[1], TurnEvent::AssistantMessage(_)));
        assert!(matches!(events[2], TurnEvent::Settled));
    }

    #[tokio::test]
    async fn returned_steps_are_kept_on_the_assistant_message() {
        let steps = vec![Step::new(1, "divide by 2"), Step::new(2, "x = 2")];
        let (mut c, _) = controller(ScriptedTutorClient::reply_with_steps("done", steps.clone()));
        let (tx, _rx) = channel();
        c.submit_turn("solve", &tx).await;
        assert_eq!(c.session().messages[1].steps, steps);
    }

    #[tokio::test]
    async fn reply_without_steps_yields_empty_step_list() {
        let (mut c, _) = controller(ScriptedTutorClient::always_reply("plain"));
        let (tx, _rx) = channel();
        c.submit_turn("q", &tx).await;
        assert!(c.session().messages[1].steps.is_empty());
    }

    // ── Failing turn ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn failure_is_absorbed_into_error_message() {
        let (mut c, _) = controller(ScriptedTutorClient::always_fail("connection refused"));
        let (tx, _rx) = channel();
        assert_eq!(c.submit_turn("help", &tx).await, SubmitOutcome::Completed);

        let msgs = &c.session().messages;
        assert_eq!(msgs.len(), 2, "exactly one user + one error message");
        assert!(msgs[1].error);
        assert_eq!(msgs[1].content, FAILURE_REPLY);
        assert!(!c.session().pending, "pending must clear on the failure path");
    }

    #[tokio::test]
    async fn session_recovers_after_a_failed_turn() {
        let (mut c, _) = controller(ScriptedTutorClient::new(vec![
            ScriptedOutcome::Failure("boom".into()),
            ScriptedOutcome::Reply(TurnReply::text("better now")),
        ]));
        let (tx, _rx) = channel();
        c.submit_turn("first", &tx).await;
        c.submit_turn("second", &tx).await;
        let msgs = &c.session().messages;
        assert_eq!(msgs.len(), 4);
        assert!(msgs[1].error);
        assert_eq!(msgs[3].content, "better now");
    }

    // ── History semantics ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn first_turn_sends_empty_history() {
        let (mut c, client) = controller(ScriptedTutorClient::always_reply("a"));
        let (tx, _rx) = channel();
        c.submit_turn("the question", &tx).await;
        let req = client.recorded_request().unwrap();
        assert_eq!(req.message, "the question");
        assert!(req.history.is_empty(), "own turn must not appear in history");
    }

    #[tokio::test]
    async fn second_turn_history_is_prior_pairs_without_steps() {
        let (mut c, client) = controller(ScriptedTutorClient::new(vec![
            ScriptedOutcome::Reply(TurnReply {
                reply: "with steps".into(),
                steps: vec![Step::new(1, "a step")],
                ..Default::default()
            }),
            ScriptedOutcome::Reply(TurnReply::text("second reply")),
        ]));
        let (tx, _rx) = channel();
        c.submit_turn("turn one", &tx).await;
        c.submit_turn("turn two", &tx).await;

        let req = client.recorded_request().unwrap();
        assert_eq!(req.message, "turn two");
        assert_eq!(req.history.len(), 2);
        assert_eq!(req.history[0].content, "turn one");
        assert_eq!(req.history[1].content, "with steps");
        // ChatMessage carries no step field at all; nothing more to strip.
    }

    #[tokio::test]
    async fn request_carries_current_topic_and_difficulty() {
        let (mut c, client) = controller(ScriptedTutorClient::always_reply("a"));
        let (tx, _rx) = channel();
        c.set_topic(Topic::Calculus);
        c.set_difficulty(Difficulty::Hard);
        c.submit_turn("limits?", &tx).await;
        let req = client.recorded_request().unwrap();
        assert_eq!(req.topic, Topic::Calculus);
        assert_eq!(req.difficulty, Difficulty::Hard);
    }

    // ── Event delivery is best-effort ─────────────────────────────────────────

    #[tokio::test]
    async fn dropped_receiver_does_not_poison_the_turn() {
        let (mut c, _) = controller(ScriptedTutorClient::always_reply("ok"));
        let (tx, rx) = channel();
        drop(rx);
        assert_eq!(c.submit_turn("q", &tx).await, SubmitOutcome::Completed);
        assert_eq!(c.session().messages.len(), 2);
        assert!(!c.session().pending);
    }
}
