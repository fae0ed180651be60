// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{Step, TurnReply, TurnRequest, TutorClient};

/// Deterministic mock client for tests.  Echoes the submitted message back
/// as the tutor's reply.
#[derive(Default)]
pub struct MockTutorClient;

#[async_trait]
impl TutorClient for MockTutorClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_turn(&self, req: &TurnRequest) -> anyhow::Result<TurnReply> {
        Ok(TurnReply::text(format!("MOCK: {}", req.message)))
    }
}

/// One pre-scripted outcome for [`ScriptedTutorClient`].
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Reply(TurnReply),
    /// Fail with the given message (stands in for any transport/service error).
    Failure(String),
}

/// A pre-scripted client.  Each call to `send_turn` pops the next outcome
/// from the front of the queue; once the queue is exhausted every further
/// call repeats the `tail` outcome, so the `always_*` constructors hold for
/// any number of calls.
pub struct ScriptedTutorClient {
    script: Mutex<Script>,
    /// The last `TurnRequest` seen by this client.  Written on each
    /// `send_turn` call so tests can inspect the history snapshot that was
    /// actually sent.
    pub last_request: Mutex<Option<TurnRequest>>,
}

struct Script {
    queued: Vec<ScriptedOutcome>,
    tail: ScriptedOutcome,
}

impl ScriptedTutorClient {
    /// Build a client from an ordered list of per-call outcomes.
    pub fn new(outcomes: Vec<ScriptedOutcome>) -> Self {
        Self::with_tail(
            outcomes,
            ScriptedOutcome::Reply(TurnReply::text("[no more scripts]")),
        )
    }

    fn with_tail(queued: Vec<ScriptedOutcome>, tail: ScriptedOutcome) -> Self {
        Self {
            script: Mutex::new(Script { queued, tail }),
            last_request: Mutex::new(None),
        }
    }

    /// Convenience: client whose every call returns a plain text reply.
    pub fn always_reply(reply: impl Into<String>) -> Self {
        Self::with_tail(vec![], ScriptedOutcome::Reply(TurnReply::text(reply)))
    }

    /// Convenience: client whose every call returns a stepwise solution.
    pub fn reply_with_steps(reply: impl Into<String>, steps: Vec<Step>) -> Self {
        Self::with_tail(
            vec![],
            ScriptedOutcome::Reply(TurnReply {
                reply: reply.into(),
                steps,
                ..Default::default()
            }),
        )
    }

    /// Convenience: client whose every call fails.
    pub fn always_fail(reason: impl Into<String>) -> Self {
        Self::with_tail(vec![], ScriptedOutcome::Failure(reason.into()))
    }

    /// Clone of the last request seen, for history-snapshot assertions.
    pub fn recorded_request(&self) -> Option<TurnRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TutorClient for ScriptedTutorClient {
    fn name(&self) -> &str {
        "scripted-mock"
    }

    async fn send_turn(&self, req: &TurnRequest) -> anyhow::Result<TurnReply> {
        *self.last_request.lock().unwrap() = Some(req.clone());
        let outcome = {
            let mut script = self.script.lock().unwrap();
            if script.queued.is_empty() {
                script.tail.clone()
            } else {
                script.queued.remove(0)
            }
        };
        match outcome {
            ScriptedOutcome::Reply(r) => Ok(r),
            ScriptedOutcome::Failure(msg) => Err(anyhow!(msg)),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
