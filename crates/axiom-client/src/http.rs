// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! HTTP driver for the tutoring service's `POST /api/chat` endpoint.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use tracing::debug;

use crate::{TurnReply, TurnRequest, TutorClient};

/// Tutoring-service client speaking the JSON chat wire format with bearer
/// authentication.
///
/// The bearer credential is supplied by the auth collaborator (see
/// [`crate::auth`]) and injected at construction; it is attached to every
/// request and never refreshed here.
pub struct HttpTutorClient {
    /// Full chat URL, e.g. `http://localhost:8000/api/chat`.
    chat_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpTutorClient {
    /// Build a client from the API base URL (the part before `/api/chat`)
    /// and a bearer token.
    ///
    /// `timeout_secs = 0` disables the request timeout entirely; the request
    /// then runs until the transport settles.
    pub fn new(base_url: &str, token: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = base_url.trim_end_matches('/');
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self {
            chat_url: format!("{base}/api/chat"),
            token: token.into(),
            client,
        })
    }
}

#[async_trait]
impl TutorClient for HttpTutorClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_turn(&self, req: &TurnRequest) -> anyhow::Result<TurnReply> {
        debug!(
            topic = %req.topic,
            difficulty = %req.difficulty,
            history_len = req.history.len(),
            "sending tutor request"
        );

        let resp = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await
            .context("tutor request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("tutor service error {status}: {text}");
        }

        let reply: TurnReply = resp.json().await.context("decoding tutor reply")?;
        debug!(steps = reply.steps.len(), "tutor reply received");
        Ok(reply)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_strips_trailing_slash() {
        let c = HttpTutorClient::new("http://localhost:8000/", "tok", 10).unwrap();
        assert_eq!(c.chat_url, "http://localhost:8000/api/chat");
    }

    #[test]
    fn zero_timeout_builds_client() {
        assert!(HttpTutorClient::new("http://localhost:8000", "tok", 0).is_ok());
    }
}
