// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the tutoring service (the part before `/api/chat`).
    pub base_url: String,
    /// Per-request timeout in seconds.  `0` disables the timeout; the
    /// request then runs until the transport settles.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Default session preferences.  Both values are free-form here and parsed
/// into their enumerations at startup, so a typo fails with a clear message
/// instead of silently falling back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// "algebra" | "geometry" | "calculus"
    pub topic: String,
    /// "easy" | "medium" | "hard"
    pub difficulty: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { topic: "algebra".into(), difficulty: "easy".into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Use plain ASCII instead of Unicode box-drawing / Braille glyphs so
    /// fonts without wide Unicode support render cleanly.
    #[serde(default)]
    pub ascii: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { ascii: false }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
