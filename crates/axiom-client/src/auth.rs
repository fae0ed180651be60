// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Account endpoints and bearer-token persistence.
//!
//! The conversation core never touches credentials; it only requires that a
//! valid token string be injected into [`crate::HttpTutorClient`].  This
//! module is the single auth component: it obtains tokens from the service
//! and stores them across sessions in the user config directory.

use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::debug;

/// Token response from `POST /auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub token_type: String,
}

/// Log in with email + password and return the bearer credentials.
///
/// The service uses the OAuth2 password flow: credentials go as form fields
/// named `username` and `password`.
pub async fn login(base_url: &str, email: &str, password: &str) -> anyhow::Result<Credentials> {
    let base = base_url.trim_end_matches('/');
    let resp = reqwest::Client::new()
        .post(format!("{base}/auth/token"))
        .form(&[("username", email), ("password", password)])
        .send()
        .await
        .context("login request failed")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        bail!("login rejected ({status}): {text}");
    }

    let creds: Credentials = resp.json().await.context("decoding token response")?;
    debug!(token_type = %creds.token_type, "login succeeded");
    Ok(creds)
}

/// Create a new account via `POST /auth/register`.
pub async fn register(base_url: &str, email: &str, password: &str) -> anyhow::Result<()> {
    let base = base_url.trim_end_matches('/');
    let resp = reqwest::Client::new()
        .post(format!("{base}/auth/register"))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .context("register request failed")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        bail!("registration rejected ({status}): {text}");
    }
    Ok(())
}

/// Location of the persisted bearer token: `<config dir>/axiom/token`.
pub fn token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("axiom")
        .join("token")
}

/// Persist a bearer token for later sessions.
pub fn save_token(token: &str) -> anyhow::Result<()> {
    let path = token_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(&path, token).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "token saved");
    Ok(())
}

/// Load the persisted bearer token, if any.  A missing file is `Ok(None)`.
pub fn load_token() -> anyhow::Result<Option<String>> {
    let path = token_path();
    match std::fs::read_to_string(&path) {
        Ok(s) => {
            let tok = s.trim().to_string();
            if tok.is_empty() { Ok(None) } else { Ok(Some(tok)) }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Remove the persisted token (logout).
pub fn clear_token() -> anyhow::Result<()> {
    let path = token_path();
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
