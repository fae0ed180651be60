// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
pub mod auth;
mod client;
mod http;
mod mock;
mod types;

pub use client::TutorClient;
pub use http::HttpTutorClient;
pub use mock::{MockTutorClient, ScriptedOutcome, ScriptedTutorClient};
pub use types::{ChatMessage, Difficulty, Role, Step, Topic, TurnReply, TurnRequest};
