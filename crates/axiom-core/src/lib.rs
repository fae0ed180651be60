// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod controller;
mod events;
mod message;
pub mod segment;
mod session;

pub use controller::{ConversationController, SubmitOutcome, FAILURE_REPLY};
pub use events::TurnEvent;
pub use message::Message;
pub use segment::{segment, MathSegment, SegmentKind};
pub use session::ConversationSession;
