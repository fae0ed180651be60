// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod app;
mod input;
mod keys;
mod layout;
mod math;
mod tutor;
mod widgets;

pub use app::{App, AppOptions};
pub use math::{math_span, render_content, StyledLines};
pub use tutor::{tutor_task, TutorRequest};
