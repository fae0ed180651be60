use async_trait::async_trait;

use crate::{TurnReply, TurnRequest};

/// Interface to the remote tutoring service.
///
/// Implementations must collapse transport failures, non-success HTTP status,
/// and malformed response bodies into a single `Err` outcome — the
/// conversation controller applies one uniform fallback for all of them and
/// performs no differentiated retry logic.
#[async_trait]
pub trait TutorClient: Send + Sync {
    /// Human-readable client name for status display.
    fn name(&self) -> &str;

    /// Send one conversation turn and await the tutor's reply.
    async fn send_turn(&self, req: &TurnRequest) -> anyhow::Result<TurnReply>;
}
