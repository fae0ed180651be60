//! Background tutor task and request/event channel types.

use std::sync::Arc;

use axiom_client::{Difficulty, Topic, TutorClient};
use axiom_core::{ConversationController, SubmitOutcome, TurnEvent};
use tokio::sync::mpsc;
use tracing::debug;

/// Request sent from the TUI to the background tutor task.
#[derive(Debug)]
pub enum TutorRequest {
    /// Submit a new question (normal flow).
    Submit(String),
    /// Change the topic for subsequent turns.
    SetTopic(Topic),
    /// Change the difficulty for subsequent turns.
    SetDifficulty(Difficulty),
}

/// Background task that owns the [`ConversationController`] and forwards
/// turn events back to the TUI.
pub async fn tutor_task(
    client: Arc<dyn TutorClient>,
    topic: Topic,
    difficulty: Difficulty,
    mut rx: mpsc::Receiver<TutorRequest>,
    tx: mpsc::Sender<TurnEvent>,
) {
    let mut controller = ConversationController::new(client, topic, difficulty);

    while let Some(req) = rx.recv().await {
        match req {
            TutorRequest::Submit(msg) => {
                debug!(msg_len = msg.len(), "tutor task received question");
                let outcome = controller.submit_turn(&msg, &tx).await;
                if outcome != SubmitOutcome::Completed {
                    // A rejected submission never produces an assistant reply,
                    // so the UI still needs a Settled to clear its busy flag.
                    debug!(?outcome, "submission rejected");
                    let _ = tx.send(TurnEvent::Settled).await;
                }
            }
            TutorRequest::SetTopic(topic) => {
                debug!(%topic, "tutor task switching topic");
                controller.set_topic(topic);
            }
            TutorRequest::SetDifficulty(difficulty) => {
                debug!(%difficulty, "tutor task switching difficulty");
                controller.set_difficulty(difficulty);
            }
        }
    }
}
