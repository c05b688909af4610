use serde_json::Value;
use tracing::info;

use crate::models::{Packet, PacketBody};
use crate::state::AppState;
use crate::websocket::broadcast::broadcast;
use crate::ws::classroom::{ClassError, ClassSession};

/// Handle studentSubmit - append the submission and broadcast the list.
pub async fn handle_student_submit(
    class: &ClassSession,
    payload: Value,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    let count = guard.append_submission(payload)?.len();
    info!("Class {} received submission #{}", class.id(), count);

    let packet = Packet::new(class.id(), PacketBody::SubmissionList(guard.submission_list()));
    broadcast(&guard, &packet, &state.stats).await;
    Ok(())
}

/// Handle studentSubmitPoll - count the vote and broadcast the tally.
pub async fn handle_student_vote(
    class: &ClassSession,
    option: &str,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    guard.record_vote(option)?;
    info!("Class {} received a vote for '{}'", class.id(), option);

    let packet = Packet::new(class.id(), PacketBody::SubmissionList(guard.submission_list()));
    broadcast(&guard, &packet, &state.stats).await;
    Ok(())
}
