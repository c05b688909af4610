use tracing::info;

use crate::models::{Packet, PacketBody, PasswordData, SendPollData, SendProblemData};
use crate::state::AppState;
use crate::websocket::broadcast::broadcast;
use crate::ws::classroom::{ClassError, ClassSession};

// Each handler authenticates, mutates and broadcasts under one lock of the class.
// A wrong password returns before anything changes or is sent.

/// Handle teacherSendProblem
pub async fn handle_send_problem(
    class: &ClassSession,
    msg: SendProblemData,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    let problem = guard.set_problem(&msg.password, msg.description, msg.code)?;
    info!("Class {} problem updated", class.id());

    let packet = Packet::new(class.id(), PacketBody::Problem(problem));
    broadcast(&guard, &packet, &state.stats).await;
    Ok(())
}

/// Handle teacherSendPoll
pub async fn handle_send_poll(
    class: &ClassSession,
    msg: SendPollData,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    let poll = guard.set_poll(&msg.password, msg.poll_question, msg.options)?;
    info!("Class {} poll updated with {} options", class.id(), poll.options.len());

    let packet = Packet::new(class.id(), PacketBody::Poll(poll));
    broadcast(&guard, &packet, &state.stats).await;
    Ok(())
}

/// Handle teacherClearSubmissions
pub async fn handle_clear_submissions(
    class: &ClassSession,
    msg: PasswordData,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    guard.clear_submissions(&msg.password)?;
    info!("Class {} submissions cleared", class.id());

    let packet = Packet::new(class.id(), PacketBody::SubmissionList(guard.submission_list()));
    broadcast(&guard, &packet, &state.stats).await;
    Ok(())
}

/// Handle teacherSwitchSubmit
pub async fn handle_switch_submit(
    class: &ClassSession,
    msg: PasswordData,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    let submission_state = guard.switch_submission_state(&msg.password)?;
    info!("Class {} submissions now {:?}", class.id(), submission_state);

    let packet = Packet::new(class.id(), PacketBody::SubmissionState(submission_state));
    broadcast(&guard, &packet, &state.stats).await;
    Ok(())
}
