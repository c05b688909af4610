use tracing::{debug, error, info, warn};

use crate::models::{ClassRequest, ErrorBody, InboundMessage, Packet};
use crate::state::AppState;
use crate::websocket::broadcast::send_packet;
use crate::websocket::msg_init_handler::handle_init_message;
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_student_handler::{handle_student_submit, handle_student_vote};
use crate::websocket::msg_teacher_handler::{
    handle_clear_submissions, handle_send_poll, handle_send_problem, handle_switch_submit,
};
use crate::ws::connctx::{ConnHandle, ConnId};

/// Handle one text frame received on `conn`.
///
/// The class is resolved before the message type is looked at, so any message
/// for an unknown class code, `ping` included, is answered with a 404. Errors
/// only ever go back to `conn`, and the connection stays open after them.
pub async fn dispatch_text(state: &AppState, conn: &ConnHandle, text: &str) {
    state.stats.record_received();

    let msg: InboundMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Dropping unparseable frame from connection {}: {}", conn.id(), e);
            return;
        }
    };

    let class = match state.registry.find(&msg.class_id) {
        Ok(class) => class,
        Err(e) => {
            info!("Connection {} sent '{}' for unknown class {}", conn.id(), msg.msg_type, msg.class_id);
            if let Some(body) = ErrorBody::for_class_error(&e) {
                reply_error(state, conn, &msg.class_id, body).await;
            }
            return;
        }
    };

    let request = match ClassRequest::parse(class.kind(), &msg.msg_type, msg.data) {
        Ok(Some(request)) => request,
        Ok(None) => {
            debug!("Ignoring '{}' for {} class {}", msg.msg_type, class.kind(), class.id());
            return;
        }
        Err(e) => {
            warn!("Malformed '{}' for class {}: {}", msg.msg_type, class.id(), e);
            reply_error(state, conn, class.id(), ErrorBody::malformed()).await;
            return;
        }
    };

    let result = match request {
        ClassRequest::Ping => handle_ping_message(&class, conn, state).await,
        ClassRequest::Init => handle_init_message(&class, conn, state).await,
        ClassRequest::StudentSubmit(payload) => handle_student_submit(&class, payload, state).await,
        ClassRequest::StudentSubmitPoll(option) => handle_student_vote(&class, &option, state).await,
        ClassRequest::TeacherSendProblem(msg) => handle_send_problem(&class, msg, state).await,
        ClassRequest::TeacherSendPoll(msg) => handle_send_poll(&class, msg, state).await,
        ClassRequest::TeacherClearSubmissions(msg) => handle_clear_submissions(&class, msg, state).await,
        ClassRequest::TeacherSwitchSubmit(msg) => handle_switch_submit(&class, msg, state).await,
    };

    if let Err(e) = result {
        match ErrorBody::for_class_error(&e) {
            Some(body) => {
                warn!("Rejected '{}' for class {} from {}: {}", msg.msg_type, class.id(), conn.id(), e);
                reply_error(state, conn, class.id(), body).await;
            }
            None => debug!("Ignoring '{}' for class {}: {}", msg.msg_type, class.id(), e),
        }
    }
}

async fn reply_error(state: &AppState, conn: &ConnHandle, class_id: &str, body: ErrorBody) {
    let packet = Packet::error(class_id, body);
    if let Err(e) = send_packet(conn, &packet, &state.stats).await {
        error!("Failed to send error to connection {}: {}", conn.id(), e);
    }
}

/// Forget a closed connection and unsubscribe it from every class it joined.
/// Safe to call more than once; only the first call does anything.
pub async fn release_connection(state: &AppState, conn_id: ConnId) {
    let Some(joined) = state.connections.release(conn_id) else {
        return;
    };

    for class_id in joined {
        match state.registry.lookup(&class_id) {
            Some(class) => {
                class.lock().await.unsubscribe(conn_id);
            }
            None => debug!("Class {} closed before connection {} left it", class_id, conn_id),
        }
    }
    info!("Connection {} released", conn_id);
}
