use chrono::Utc;
use tracing::{debug, error};

use crate::models::{Packet, PacketBody, PongData};
use crate::state::AppState;
use crate::websocket::broadcast::send_packet;
use crate::ws::classroom::{ClassError, ClassSession};
use crate::ws::connctx::ConnHandle;

/// Handle ping - reply with a pong to the sender only.
pub async fn handle_ping_message(
    class: &ClassSession,
    conn: &ConnHandle,
    state: &AppState,
) -> Result<(), ClassError> {
    debug!("Ping received for class {} from {}", class.id(), conn.id());

    let pong = Packet::new(
        class.id(),
        PacketBody::Pong(PongData {
            date: Utc::now().to_rfc3339(),
        }),
    );
    if let Err(e) = send_packet(conn, &pong, &state.stats).await {
        error!("Failed to send pong for class {}: {}", class.id(), e);
    }
    Ok(())
}
