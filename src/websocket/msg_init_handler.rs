use tracing::{debug, error, info};

use crate::models::{Packet, PacketBody};
use crate::state::AppState;
use crate::websocket::broadcast::send_packet;
use crate::ws::classroom::{ClassError, ClassSession};
use crate::ws::connctx::ConnHandle;

/// Handle init - subscribe the sender and send it the class snapshot.
///
/// The snapshot goes out while the class is still locked, so no broadcast can
/// reach the new subscriber ahead of it. The join is recorded under the same
/// lock before subscribing, so a connection that was already released is never
/// added back and a concurrent release waits until the subscription is visible.
pub async fn handle_init_message(
    class: &ClassSession,
    conn: &ConnHandle,
    state: &AppState,
) -> Result<(), ClassError> {
    let mut guard = class.lock().await;
    if !state.connections.note_joined(conn.id(), class.id()) {
        debug!("Connection {} already released, not joining class {}", conn.id(), class.id());
        return Ok(());
    }
    if guard.subscribe(conn.clone()) {
        info!(
            "Connection {} joined class {} ({} subscribers)",
            conn.id(),
            class.id(),
            guard.subscriber_count()
        );
    }

    let init = Packet::new(class.id(), PacketBody::Init(guard.snapshot()));
    if let Err(e) = send_packet(conn, &init, &state.stats).await {
        error!("Failed to send init for class {}: {}", class.id(), e);
    }
    Ok(())
}
