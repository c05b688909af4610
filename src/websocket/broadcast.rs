use tracing::{debug, error, warn};

use crate::models::Packet;
use crate::state::Stats;
use crate::ws::classroom::ClassState;
use crate::ws::connctx::{ConnHandle, TransportError};

/// Outcome of one broadcast
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Send a packet to a single connection.
pub async fn send_packet(conn: &ConnHandle, packet: &Packet, stats: &Stats) -> Result<(), TransportError> {
    let text = packet.to_text()?;
    deliver(conn, text, stats).await
}

async fn deliver(conn: &ConnHandle, text: String, stats: &Stats) -> Result<(), TransportError> {
    match conn.send(text).await {
        Ok(()) => {
            stats.record_sent();
            Ok(())
        }
        Err(e) => {
            stats.record_failed_delivery();
            Err(e)
        }
    }
}

/// Send a packet to every current subscriber of a class.
///
/// A subscriber whose delivery fails is logged and skipped. It stays
/// subscribed until its own connection cleanup removes it.
pub async fn broadcast(class: &ClassState, packet: &Packet, stats: &Stats) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    let text = match packet.to_text() {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to encode broadcast for class {}: {}", packet.class_id, e);
            return report;
        }
    };

    for conn in class.subscribers() {
        match deliver(conn, text.clone(), stats).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                warn!("Broadcast for class {} not delivered: {}", packet.class_id, e);
                report.failed += 1;
            }
        }
    }

    debug!(
        "Broadcast for class {}: {} delivered, {} failed",
        packet.class_id, report.delivered, report.failed
    );
    report
}
