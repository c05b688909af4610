use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use uuid::Uuid;

pub type ConnId = Uuid;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection {0} is closed")]
    Closed(ConnId),
    #[error("connection {0} did not accept the packet within {1:?}")]
    Timeout(ConnId, Duration),
    #[error("failed to encode packet: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Address of one live connection.
///
/// Classes keep clones of this to reach their subscribers. The socket itself is
/// owned by the connection's writer task; once that task ends every send on a
/// stale handle fails with `TransportError::Closed`.
#[derive(Clone, Debug)]
pub struct ConnHandle {
    id: ConnId,
    tx: mpsc::Sender<String>,
    send_timeout: Duration,
}

impl ConnHandle {
    pub fn new(tx: mpsc::Sender<String>, send_timeout: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx,
            send_timeout,
        }
    }

    pub fn id(&self) -> ConnId {
        self.id
    }

    /// Queue a text frame for the writer task, waiting at most `send_timeout` for room.
    pub async fn send(&self, text: String) -> Result<(), TransportError> {
        self.tx
            .send_timeout(text, self.send_timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Closed(_) => TransportError::Closed(self.id),
                SendTimeoutError::Timeout(_) => TransportError::Timeout(self.id, self.send_timeout),
            })
    }
}

/// Every open connection, with the classes it subscribed to.
#[derive(Debug, Default)]
pub struct ConnectionSet {
    conns: Mutex<HashMap<ConnId, HashSet<String>>>,
}

impl ConnectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn conns(&self) -> MutexGuard<'_, HashMap<ConnId, HashSet<String>>> {
        match self.conns.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn register(&self, id: ConnId) {
        self.conns().entry(id).or_default();
    }

    /// Remember that `id` joined `class_id` so disconnect cleanup can find it.
    /// Returns false once the connection has been released.
    pub fn note_joined(&self, id: ConnId, class_id: &str) -> bool {
        match self.conns().get_mut(&id) {
            Some(joined) => {
                joined.insert(class_id.to_string());
                true
            }
            None => false,
        }
    }

    /// Drop the connection from tracking and hand back the classes it joined.
    /// Only the first call for a given id returns `Some`.
    pub fn release(&self, id: ConnId) -> Option<HashSet<String>> {
        self.conns().remove(&id)
    }

    pub fn contains(&self, id: ConnId) -> bool {
        self.conns().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.conns().len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_reports_closed_connection() {
        let (tx, rx) = mpsc::channel(1);
        let conn = ConnHandle::new(tx, Duration::from_millis(50));
        drop(rx);
        assert!(matches!(
            conn.send("x".to_string()).await,
            Err(TransportError::Closed(id)) if id == conn.id()
        ));
    }

    #[tokio::test]
    async fn send_times_out_on_full_queue() {
        let (tx, mut rx) = mpsc::channel(1);
        let conn = ConnHandle::new(tx, Duration::from_millis(20));
        conn.send("first".to_string()).await.unwrap();
        assert!(matches!(
            conn.send("second".to_string()).await,
            Err(TransportError::Timeout(_, _))
        ));
        assert_eq!(rx.recv().await.as_deref(), Some("first"));
    }

    #[test]
    fn release_hands_back_joined_classes_once() {
        let set = ConnectionSet::new();
        let id = Uuid::new_v4();
        set.register(id);
        assert!(set.note_joined(id, "abc123"));
        assert!(set.note_joined(id, "abc123"));
        assert!(set.note_joined(id, "def456"));
        assert_eq!(set.len(), 1);

        let joined = set.release(id).unwrap();
        assert_eq!(joined.len(), 2);
        assert!(joined.contains("abc123") && joined.contains("def456"));
        assert!(set.release(id).is_none());
        assert!(set.is_empty());

        // Joining after release does not resurrect the entry.
        assert!(!set.note_joined(id, "abc123"));
        assert!(!set.contains(id));
    }
}
