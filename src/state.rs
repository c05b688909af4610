use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::ws::connctx::ConnectionSet;
use crate::ws::registry::ClassRegistry;

/// Process-wide message counters read by the metrics endpoint.
#[derive(Debug, Default)]
pub struct Stats {
    received: AtomicU64,
    sent: AtomicU64,
    failed_deliveries: AtomicU64,
}

impl Stats {
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed_delivery(&self) {
        self.failed_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn failed_deliveries(&self) -> u64 {
        self.failed_deliveries.load(Ordering::Relaxed)
    }
}

/// Everything the HTTP handlers and connection pumps share.
pub struct AppState {
    pub config: Config,
    pub registry: ClassRegistry,
    pub connections: ConnectionSet,
    pub stats: Stats,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let registry = ClassRegistry::new(config.class_id_length, config.class_idle_timeout());
        Self {
            config,
            registry,
            connections: ConnectionSet::new(),
            stats: Stats::default(),
            started_at: Utc::now(),
        }
    }

    /// Drop every live class. Called once the server has stopped accepting connections.
    pub fn shutdown(&self) {
        self.registry.clear();
    }
}
