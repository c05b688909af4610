use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for the metrics endpoint
#[derive(Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    pub status: String,
    pub uptime_secs: i64,
    pub active_classes: u64,
    pub active_connections: u64,
    pub total_messages_received: u64,
    pub total_messages_sent: u64,
    pub failed_deliveries: u64,
    pub process_memory: Option<u64>,
    pub process_cpu_usage: Option<f32>,
    pub cpu_usage: f32,
    pub memory_alloc: u64,
    pub memory_total: u64,
    pub memory_free: u64,
}
