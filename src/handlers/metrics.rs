use crate::{models::MetricsResponse, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::{Arc, Mutex, OnceLock};
use sysinfo::System;
use tracing::info;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// Report message counters and resource usage
pub async fn metrics(State(state): State<Arc<AppState>>) -> (StatusCode, Json<MetricsResponse>) {
    let active_classes = state.registry.active_count();
    let active_connections = state.connections.len() as u64;

    // System stats
    let (cpu_usage, memory_alloc, memory_free, memory_total, process_memory, process_cpu_usage) = {
        let sys_lock = SYSTEM_MONITOR.get_or_init(|| Mutex::new(System::new_all()));
        match sys_lock.lock() {
            Ok(mut sys) => {
                sys.refresh_cpu();
                sys.refresh_memory();
                let process = sysinfo::get_current_pid().ok().and_then(|pid| {
                    sys.refresh_process(pid);
                    sys.process(pid).map(|p| (p.memory(), p.cpu_usage()))
                });
                (
                    sys.global_cpu_info().cpu_usage(),
                    sys.used_memory(),
                    sys.free_memory(),
                    sys.total_memory(),
                    process.map(|(memory, _)| memory),
                    process.map(|(_, cpu)| cpu),
                )
            }
            Err(_) => (0.0, 0, 0, 0, None, None),
        }
    };

    info!(
        "Metrics: CPU: {:.2}%, Mem: {}/{} MB, Classes: {}, Conn: {}",
        cpu_usage,
        memory_alloc / 1024 / 1024,
        memory_total / 1024 / 1024,
        active_classes,
        active_connections
    );

    (
        StatusCode::OK,
        Json(MetricsResponse {
            status: "ONLINE".to_string(),
            uptime_secs: (Utc::now() - state.started_at).num_seconds(),
            active_classes,
            active_connections,
            total_messages_received: state.stats.received(),
            total_messages_sent: state.stats.sent(),
            failed_deliveries: state.stats.failed_deliveries(),
            process_memory,
            process_cpu_usage,
            cpu_usage,
            memory_alloc,
            memory_total,
            memory_free,
        }),
    )
}
