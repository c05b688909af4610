//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port with an empty registry.

use classroom_sync::config::Config;
use classroom_sync::routes::create_routes;
use classroom_sync::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-secret";

const SERVER_READY_TIMEOUT_MS: u64 = 5_000;

/// Test server instance. Shuts down when dropped.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Shared state, for asserting on registry and connection bookkeeping
    pub state: Arc<AppState>,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            send_timeout_ms: 1_000,
            ..Config::default()
        };
        Self::spawn_with(config).await
    }

    pub async fn spawn_with(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = Arc::new(AppState::new(config));
        let app = create_routes(state.clone());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            state,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    pub fn ws_url(&self, path: &str) -> String {
        self.base_url.replace("http://", "ws://") + path
    }

    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);
        while start.elapsed() < timeout {
            if let Ok(response) = client.get(format!("{}/health", self.base_url)).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Server did not become ready within {:?}", timeout);
    }

    /// Poll until the server tracks `expected` open connections.
    pub async fn wait_for_connections(&self, expected: usize) {
        let start = std::time::Instant::now();
        while self.state.connections.len() != expected {
            if start.elapsed() > Duration::from_secs(5) {
                panic!(
                    "expected {} connections, server tracks {}",
                    expected,
                    self.state.connections.len()
                );
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    pub async fn subscriber_count(&self, class_id: &str) -> usize {
        let class = self.state.registry.lookup(class_id).expect("class is open");
        let count = class.lock().await.subscriber_count();
        count
    }
}
