//! HTTP and WebSocket clients used by the e2e tests

use futures_util::{SinkExt, StreamExt};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(150);

pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn create_class(&self, password: &str, class_type: Option<&str>) -> Response {
        self.client
            .post(format!("{}/class/create", self.base_url))
            .json(&json!({"password": password, "class_type": class_type}))
            .send()
            .await
            .expect("create request failed")
    }

    /// Create a class and return its id.
    pub async fn open_class(&self, password: &str, class_type: Option<&str>) -> String {
        let response = self.create_class(password, class_type).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("create response is json");
        assert_eq!(body["success"], true);
        body["class_id"].as_str().expect("class_id").to_string()
    }

    pub async fn close_class(&self, class_id: &str) -> Response {
        self.client
            .post(format!("{}/class/close", self.base_url))
            .json(&json!({"class_id": class_id}))
            .send()
            .await
            .expect("close request failed")
    }

    pub async fn metrics(&self, user: &str, password: Option<&str>) -> Response {
        self.client
            .get(format!("{}/metrics", self.base_url))
            .basic_auth(user, password)
            .send()
            .await
            .expect("metrics request failed")
    }
}

pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url)
            .await
            .expect("Failed to connect to WebSocket");
        Self { stream }
    }

    pub async fn send(&mut self, msg: Value) {
        self.stream
            .send(Message::Text(msg.to_string().into()))
            .await
            .expect("send failed");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("send failed");
    }

    /// Next JSON packet from the server, skipping control frames.
    pub async fn recv(&mut self) -> Value {
        let result = timeout(RECV_TIMEOUT, async {
            while let Some(msg) = self.stream.next().await {
                match msg.expect("websocket error") {
                    Message::Text(text) => {
                        return serde_json::from_str::<Value>(&text).expect("server sent json");
                    }
                    Message::Close(_) => panic!("server closed the connection"),
                    _ => continue,
                }
            }
            panic!("stream ended");
        })
        .await;
        result.expect("timed out waiting for a packet")
    }

    /// Assert nothing arrives for a short window.
    pub async fn assert_silent(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) = timeout(SILENCE_WINDOW, self.stream.next()).await {
            panic!("unexpected packet: {}", text.as_str());
        }
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.ok();
    }
}
