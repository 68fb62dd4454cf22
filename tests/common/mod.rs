//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};
use tower::ServiceExt;

use chat_relay::config::Settings;
use chat_relay::domain::{Message, MessageRepository, NewMessage};
use chat_relay::infrastructure::repositories::InMemoryMessageRepository;
use chat_relay::presentation::websocket::SocketEvent;
use chat_relay::shared::error::AppError;
use chat_relay::startup::{build_router, AppState};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Store that fails every call, standing in for an unreachable database
pub struct UnavailableStore;

#[async_trait]
impl MessageRepository for UnavailableStore {
    async fn find_all(&self) -> Result<Vec<Message>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _message: &NewMessage) -> Result<Message, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Test application driven through `tower::ServiceExt::oneshot`
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryMessageRepository>,
}

impl TestApp {
    /// Create a test application backed by an in-memory store
    pub fn new() -> Self {
        let store = Arc::new(InMemoryMessageRepository::new());
        let state = AppState::new(store.clone(), Settings::default());
        Self { state, store }
    }

    /// Create a test application whose store is always unreachable
    pub fn with_unavailable_store() -> Self {
        let state = AppState::new(Arc::new(UnavailableStore), Settings::default());
        Self {
            state,
            store: Arc::new(InMemoryMessageRepository::new()),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Serve the application on an ephemeral port for socket clients
    pub async fn spawn(&self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = self.router();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    /// Wait until the relay has registered `count` connections
    pub async fn wait_for_sessions(&self, count: usize) {
        for _ in 0..200 {
            if self.state.relay.session_count() == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {} sessions, relay has {}",
            count,
            self.state.relay.session_count()
        );
    }

    /// Wait until the store holds `count` messages
    pub async fn wait_for_stored(&self, count: usize) {
        for _ in 0..200 {
            if self.store.len() == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} stored messages, found {}", count, self.store.len());
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Open a socket to the relay
pub async fn connect_ws(addr: SocketAddr) -> WsClient {
    let (ws, _) = connect_async(format!("ws://{}/socket", addr))
        .await
        .expect("Failed to connect to relay");
    ws
}

/// Send a `chat message` event
pub async fn send_chat(ws: &mut WsClient, username: &str, message: &str) {
    let frame = json!({
        "event": "chat message",
        "data": {"username": username, "message": message}
    });
    send_raw(ws, frame.to_string()).await;
}

pub async fn send_raw(ws: &mut WsClient, text: String) {
    ws.send(tungstenite::Message::Text(text.into())).await.unwrap();
}

/// Next event within a second, or `None`
pub async fn next_event(ws: &mut WsClient) -> Option<SocketEvent> {
    next_event_within(ws, Duration::from_secs(1)).await
}

pub async fn next_event_within(ws: &mut WsClient, wait: Duration) -> Option<SocketEvent> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        let frame = tokio::time::timeout_at(deadline, ws.next()).await.ok()??;
        match frame {
            Ok(tungstenite::Message::Text(text)) => {
                return Some(serde_json::from_str(text.as_str()).unwrap());
            }
            Ok(tungstenite::Message::Close(_)) | Err(_) => return None,
            Ok(_) => continue,
        }
    }
}
