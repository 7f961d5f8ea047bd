#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::sync::Notify;

use chat_widget::error::WidgetError;
use chat_widget::message::{ChatRequest, ChatResponse};
use chat_widget::services::client::ChatClient;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Backend that answers every message with a fixed reply.
pub fn replying(reply: &'static str) -> Router {
    Router::new().route(
        "/api/chat",
        post(move |Json(_req): Json<ChatRequest>| async move { Json(json!({ "reply": reply })) }),
    )
}

pub fn failing(status: StatusCode) -> Router {
    Router::new().route(
        "/api/chat",
        post(move || async move { (status, Json(json!({ "error": "Internal server error" }))) }),
    )
}

pub fn returning(body: Value) -> Router {
    Router::new().route("/api/chat", post(move || async move { Json(body) }))
}

pub fn returning_raw(body: &'static str) -> Router {
    Router::new().route("/api/chat", post(move || async move { (StatusCode::OK, body) }))
}

/// Reply with the request's content type and raw body so tests can inspect them.
pub fn mirroring() -> Router {
    Router::new().route(
        "/api/chat",
        post(|headers: HeaderMap, body: String| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!({ "reply": format!("{content_type}|{body}") }))
        }),
    )
}

/// Minimal stand-in for the real chat server: rejects empty messages and
/// exposes a health document.
pub fn mock_backend() -> Router {
    Router::new()
        .route(
            "/api/chat",
            post(|Json(req): Json<ChatRequest>| async move {
                let message = req.message.trim();
                if message.is_empty() {
                    return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Empty message" })));
                }
                (StatusCode::OK, Json(json!({ "reply": format!("You asked: {message}"), "verses": [] })))
            }),
        )
        .route(
            "/api/health",
            get(|| async {
                Json(json!({ "status": "healthy", "service": "mock-chat", "version": "1.0.0" }))
            }),
        )
}

/// In-process client replying `echo: <message>`.
#[derive(Default)]
pub struct Echo {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ChatClient for Echo {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChatResponse { reply: Some(format!("echo: {}", request.message)) })
    }
}

/// Client that blocks each request until the test releases it.
#[derive(Default, Clone)]
pub struct Gated {
    pub release: Arc<Notify>,
    pub calls: Arc<AtomicUsize>,
}

impl Gated {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Yield until `n` requests have reached the gate.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ChatClient for Gated {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, WidgetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(ChatResponse { reply: Some(format!("echo: {}", request.message)) })
    }
}
