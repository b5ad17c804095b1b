// Shared helpers: a local stand-in for the chat-completions endpoint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::Value;

/// How the fake endpoint answers.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    /// 200 with a chat body whose first completion content is this string.
    Content(String),
    /// Any status with a raw body.
    Raw(StatusCode, String),
    /// Sleep, then answer with the inner reply.
    Delayed(Duration, Box<Reply>),
}

/// The last request the fake endpoint received.
#[derive(Default)]
#[allow(dead_code)]
pub struct Captured {
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Wrap model content in a chat-completions response body.
pub fn chat_body(content: &str) -> String {
    serde_json::json!({
        "id": "gen-test",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
    .to_string()
}

fn respond(reply: Reply) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>> {
    Box::pin(async move {
        match reply {
            Reply::Content(content) => (
                StatusCode::OK,
                [("content-type", "application/json")],
                chat_body(&content),
            )
                .into_response(),
            Reply::Raw(status, body) => {
                (status, [("content-type", "application/json")], body).into_response()
            }
            Reply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                respond(*inner).await
            }
        }
    })
}

/// Spawn the fake endpoint on an ephemeral port. Returns its URL and the
/// capture slot for the most recent request.
#[allow(dead_code)]
pub async fn spawn_endpoint(reply: Reply) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let slot = captured.clone();

    let app = Router::new().route(
        "/api/v1/chat/completions",
        post(move |headers: HeaderMap, body: String| {
            let reply = reply.clone();
            let slot = slot.clone();
            async move {
                {
                    let mut c = slot.lock().unwrap();
                    c.authorization = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    c.body = serde_json::from_str(&body).ok();
                }
                respond(reply).await
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/v1/chat/completions"), captured)
}
