// Router tests for the HTTP surface (requires `--features web`).

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use trustgate::moderation::{FallbackScorer, ModerationGateway};
use trustgate::publication::PublicationGate;
use trustgate::web::{build_router, AppState};

fn app() -> axum::Router {
    let gateway = ModerationGateway::new(Arc::new(FallbackScorer::default()));
    build_router(AppState {
        gate: PublicationGate::new(gateway),
    })
}

async fn post_json(path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_returns_ok() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn verify_content_returns_verdict() {
    let (status, json) = post_json(
        "/ai/verify-content",
        serde_json::json!({ "text": "love and peace" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trust_score"], 80);
    assert_eq!(json["trust_tag"], "🟢");
}

#[tokio::test]
async fn verify_content_rejects_oversized_text() {
    let (status, json) = post_json(
        "/ai/verify-content",
        serde_json::json!({ "text": "a".repeat(10_001) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn moderate_accepts_and_returns_record() {
    let (status, json) = post_json(
        "/posts/moderate",
        serde_json::json!({ "text": "community support", "action_type": 0, "tags": ["garden"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["decision"]["accepted"], true);
    assert_eq!(json["record"]["ai_trust_score"], 80);
    assert_eq!(json["record"]["ai_verified"], false);
}

#[tokio::test]
async fn moderate_rejects_with_score_in_message() {
    let (status, json) = post_json(
        "/posts/moderate",
        serde_json::json!({ "text": "fake scam spam" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("Trust score: 40"), "{error}");
}

#[tokio::test]
async fn moderate_rejects_empty_submission() {
    let (status, json) = post_json("/posts/moderate", serde_json::json!({ "text": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Post must have text, image, or both.");
}
