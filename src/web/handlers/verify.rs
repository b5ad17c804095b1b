// POST /ai/verify-content: score a text without deciding publication.
//
// Always 200 with a verdict for in-bounds text; moderation itself can't fail.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::publication::submission::MAX_TEXT_CHARS;
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct VerifyRequest {
    text: String,
}

pub async fn verify_content(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Response {
    if body.text.chars().count() > MAX_TEXT_CHARS {
        return api_error(StatusCode::BAD_REQUEST, "Text exceeds 10000 characters");
    }

    let verdict = state.gate.gateway().evaluate(&body.text).await;
    Json(verdict).into_response()
}
