// POST /posts/moderate: run the publication gate on a submission.
//
// Returns 200 with the decision and the moderation record to persist.
// Returns 400 with the rejection message (score + explanation) when the
// gate rejects, or with the validation message for a malformed submission.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use crate::publication::Submission;
use crate::web::{api_error, AppState};

pub async fn moderate_post(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> Response {
    let decision = match state.gate.review(&submission).await {
        Ok(decision) => decision,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    if let Some(message) = decision.rejection_message() {
        return api_error(StatusCode::BAD_REQUEST, &message);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "Post accepted",
            "decision": decision,
            "record": decision.record(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}
