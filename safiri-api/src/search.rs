use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use safiri_session::SubmitError;
use safiri_shared::{RawSearchInput, UiSnapshot};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct SearchResponse {
    status: String,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    #[serde(flatten)]
    ui: UiSnapshot,
    scroll_locked: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/search", post(submit_search))
        .route("/v1/session", get(session_snapshot))
}

async fn submit_search(
    State(state): State<AppState>,
    Json(raw): Json<RawSearchInput>,
) -> Result<(StatusCode, Json<SearchResponse>), AppError> {
    info!(from = %raw.from, to = %raw.to, "Search submitted");

    match state.coordinator.submit(raw).await {
        Ok(()) => Ok((
            StatusCode::ACCEPTED,
            Json(SearchResponse {
                status: "accepted".to_string(),
            }),
        )),
        Err(err @ SubmitError::Validation(_)) => {
            Err(AppError::ValidationError(err.message_key().to_string()))
        }
        Err(err @ SubmitError::WidgetUnavailable) => {
            Err(AppError::WidgetUnavailable(err.message_key().to_string()))
        }
    }
}

/// Current UI signal state plus the scroll-lock intent the page mirrors
/// into its body styles.
async fn session_snapshot(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        ui: state.coordinator.signals().snapshot(),
        scroll_locked: state.surface.is_locked(),
    })
}
