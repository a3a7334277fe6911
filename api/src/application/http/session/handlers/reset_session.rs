use axum::extract::{Path, State};
use nutrition_advisor_core::domain::session::{ports::SessionService, value_objects::SessionView};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/sessions/{session_id}/reset",
    tag = "session",
    summary = "Reset a session",
    description = "Clears the photo and the analysis. Not allowed while an analysis is pending.",
    responses(
        (status = 200, body = SessionView),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Analysis still pending")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn reset_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionView>, ApiError> {
    let view = state.service.reset_session(session_id).await?;

    Ok(Response::OK(view))
}
