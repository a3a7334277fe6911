use axum::extract::{Path, State};
use nutrition_advisor_core::domain::session::{ports::SessionService, value_objects::SessionView};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/sessions/{session_id}",
    tag = "session",
    summary = "Get a session",
    description = "Returns the current state of the session; poll it while `is_pending` is true",
    responses(
        (status = 200, body = SessionView),
        (status = 404, description = "Session not found")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn get_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionView>, ApiError> {
    let view = state.service.get_session_view(session_id).await?;

    Ok(Response::OK(view))
}
