use axum::extract::State;
use nutrition_advisor_core::domain::session::{ports::SessionService, value_objects::SessionView};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/sessions",
    tag = "session",
    summary = "Create a session",
    description = "Creates an idle session ready to receive one food photo",
    responses(
        (status = 201, body = SessionView)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Response<SessionView>, ApiError> {
    let session = state.service.get_or_create_session(None).await?;

    Ok(Response::Created(SessionView::from(&session)))
}
