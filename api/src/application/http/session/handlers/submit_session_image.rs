use axum::extract::{Multipart, Path, State};
use nutrition_advisor_core::domain::session::{ports::SessionService, value_objects::SessionView};
use uuid::Uuid;

use crate::application::http::{
    multipart::read_image_upload,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/sessions/{session_id}/image",
    tag = "session",
    summary = "Submit a food photo",
    description = "Encodes the photo (multipart field `image`) and starts the analysis in the background. The session stays `awaiting` until the model answers.",
    responses(
        (status = 202, body = SessionView),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session already has a photo"),
        (status = 413, description = "Image too large"),
        (status = 415, description = "Image is not JPEG or PNG")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn submit_session_image(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<SessionView>, ApiError> {
    let upload = read_image_upload(&mut multipart).await?;

    let view = state.service.submit_image(session_id, upload).await?;

    Ok(Response::Accepted(view))
}
