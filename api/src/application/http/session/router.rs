use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    create_session::{__path_create_session, create_session},
    get_session::{__path_get_session, get_session},
    reset_session::{__path_reset_session, reset_session},
    submit_session_image::{__path_submit_session_image, submit_session_image},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(create_session, get_session, submit_session_image, reset_session))]
pub struct SessionApiDoc;

pub fn session_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/api/sessions", root_path), post(create_session))
        .route(
            &format!("{}/api/sessions/{{session_id}}", root_path),
            get(get_session),
        )
        .route(
            &format!("{}/api/sessions/{{session_id}}/image", root_path),
            post(submit_session_image),
        )
        .route(
            &format!("{}/api/sessions/{{session_id}}/reset", root_path),
            post(reset_session),
        )
}
