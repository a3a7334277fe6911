use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{index::index, page_url, reset::reset, upload::upload};
use crate::application::{
    http::server::app_state::AppState, session_middleware::session_middleware,
};

pub fn page_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    let mut router = Router::new()
        .route(&page_url(root_path), get(index))
        .route(&format!("{}/upload", root_path), post(upload))
        .route(&format!("{}/reset", root_path), post(reset));

    if !root_path.is_empty() {
        router = router.route(root_path, get(index));
    }

    router.layer(middleware::from_fn_with_state(
        state.clone(),
        session_middleware,
    ))
}
