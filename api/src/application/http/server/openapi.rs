use utoipa::OpenApi;

use crate::application::http::{
    analysis::router::AnalysisApiDoc,
    health::__path_health,
    server::config::__path_get_config,
    session::router::SessionApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutrition Advisor API"
    ),
    paths(health),
    nest(
        (path = "/api", api = AnalysisApiDoc),
        (path = "/api", api = SessionApiDoc),
        (path = "/api", api = ConfigApiDoc),
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_config))]
pub struct ConfigApiDoc;
