use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::features::results::handlers;
use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(handlers::create_result, handlers::list_results),
    components(
        schemas(
            storage::dto::result::CreateResultRequest,
            storage::dto::result::ResultCreatedResponse,
            storage::dto::result::ResultResponse,
        )
    ),
    tags(
        (name = "results", description = "Shooting game leaderboard"),
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn routes() -> Router<AppState> {
    Router::new().route(OPENAPI_PATH, get(openapi))
}
