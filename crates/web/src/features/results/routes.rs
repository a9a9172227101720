use axum::{Router, routing::get};

use super::RESULTS_PATH;
use super::handlers::{create_result, list_results, method_not_allowed, preflight};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let endpoint = get(list_results)
        .post(create_result)
        .options(preflight)
        .fallback(method_not_allowed);

    Router::new()
        .route("/", endpoint.clone())
        .route(RESULTS_PATH, endpoint)
}
