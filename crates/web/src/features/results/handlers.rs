use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{
        Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS},
    },
    response::{IntoResponse, Response},
};
use storage::dto::result::{
    CreateResultRequest, LeaderboardParams, ResultCreatedResponse, ResultResponse,
};

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::services;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// CORS preflight for OPTIONS requests that reach the router. Never touches
/// the store, so it works unconfigured too.
pub async fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/shooting-results",
    request_body = CreateResultRequest,
    responses(
        (status = 201, description = "Result saved successfully", body = ResultCreatedResponse),
        (status = 400, description = "Request body is not valid JSON"),
        (status = 500, description = "Store not configured or unavailable")
    ),
    tag = "results"
)]
pub async fn create_result(State(state): State<AppState>, body: Bytes) -> WebResult<Response> {
    let store = state.store()?;
    let request = parse_result(&body)?;

    let id = services::save_result(store, &request).await?;

    Ok((StatusCode::CREATED, Json(ResultCreatedResponse::new(id))).into_response())
}

/// An empty body is read as `{}`.
fn parse_result(body: &[u8]) -> WebResult<CreateResultRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateResultRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| WebError::BadRequest(format!("Invalid request body: {}", e)))
}

#[utoipa::path(
    get,
    path = "/api/shooting-results",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Leaderboard ordered by score, then accuracy", body = Vec<ResultResponse>),
        (status = 400, description = "limit is not a non-negative integer"),
        (status = 500, description = "Store not configured or unavailable")
    ),
    tag = "results"
)]
pub async fn list_results(
    State(state): State<AppState>,
    method: Method,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> WebResult<Response> {
    let store = state.store()?;

    // axum routes HEAD to GET handlers
    if method == Method::HEAD {
        return Err(WebError::MethodNotAllowed);
    }

    let Query(params) = params.map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
    let limit = params.limit()?;

    let results = services::top_results(store, limit).await?;

    let response: Vec<ResultResponse> = results.into_iter().map(ResultResponse::from).collect();

    Ok(Json(response).into_response())
}

/// Any method other than GET, POST and OPTIONS.
pub async fn method_not_allowed(State(state): State<AppState>) -> WebResult<Response> {
    state.store()?;
    Err(WebError::MethodNotAllowed)
}

/// Unknown paths. OPTIONS is still answered so preflights never fail.
pub async fn not_found(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight().await;
    }
    WebError::NotFound.into_response()
}
