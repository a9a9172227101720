use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    MissingDatabaseUrl,
    MethodNotAllowed,
    NotFound,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::MissingDatabaseUrl => write!(f, "DATABASE_URL not configured"),
            Self::MethodNotAllowed => write!(f, "Method not allowed"),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl std::error::Error for WebError {}

/// JSON body of an error response, also kept as a response extension.
///
/// axum empties the body of every HEAD response, so callers that are not
/// bound by HTTP framing read the body back from here.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBody(pub serde_json::Value);

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingDatabaseUrl => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(e) => {
                if e.is_unavailable() {
                    tracing::error!("Result store unavailable: {:?}", e);
                } else {
                    tracing::error!("Storage error: {:?}", e);
                }
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::MissingDatabaseUrl => {
                tracing::warn!("Rejecting request: DATABASE_URL not configured");
                json!({
                    "error": "DATABASE_URL not configured"
                })
            }
            Self::MethodNotAllowed => {
                json!({
                    "error": "Method not allowed"
                })
            }
            Self::NotFound => {
                json!({
                    "error": "Resource not found"
                })
            }
        };

        let mut response = (status_code, Json(body.clone())).into_response();
        response.extensions_mut().insert(ErrorBody(body));
        response
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::Value;
    use storage::dto::result::LeaderboardParams;

    use super::*;

    async fn body_json(error: WebError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_database_url_body() {
        let (status, body) = body_json(WebError::MissingDatabaseUrl).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "DATABASE_URL not configured" }));
    }

    #[tokio::test]
    async fn test_method_not_allowed_body() {
        let (status, body) = body_json(WebError::MethodNotAllowed).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let error = WebError::from(StorageError::Database(sqlx::Error::PoolTimedOut));
        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "An internal error occurred" }));
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let errors = LeaderboardParams::with_limit("abc").limit().unwrap_err();
        let (status, body) = body_json(WebError::from(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"], json!(["limit: limit must be an integer"]));
    }

    #[test]
    fn test_error_body_is_kept_as_extension() {
        let response = WebError::MethodNotAllowed.into_response();

        assert_eq!(
            response.extensions().get::<ErrorBody>(),
            Some(&ErrorBody(json!({ "error": "Method not allowed" })))
        );
    }
}
