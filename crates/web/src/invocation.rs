//! Serverless-style entry point.
//!
//! Function runtimes hand over a request as a plain descriptor (method, query
//! parameters, body, headers) and expect a descriptor back instead of
//! speaking HTTP themselves. [`handle`] converts the descriptor into an HTTP
//! request, runs it through the same [`Router`] the server uses, and collects
//! the response, so both hosting modes share every handler, layer and error
//! mapping.

use std::collections::{BTreeMap, HashMap};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderName, HeaderValue, Method, Request, header::CONTENT_LENGTH},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower::ServiceExt;

use crate::error::ErrorBody;
use crate::features::results::RESULTS_PATH;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_method() -> String {
    Method::GET.to_string()
}

impl ApiRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            query_string_parameters: None,
            body: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn uri(&self) -> String {
        let mut uri = String::from(RESULTS_PATH);

        if let Some(params) = self.query_string_parameters.as_ref().filter(|p| !p.is_empty()) {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            uri.push('?');
            uri.push_str(&query);
        }

        uri
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("invalid HTTP method `{0}`")]
    InvalidMethod(String),

    #[error("failed to build request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("failed to read response body: {0}")]
    Body(#[from] axum::Error),
}

/// Runs one invocation through `app`.
///
/// Headers that are not valid HTTP header names or values are skipped. A
/// HEAD invocation gets the same JSON error body as any other rejected
/// method, even though the router answers HEAD without a body.
pub async fn handle(app: &Router, request: ApiRequest) -> Result<ApiResponse, InvocationError> {
    let method = Method::from_bytes(request.http_method.as_bytes())
        .map_err(|_| InvocationError::InvalidMethod(request.http_method.clone()))?;
    let is_head = method == Method::HEAD;

    let mut builder = Request::builder().method(method).uri(request.uri());

    for (name, value) in &request.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => builder = builder.header(name, value),
            _ => tracing::debug!(header = %name, "Skipping invalid header"),
        }
    }

    let http_request = builder.body(Body::from(request.body.unwrap_or_default()))?;

    let response = match app.clone().oneshot(http_request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let status_code = response.status().as_u16();
    let error_body = response.extensions().get::<ErrorBody>().cloned();

    let mut headers = BTreeMap::new();
    for (name, value) in response.headers() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let mut body = String::from_utf8_lossy(&bytes).into_owned();

    if is_head {
        if let Some(ErrorBody(value)) = error_body {
            body = value.to_string();
            headers.insert(CONTENT_LENGTH.as_str().to_string(), body.len().to_string());
        }
    }

    Ok(ApiResponse {
        status_code,
        headers,
        body,
    })
}
