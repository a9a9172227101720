pub mod config;
pub mod docs;
pub mod error;
pub mod features;
pub mod invocation;
pub mod middleware;
pub mod state;

use axum::Router;

use crate::features::results::{handlers::not_found, routes};
use crate::state::AppState;

/// Builds the application router around `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .merge(docs::routes())
        .fallback(not_found)
        .layer(middleware::cors::layer())
        .layer(middleware::trace::layer())
        .with_state(state)
}
