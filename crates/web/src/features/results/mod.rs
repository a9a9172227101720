pub mod handlers;
pub mod routes;
pub mod services;

/// Path the leaderboard endpoint is mounted at.
pub const RESULTS_PATH: &str = "/api/shooting-results";
