pub mod memory;
pub mod result;

use async_trait::async_trait;

use crate::dto::result::CreateResultRequest;
use crate::error::Result;
use crate::models::ShootingResult;

/// The two statements the leaderboard endpoint needs from its store.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists one result and returns the id generated for it.
    async fn insert_result(&self, request: &CreateResultRequest) -> Result<i32>;

    /// Returns at most `limit` results, best first.
    async fn top_results(&self, limit: i64) -> Result<Vec<ShootingResult>>;
}
