use storage::{
    dto::result::CreateResultRequest, error::Result, models::ShootingResult,
    repository::ResultStore,
};

/// Store a finished round and return its id
pub async fn save_result(store: &dyn ResultStore, request: &CreateResultRequest) -> Result<i32> {
    let id = store.insert_result(request).await?;
    tracing::info!(id, score = request.score, "Saved shooting result");
    Ok(id)
}

/// Fetch the leaderboard, best results first
pub async fn top_results(store: &dyn ResultStore, limit: i64) -> Result<Vec<ShootingResult>> {
    let results = store.top_results(limit).await?;
    tracing::debug!(limit, returned = results.len(), "Fetched leaderboard");
    Ok(results)
}
