use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::dto::result::CreateResultRequest;
use crate::error::Result;
use crate::models::ShootingResult;
use crate::ranking::sort_leaderboard;
use crate::repository::ResultStore;

/// Process-local [`ResultStore`] with a single serial id sequence.
///
/// Used to run the endpoint without Postgres, e.g. in tests.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    rows: Mutex<Vec<ShootingResult>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored row in insertion order.
    pub fn rows(&self) -> Vec<ShootingResult> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn insert_result(&self, request: &CreateResultRequest) -> Result<i32> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let id = rows.last().map_or(1, |last| last.id + 1);

        rows.push(ShootingResult {
            id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            study_group: request.study_group.clone(),
            score: request.score,
            total_shots: request.total_shots,
            hits: request.hits,
            misses: request.misses,
            accuracy: request.accuracy,
            game_duration: request.game_duration,
            created_at: Utc::now().naive_utc(),
        });

        Ok(id)
    }

    async fn top_results(&self, limit: i64) -> Result<Vec<ShootingResult>> {
        let mut results = self.rows();
        sort_leaderboard(&mut results);
        results.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(results)
    }
}
