use sqlx::PgPool;

use crate::dto::result::CreateResultRequest;
use crate::error::Result;
use crate::models::ShootingResult;

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a result and return its generated id
    pub async fn create(&self, request: &CreateResultRequest) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO shooting_results
                (first_name, last_name, study_group, score, total_shots, hits, misses, accuracy, game_duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.study_group)
        .bind(request.score)
        .bind(request.total_shots)
        .bind(request.hits)
        .bind(request.misses)
        .bind(request.accuracy)
        .bind(request.game_duration)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Best results first, at most `limit` rows
    pub async fn top(&self, limit: i64) -> Result<Vec<ShootingResult>> {
        let results = sqlx::query_as::<_, ShootingResult>(
            r#"
            SELECT id, first_name, last_name, study_group, score, total_shots,
                   hits, misses, accuracy, game_duration, created_at
            FROM shooting_results
            ORDER BY score DESC, accuracy DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }
}
