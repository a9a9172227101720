pub mod dto;
pub mod error;
pub mod models;
pub mod ranking;
pub mod repository;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::dto::result::CreateResultRequest;
use crate::error::Result;
use crate::models::ShootingResult;
use crate::repository::{ResultStore, result::ResultRepository};

/// Handle to the Postgres store backing the leaderboard.
///
/// The pool is created lazily: no connection is opened until the first
/// statement runs, and every statement acquires and releases its own pooled
/// connection.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(database_url: &str, max_connections: u32, acquire_timeout: Duration) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ResultStore for Database {
    async fn insert_result(&self, request: &CreateResultRequest) -> Result<i32> {
        ResultRepository::new(&self.pool).create(request).await
    }

    async fn top_results(&self, limit: i64) -> Result<Vec<ShootingResult>> {
        ResultRepository::new(&self.pool).top(limit).await
    }
}
