use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One persisted leaderboard row of `shooting_results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShootingResult {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub study_group: String,
    pub score: i32,
    pub total_shots: i32,
    pub hits: i32,
    pub misses: i32,
    /// Percentage of shots that hit.
    pub accuracy: Decimal,
    /// Length of the round in seconds.
    pub game_duration: Decimal,
    pub created_at: NaiveDateTime,
}
