use std::{borrow::Cow, fmt};

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::ShootingResult;

/// Number of rows returned by the leaderboard when no `limit` is given.
pub const DEFAULT_LIMIT: i64 = 10;

pub const RESULT_SAVED_MESSAGE: &str = "Result saved successfully";

/// Request payload submitted by the game client once a round is over.
///
/// Every field is optional: a missing (or `null`) field falls back to an
/// empty string or zero instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateResultRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,

    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,

    #[serde(rename = "group", deserialize_with = "null_as_default")]
    pub study_group: String,

    #[serde(deserialize_with = "lenient_integer")]
    pub score: i32,

    #[serde(deserialize_with = "lenient_integer")]
    pub total_shots: i32,

    #[serde(deserialize_with = "lenient_integer")]
    pub hits: i32,

    #[serde(deserialize_with = "lenient_integer")]
    pub misses: i32,

    #[schema(value_type = f64)]
    #[serde(deserialize_with = "null_as_default")]
    pub accuracy: Decimal,

    #[schema(value_type = f64)]
    #[serde(deserialize_with = "null_as_default")]
    pub game_duration: Decimal,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer counters accept what an `INTEGER` column would take on
/// assignment: whole or fractional numbers (rounded half away from zero) and
/// numeric text. `null` counts as missing.
fn lenient_integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientIntegerVisitor)
}

struct LenientIntegerVisitor;

impl<'de> Visitor<'de> for LenientIntegerVisitor {
    type Value = i32;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer, a number or numeric text")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i32, E> {
        i32::try_from(value).map_err(|_| E::custom(format!("integer out of range: {}", value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i32, E> {
        i32::try_from(value).map_err(|_| E::custom(format!("integer out of range: {}", value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i32, E> {
        let rounded = value.round();
        if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
            Ok(rounded as i32)
        } else {
            Err(E::custom(format!("integer out of range: {}", value)))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<i32, E> {
        value
            .trim()
            .parse::<i32>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<i32, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<i32, E> {
        Ok(0)
    }
}

/// Response returned after a result has been stored
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultCreatedResponse {
    pub id: i32,
    pub message: String,
}

impl ResultCreatedResponse {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            message: RESULT_SAVED_MESSAGE.to_string(),
        }
    }
}

/// One leaderboard entry as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub study_group: String,
    pub score: i32,
    pub total_shots: i32,
    pub hits: i32,
    pub misses: i32,
    pub accuracy: f64,
    pub game_duration: f64,
    pub created_at: NaiveDateTime,
}

impl From<ShootingResult> for ResultResponse {
    fn from(result: ShootingResult) -> Self {
        Self {
            id: result.id,
            first_name: result.first_name,
            last_name: result.last_name,
            study_group: result.study_group,
            score: result.score,
            total_shots: result.total_shots,
            hits: result.hits,
            misses: result.misses,
            accuracy: decimal_to_f64(result.accuracy),
            game_duration: decimal_to_f64(result.game_duration),
            created_at: result.created_at,
        }
    }
}

fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_f64().unwrap_or(0.0)
}

/// Query parameters of the leaderboard listing.
///
/// `limit` is kept as raw text so that a non-numeric value surfaces as a
/// validation error rather than a query rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// Maximum number of results to return (defaults to 10)
    #[param(value_type = Option<i64>, minimum = 0)]
    pub limit: Option<String>,
}

#[derive(Debug, Validate)]
struct LeaderboardLimit {
    #[validate(range(min = 0, message = "limit must not be negative"))]
    limit: i64,
}

impl LeaderboardParams {
    pub fn with_limit(limit: impl Into<String>) -> Self {
        Self {
            limit: Some(limit.into()),
        }
    }

    /// Resolves the effective limit, falling back to [`DEFAULT_LIMIT`].
    pub fn limit(&self) -> Result<i64, ValidationErrors> {
        let Some(raw) = self.limit.as_deref() else {
            return Ok(DEFAULT_LIMIT);
        };

        let limit = raw.trim().parse::<i64>().map_err(|_| {
            let mut error = ValidationError::new("integer");
            error.message = Some(Cow::Borrowed("limit must be an integer"));

            let mut errors = ValidationErrors::new();
            errors.add("limit", error);
            errors
        })?;

        LeaderboardLimit { limit }.validate()?;

        Ok(limit)
    }
}
