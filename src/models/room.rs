use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Dorm,
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub capacity: i64,
    pub price_per_night: f64,
    pub is_available: bool,
    pub created_at: chrono::NaiveDateTime,
}

/// Trimmed-down room record embedded in booking responses.
#[derive(Debug, Serialize, Clone, FromRow)]
pub struct RoomSummary {
    pub id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1))]
    pub room_number: String,
    pub room_type: RoomType,
    #[validate(range(min = 1))]
    pub capacity: i64,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
}

/// Patchable room fields. `is_available` is deliberately absent: the flag is
/// derived from booking state and only the lifecycle engine may flip it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoom {
    #[validate(length(min = 1))]
    pub room_number: Option<String>,
    pub room_type: Option<RoomType>,
    #[validate(range(min = 1))]
    pub capacity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub price_per_night: Option<f64>,
}
