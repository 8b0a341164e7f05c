use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub id_proof: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Trimmed-down guest record embedded in booking responses.
#[derive(Debug, Serialize, Clone, FromRow)]
pub struct GuestSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGuest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub address: Option<String>,
    pub id_proof: Option<String>,
}
