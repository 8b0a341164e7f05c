use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::guest::GuestSummary;
use crate::models::room::{RoomSummary, RoomType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BookingStatus {
    Booked,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Booked => "booked",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: chrono::NaiveDate,
    pub check_out_date: chrono::NaiveDate,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub actual_check_in: Option<chrono::NaiveDateTime>,
    pub actual_check_out: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

/// Booking with its guest and room joined in, the shape list and create
/// responses use.
#[derive(Debug, Serialize, Clone)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub guest: GuestSummary,
    pub room: RoomSummary,
}

/// Flat row produced by the bookings/guests/rooms join.
#[derive(Debug, FromRow)]
pub struct BookingDetailRow {
    pub id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: chrono::NaiveDate,
    pub check_out_date: chrono::NaiveDate,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub actual_check_in: Option<chrono::NaiveDateTime>,
    pub actual_check_out: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
    pub guest_name: String,
    pub guest_email: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: f64,
}

impl From<BookingDetailRow> for BookingDetail {
    fn from(row: BookingDetailRow) -> Self {
        BookingDetail {
            guest: GuestSummary {
                id: row.guest_id,
                name: row.guest_name,
                email: row.guest_email,
            },
            room: RoomSummary {
                id: row.room_id,
                room_number: row.room_number,
                room_type: row.room_type,
                price_per_night: row.price_per_night,
            },
            booking: Booking {
                id: row.id,
                guest_id: row.guest_id,
                room_id: row.room_id,
                check_in_date: row.check_in_date,
                check_out_date: row.check_out_date,
                total_amount: row.total_amount,
                status: row.status,
                actual_check_in: row.actual_check_in,
                actual_check_out: row.actual_check_out,
                created_at: row.created_at,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBooking {
    #[validate(range(min = 1))]
    pub guest_id: i64,
    #[validate(range(min = 1))]
    pub room_id: i64,
    pub check_in_date: chrono::NaiveDate,
    pub check_out_date: chrono::NaiveDate,
    #[validate(range(min = 0.0))]
    pub total_amount: f64,
}

/// Patchable booking fields. Status and dates are not patchable; those move
/// only through the check-in/check-out/cancel transitions.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBooking {
    #[validate(range(min = 0.0))]
    pub total_amount: Option<f64>,
}
