//! Cross-entity guards: uniqueness checks and referential refusals that sit
//! outside the booking state machine proper.

use sqlx::SqliteConnection;

use crate::error::ApiError;

/// Refuses a guest email that another guest already uses.
pub async fn ensure_email_free(conn: &mut SqliteConnection, email: &str) -> Result<(), ApiError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM guests WHERE email = ?")
        .bind(email)
        .fetch_optional(conn)
        .await?;
    match existing {
        Some(_) => Err(ApiError::DuplicateEmail),
        None => Ok(()),
    }
}

/// Refuses a room number that another room already uses. `exclude_id` lets a
/// room update keep its own number.
pub async fn ensure_room_number_free(
    conn: &mut SqliteConnection,
    room_number: &str,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM rooms WHERE room_number = ? AND (? IS NULL OR id != ?)")
            .bind(room_number)
            .bind(exclude_id)
            .bind(exclude_id)
            .fetch_optional(conn)
            .await?;
    match existing {
        Some(_) => Err(ApiError::DuplicateRoomNumber),
        None => Ok(()),
    }
}

/// Refuses guest deletion while any booking, in any status, references the
/// guest.
pub async fn ensure_guest_has_no_bookings(
    conn: &mut SqliteConnection,
    guest_id: i64,
) -> Result<(), ApiError> {
    let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE guest_id = ?")
        .bind(guest_id)
        .fetch_one(conn)
        .await?;
    if bookings > 0 {
        return Err(ApiError::GuestHasBookings);
    }
    Ok(())
}
