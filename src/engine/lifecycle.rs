//! The booking state machine.
//!
//! Legal transitions: booked -> checked_in -> checked_out, and
//! booked -> cancelled. `checked_out` and `cancelled` are terminal. Each
//! operation runs inside a single store transaction so the status write and
//! the room-flag maintenance it implies can never diverge. Transactions are
//! opened with `BEGIN IMMEDIATE`: the write lock is taken before the first
//! read, so check-then-act sequences (conflict check + insert, status read
//! + status write) are fully serialized across concurrent requests. Of two
//! racing overlapping creations, the second enters its transaction only
//! after the first commits and then sees the conflict.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use crate::engine::availability;
use crate::error::ApiError;
use crate::models::booking::{Booking, BookingDetail, BookingStatus, CreateBooking, UpdateBooking};
use crate::models::guest::GuestSummary;
use crate::models::room::{RoomSummary, RoomType};

const BOOKING_COLUMNS: &str = "id, guest_id, room_id, check_in_date, check_out_date, \
     total_amount, status, actual_check_in, actual_check_out, created_at";

/// Recomputes the cached availability flag from booking state: the room is
/// available iff no booked or checked-in booking references it. Run inside
/// the transaction of whichever transition invalidated the flag.
const RECOMPUTE_ROOM_FLAG: &str = "UPDATE rooms SET is_available = NOT EXISTS (\
     SELECT 1 FROM bookings WHERE room_id = rooms.id \
     AND status IN ('booked', 'checked_in')) WHERE id = ?";

#[derive(FromRow)]
struct RoomRow {
    id: i64,
    room_number: String,
    room_type: RoomType,
    price_per_night: f64,
    is_available: bool,
}

/// Creates a booking with status `booked` and clears the room's
/// availability flag.
///
/// Guards, in order: guest exists, room exists, no overlapping active
/// booking. The overlap check is the authority on availability; the cached
/// flag only serves as a fast path (when set, no active booking exists and
/// the conflict query is skipped — sound because the immediate transaction
/// already holds the write lock, so the flag cannot go stale mid-check). A
/// room with a disjoint future reservation therefore still accepts new
/// dates. The check and the insert share the transaction.
pub async fn create_booking(
    pool: &SqlitePool,
    new: &CreateBooking,
) -> Result<BookingDetail, ApiError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let guest: GuestSummary = sqlx::query_as("SELECT id, name, email FROM guests WHERE id = ?")
        .bind(new.guest_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApiError::GuestNotFound)?;

    let room: RoomRow = sqlx::query_as(
        "SELECT id, room_number, room_type, price_per_night, is_available FROM rooms WHERE id = ?",
    )
    .bind(new.room_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ApiError::RoomNotFound)?;

    if !room.is_available
        && availability::room_has_conflict(
            &mut *tx,
            new.room_id,
            new.check_in_date,
            new.check_out_date,
        )
        .await?
    {
        return Err(ApiError::DateConflict);
    }

    let booking: Booking = sqlx::query_as(&format!(
        "INSERT INTO bookings (guest_id, room_id, check_in_date, check_out_date, total_amount, status) \
         VALUES (?, ?, ?, ?, ?, 'booked') RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(new.guest_id)
    .bind(new.room_id)
    .bind(new.check_in_date)
    .bind(new.check_out_date)
    .bind(new.total_amount)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE rooms SET is_available = 0 WHERE id = ?")
        .bind(new.room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    log::info!("created booking {} for room {}", booking.id, room.id);

    Ok(BookingDetail {
        booking,
        guest,
        room: RoomSummary {
            id: room.id,
            room_number: room.room_number,
            room_type: room.room_type,
            price_per_night: room.price_per_night,
        },
    })
}

/// booked -> checked_in; stamps the actual check-in time. Status is the
/// sole guard. The room flag is untouched: it was already cleared when the
/// booking was created.
pub async fn check_in(pool: &SqlitePool, booking_id: i64) -> Result<Booking, ApiError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let booking = fetch_booking(&mut tx, booking_id).await?;
    if booking.status != BookingStatus::Booked {
        return Err(ApiError::InvalidTransition(booking.status));
    }

    let updated: Booking = sqlx::query_as(&format!(
        "UPDATE bookings SET status = 'checked_in', actual_check_in = ? \
         WHERE id = ? RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(Utc::now().naive_utc())
    .bind(booking_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

/// checked_in -> checked_out; stamps the actual check-out time and
/// recomputes the room's availability flag (true again unless another
/// active booking remains).
pub async fn check_out(pool: &SqlitePool, booking_id: i64) -> Result<Booking, ApiError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let booking = fetch_booking(&mut tx, booking_id).await?;
    if booking.status != BookingStatus::CheckedIn {
        return Err(ApiError::InvalidTransition(booking.status));
    }

    let updated: Booking = sqlx::query_as(&format!(
        "UPDATE bookings SET status = 'checked_out', actual_check_out = ? \
         WHERE id = ? RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(Utc::now().naive_utc())
    .bind(booking_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(RECOMPUTE_ROOM_FLAG)
        .bind(booking.room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(updated)
}

/// booked -> cancelled; recomputes the room's availability flag. Every
/// other current status gets its own named rejection.
pub async fn cancel(pool: &SqlitePool, booking_id: i64) -> Result<Booking, ApiError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let booking = fetch_booking(&mut tx, booking_id).await?;
    match booking.status {
        BookingStatus::CheckedIn => return Err(ApiError::CannotCancelActiveStay),
        BookingStatus::Cancelled => return Err(ApiError::AlreadyCancelled),
        BookingStatus::CheckedOut => return Err(ApiError::CannotCancelCompleted),
        BookingStatus::Booked => {}
    }

    let updated: Booking = sqlx::query_as(&format!(
        "UPDATE bookings SET status = 'cancelled' WHERE id = ? RETURNING {BOOKING_COLUMNS}"
    ))
    .bind(booking_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(RECOMPUTE_ROOM_FLAG)
        .bind(booking.room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Applies an amount correction. Status and date fields are not patchable
/// through here; those move only through the named transitions.
pub async fn update_booking(
    pool: &SqlitePool,
    booking_id: i64,
    patch: &UpdateBooking,
) -> Result<Booking, ApiError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let booking = fetch_booking(&mut tx, booking_id).await?;

    let updated = match patch.total_amount {
        Some(total_amount) => {
            sqlx::query_as(&format!(
                "UPDATE bookings SET total_amount = ? WHERE id = ? RETURNING {BOOKING_COLUMNS}"
            ))
            .bind(total_amount)
            .bind(booking_id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => booking,
    };

    tx.commit().await?;
    Ok(updated)
}

async fn fetch_booking(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    booking_id: i64,
) -> Result<Booking, ApiError> {
    sqlx::query_as(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"
    ))
    .bind(booking_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(ApiError::BookingNotFound)
}
