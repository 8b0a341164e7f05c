use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::error::ApiError;

/// Reports whether any active (booked or checked-in) booking on the room
/// overlaps the candidate range. The overlap test is inclusive on both
/// boundaries: [a, b] and [c, d] overlap iff a <= d and b >= c, so a new
/// stay starting on an existing stay's check-out date still conflicts.
///
/// Takes the connection of the caller's transaction so that the check and
/// the subsequent insert form one atomic unit.
pub async fn room_has_conflict(
    conn: &mut SqliteConnection,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool, ApiError> {
    let conflicts: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM bookings
        WHERE room_id = ?
        AND status IN ('booked', 'checked_in')
        AND check_in_date <= ?
        AND check_out_date >= ?
        "#,
    )
    .bind(room_id)
    .bind(check_out)
    .bind(check_in)
    .fetch_one(conn)
    .await?;

    Ok(conflicts > 0)
}
