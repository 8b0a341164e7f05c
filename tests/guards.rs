mod common;

use hotel_api::engine::{guards, lifecycle};
use hotel_api::error::ApiError;

use common::{book, day, seed_guest, seed_room, test_pool};

#[actix_web::test]
async fn duplicate_email_is_refused() {
    let pool = test_pool().await;
    seed_guest(&pool, "Alice", "alice@example.com").await;

    let mut conn = pool.acquire().await.unwrap();
    let err = guards::ensure_email_free(&mut conn, "alice@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateEmail));

    guards::ensure_email_free(&mut conn, "bob@example.com")
        .await
        .unwrap();
}

#[actix_web::test]
async fn duplicate_room_number_is_refused() {
    let pool = test_pool().await;
    let room = seed_room(&pool, "101").await;

    let mut conn = pool.acquire().await.unwrap();
    let err = guards::ensure_room_number_free(&mut conn, "101", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateRoomNumber));

    // A room may keep its own number on update.
    guards::ensure_room_number_free(&mut conn, "101", Some(room))
        .await
        .unwrap();

    guards::ensure_room_number_free(&mut conn, "102", None)
        .await
        .unwrap();
}

#[actix_web::test]
async fn guest_with_bookings_cannot_be_deleted() {
    let pool = test_pool().await;
    let guest = seed_guest(&pool, "Alice", "alice@example.com").await;
    let room = seed_room(&pool, "101").await;
    let booking = book(&pool, guest, room, day(10), day(15)).await.booking;

    let mut conn = pool.acquire().await.unwrap();
    let err = guards::ensure_guest_has_no_bookings(&mut conn, guest)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::GuestHasBookings));
    drop(conn);

    // A cancelled booking still blocks deletion: any status counts.
    lifecycle::cancel(&pool, booking.id).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let err = guards::ensure_guest_has_no_bookings(&mut conn, guest)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::GuestHasBookings));
}

#[actix_web::test]
async fn guest_without_bookings_can_be_deleted() {
    let pool = test_pool().await;
    let guest = seed_guest(&pool, "Alice", "alice@example.com").await;

    let mut conn = pool.acquire().await.unwrap();
    guards::ensure_guest_has_no_bookings(&mut conn, guest)
        .await
        .unwrap();
    drop(conn);

    let result = sqlx::query("DELETE FROM guests WHERE id = ?")
        .bind(guest)
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(result.rows_affected(), 1);
}
