#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hotel_api::engine::lifecycle;
use hotel_api::models::booking::{BookingDetail, CreateBooking};

/// Fresh store with the real schema. In-memory SQLite is per-connection, so
/// the pool is capped at one connection to keep every query on the same
/// database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub async fn seed_guest(pool: &SqlitePool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO guests (name, email, phone) VALUES (?, ?, '555-0100') RETURNING id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_room(pool: &SqlitePool, room_number: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO rooms (room_number, room_type, capacity, price_per_night) \
         VALUES (?, 'double', 2, 100.0) RETURNING id",
    )
    .bind(room_number)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Day `d` of a fixed month, so tests can talk about "day 10 to day 15".
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
}

pub async fn book(
    pool: &SqlitePool,
    guest_id: i64,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> BookingDetail {
    lifecycle::create_booking(
        pool,
        &CreateBooking {
            guest_id,
            room_id,
            check_in_date: check_in,
            check_out_date: check_out,
            total_amount: 500.0,
        },
    )
    .await
    .unwrap()
}

pub async fn room_available(pool: &SqlitePool, room_id: i64) -> bool {
    sqlx::query_scalar("SELECT is_available FROM rooms WHERE id = ?")
        .bind(room_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
