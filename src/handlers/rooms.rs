use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::engine::guards;
use crate::error::ApiError;
use crate::models::room::{CreateRoom, Room, RoomType, UpdateRoom};

fn default_limit() -> i64 {
    100
}

#[derive(Deserialize)]
pub struct RoomSearch {
    pub available: Option<bool>,
    pub room_type: Option<RoomType>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub async fn list_rooms(
    pool: web::Data<SqlitePool>,
    params: web::Query<RoomSearch>,
) -> Result<HttpResponse, ApiError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM rooms WHERE 1=1");

    if let Some(available) = params.available {
        query.push(" AND is_available = ");
        query.push_bind(available);
    }
    if let Some(room_type) = params.room_type {
        query.push(" AND room_type = ");
        query.push_bind(room_type);
    }

    query.push(" ORDER BY created_at DESC LIMIT ");
    query.push_bind(params.limit);
    query.push(" OFFSET ");
    query.push_bind(params.skip);

    let rooms: Vec<Room> = query.build_query_as().fetch_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

pub async fn create_room(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateRoom>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let mut tx = pool.begin().await?;
    guards::ensure_room_number_free(&mut *tx, &body.room_number, None).await?;

    // New rooms start available; the flag only changes with booking
    // transitions after that.
    let room: Room = sqlx::query_as(
        "INSERT INTO rooms (room_number, room_type, capacity, price_per_night, is_available) \
         VALUES (?, ?, ?, ?, 1) RETURNING *",
    )
    .bind(&body.room_number)
    .bind(body.room_type)
    .bind(body.capacity)
    .bind(body.price_per_night)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(room))
}

pub async fn update_room(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateRoom>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    body.validate()?;

    let mut tx = pool.begin().await?;

    let existing: Option<Room> = sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let existing = existing.ok_or(ApiError::RoomNotFound)?;

    if let Some(room_number) = &body.room_number {
        guards::ensure_room_number_free(&mut *tx, room_number, Some(id)).await?;
    }

    let room: Room = sqlx::query_as(
        "UPDATE rooms SET room_number = ?, room_type = ?, capacity = ?, price_per_night = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(body.room_number.as_deref().unwrap_or(&existing.room_number))
    .bind(body.room_type.unwrap_or(existing.room_type))
    .bind(body.capacity.unwrap_or(existing.capacity))
    .bind(body.price_per_night.unwrap_or(existing.price_per_night))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(room))
}
