use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::engine::lifecycle;
use crate::error::ApiError;
use crate::models::booking::{
    BookingDetail, BookingDetailRow, BookingStatus, CreateBooking, UpdateBooking,
};

fn default_limit() -> i64 {
    100
}

#[derive(Deserialize)]
pub struct BookingSearch {
    pub status: Option<BookingStatus>,
    pub guest_id: Option<i64>,
    pub room_id: Option<i64>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub async fn list_bookings(
    pool: web::Data<SqlitePool>,
    params: web::Query<BookingSearch>,
) -> Result<HttpResponse, ApiError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT b.id, b.guest_id, b.room_id, b.check_in_date, b.check_out_date, \
         b.total_amount, b.status, b.actual_check_in, b.actual_check_out, b.created_at, \
         g.name AS guest_name, g.email AS guest_email, \
         r.room_number, r.room_type, r.price_per_night \
         FROM bookings b \
         JOIN guests g ON g.id = b.guest_id \
         JOIN rooms r ON r.id = b.room_id \
         WHERE 1=1",
    );

    if let Some(status) = params.status {
        query.push(" AND b.status = ");
        query.push_bind(status);
    }
    if let Some(guest_id) = params.guest_id {
        query.push(" AND b.guest_id = ");
        query.push_bind(guest_id);
    }
    if let Some(room_id) = params.room_id {
        query.push(" AND b.room_id = ");
        query.push_bind(room_id);
    }

    query.push(" ORDER BY b.created_at DESC LIMIT ");
    query.push_bind(params.limit);
    query.push(" OFFSET ");
    query.push_bind(params.skip);

    let rows: Vec<BookingDetailRow> = query.build_query_as().fetch_all(pool.get_ref()).await?;
    let bookings: Vec<BookingDetail> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(bookings))
}

pub async fn create_booking(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateBooking>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    if body.check_out_date <= body.check_in_date {
        let mut error = validator::ValidationError::new("check_out_after_check_in");
        error.message = Some("Check-out must be after check-in".into());
        let mut errors = validator::ValidationErrors::new();
        errors.add("check_out_date", error);
        return Err(ApiError::ValidationFailed(errors));
    }

    let detail = lifecycle::create_booking(pool.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(detail))
}

pub async fn check_in(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let booking = lifecycle::check_in(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Guest checked in successfully",
        "booking": booking,
    })))
}

pub async fn check_out(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let booking = lifecycle::check_out(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Guest checked out successfully",
        "booking": booking,
    })))
}

pub async fn update_booking(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateBooking>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let booking = lifecycle::update_booking(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(booking))
}

pub async fn cancel_booking(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    lifecycle::cancel(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Booking cancelled successfully",
    })))
}
