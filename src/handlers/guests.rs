use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::engine::guards;
use crate::error::ApiError;
use crate::models::guest::{CreateGuest, Guest};

fn default_limit() -> i64 {
    100
}

#[derive(Deserialize)]
pub struct GuestSearch {
    pub search: Option<String>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub async fn list_guests(
    pool: web::Data<SqlitePool>,
    params: web::Query<GuestSearch>,
) -> Result<HttpResponse, ApiError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM guests WHERE 1=1");

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        query.push(" AND (name LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR email LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR phone LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    query.push(" ORDER BY created_at DESC LIMIT ");
    query.push_bind(params.limit);
    query.push(" OFFSET ");
    query.push_bind(params.skip);

    let guests: Vec<Guest> = query.build_query_as().fetch_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(guests))
}

pub async fn create_guest(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateGuest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let mut tx = pool.begin().await?;
    guards::ensure_email_free(&mut *tx, &body.email).await?;

    let guest: Guest = sqlx::query_as(
        "INSERT INTO guests (name, email, phone, address, id_proof) \
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&body.name)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(&body.address)
    .bind(&body.id_proof)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(guest))
}

pub async fn delete_guest(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let mut tx = pool.begin().await?;
    guards::ensure_guest_has_no_bookings(&mut *tx, id).await?;

    let result = sqlx::query("DELETE FROM guests WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::GuestNotFound);
    }
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Guest deleted successfully" })))
}
