use actix_web::HttpResponse;
use serde_json::json;

/// Reports whether required configuration is present, without exposing
/// values. Never touches the store.
pub async fn health() -> HttpResponse {
    let database_url = if std::env::var("DATABASE_URL").is_ok() {
        "SET"
    } else {
        "MISSING"
    };
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "DATABASE_URL": database_url,
    }))
}
