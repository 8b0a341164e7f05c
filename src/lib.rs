pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;

use actix_web::web;

/// Mounts the API routes. Shared between the binary and the HTTP-level
/// tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health::health))
            .service(
                web::scope("/guests")
                    .route("", web::get().to(handlers::guests::list_guests))
                    .route("", web::post().to(handlers::guests::create_guest))
                    .route("/{id}", web::delete().to(handlers::guests::delete_guest)),
            )
            .service(
                web::scope("/rooms")
                    .route("", web::get().to(handlers::rooms::list_rooms))
                    .route("", web::post().to(handlers::rooms::create_room))
                    .route("/{id}", web::put().to(handlers::rooms::update_room)),
            )
            .service(
                web::scope("/bookings")
                    .route("", web::get().to(handlers::bookings::list_bookings))
                    .route("", web::post().to(handlers::bookings::create_booking))
                    .route("/{id}/checkin", web::put().to(handlers::bookings::check_in))
                    .route("/{id}/checkout", web::put().to(handlers::bookings::check_out))
                    .route("/{id}", web::put().to(handlers::bookings::update_booking))
                    .route("/{id}", web::delete().to(handlers::bookings::cancel_booking)),
            ),
    );
}
