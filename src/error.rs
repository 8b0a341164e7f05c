use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::models::booking::BookingStatus;

/// Every way a request can fail, as a typed value. Handlers return
/// `Result<_, ApiError>` and actix maps each variant to its status code via
/// the `ResponseError` impl below.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Guest not found")]
    GuestNotFound,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room is not available")]
    RoomUnavailable,
    #[error("Room is already booked for these dates")]
    DateConflict,
    #[error("Booking not found")]
    BookingNotFound,
    #[error("Invalid transition from status '{0}'")]
    InvalidTransition(BookingStatus),
    #[error("Cannot cancel a booking for a checked-in guest")]
    CannotCancelActiveStay,
    #[error("Booking is already cancelled")]
    AlreadyCancelled,
    #[error("Cannot cancel a completed booking")]
    CannotCancelCompleted,
    #[error("Cannot delete guest with existing bookings")]
    GuestHasBookings,
    #[error("Room number already exists")]
    DuplicateRoomNumber,
    #[error("Guest with this email already exists")]
    DuplicateEmail,
    #[error("Validation failed")]
    ValidationFailed(#[from] validator::ValidationErrors),
    #[error("Store unavailable")]
    StoreUnavailable(#[from] sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::GuestNotFound | ApiError::RoomNotFound | ApiError::BookingNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::RoomUnavailable
            | ApiError::DateConflict
            | ApiError::InvalidTransition(_)
            | ApiError::CannotCancelActiveStay
            | ApiError::AlreadyCancelled
            | ApiError::CannotCancelCompleted
            | ApiError::GuestHasBookings
            | ApiError::DuplicateRoomNumber
            | ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::ValidationFailed(errors) => {
                json!({ "error": self.to_string(), "details": errors })
            }
            ApiError::StoreUnavailable(source) => {
                log::error!("store error: {source}");
                json!({ "error": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
