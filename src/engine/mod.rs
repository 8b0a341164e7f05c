//! Booking lifecycle engine: availability checking, the status state
//! machine, and the cross-entity guards. Handlers stay thin; the business
//! rules live here.

pub mod availability;
pub mod guards;
pub mod lifecycle;
