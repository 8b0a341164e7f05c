pub mod bookings;
pub mod guests;
pub mod health;
pub mod rooms;
