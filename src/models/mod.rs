pub mod admin;
pub mod booking;
pub mod flight;
pub mod passenger;
pub mod payment;
pub mod user;
