pub mod admin_route;
pub mod booking_route;
pub mod flight_route;
pub mod home_route;
pub mod passenger_route;
pub mod payment_route;
pub mod user_route;
