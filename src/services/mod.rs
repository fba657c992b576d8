pub mod admin_service;
pub mod booking_service;
pub mod flight_service;
pub mod passenger_service;
pub mod payment_service;
pub mod reservation_service;
pub mod user_service;
