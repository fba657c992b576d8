#[macro_use]
extern crate rocket;

pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod utils;

use crate::db::Database;
use crate::services::admin_service::AdminService;
use crate::services::booking_service::BookingService;
use crate::services::flight_service::FlightService;
use crate::services::passenger_service::PassengerService;
use crate::services::user_service::UserService;
use crate::swagger::swagger_ui;
use crate::utils::config::AppConfig;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;

// Assemble the application around an already migrated database
pub fn build_rocket(database: Database, config: AppConfig) -> Rocket<Build> {
    let mut figment = rocket::Config::figment();
    if let Some(secret_key) = &config.secret_key {
        figment = figment.merge(("secret_key", secret_key.clone()));
    }

    let pool = database.get_pool().clone();

    rocket::custom(figment)
        .manage(UserService::new(pool.clone(), config.bcrypt_cost))
        .manage(AdminService::new(pool.clone(), config.bcrypt_cost))
        .manage(FlightService::new(pool.clone(), config.local_offset))
        .manage(PassengerService::new(pool.clone()))
        .manage(BookingService::new(pool))
        .manage(database)
        .mount(
            "/",
            routes![
                routes::home_route::home,
                routes::home_route::reset,
                routes::user_route::signup_form,
                routes::user_route::signup,
                routes::user_route::login_form,
                routes::user_route::login,
                routes::user_route::welcome,
                routes::user_route::logout,
                routes::flight_route::list_flights,
                routes::booking_route::book_form,
                routes::booking_route::book_submit,
                routes::booking_route::payment_page,
                routes::booking_route::cancel_payment,
                routes::booking_route::view_bookings,
                routes::booking_route::my_bookings,
            ],
        )
        .mount("/", openapi_get_routes![routes::passenger_route::create_passenger])
        .mount(
            "/pay",
            routes![
                routes::payment_route::payment_page,
                routes::payment_route::confirm_payment,
                routes::payment_route::payment_success,
            ],
        )
        .mount(
            "/admin",
            routes![
                routes::admin_route::login_form,
                routes::admin_route::login,
                routes::admin_route::logout,
                routes::admin_route::dashboard,
                routes::admin_route::flights_list,
                routes::admin_route::flight_new_form,
                routes::admin_route::flight_new,
                routes::admin_route::flight_edit_form,
                routes::admin_route::flight_edit,
                routes::admin_route::flight_delete,
                routes::admin_route::bookings_view,
                routes::admin_route::passengers_view,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
}
