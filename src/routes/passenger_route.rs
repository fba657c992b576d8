use crate::models::passenger::{CreatePassengerRequest, PassengerCreated};
use crate::services::passenger_service::PassengerService;
use crate::utils::error::AppError;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Create a passenger contact record
#[openapi(tag = "Passengers")]
#[post("/passengers", data = "<request>")]
pub async fn create_passenger(
    request: Json<CreatePassengerRequest>,
    passenger_service: &State<PassengerService>,
) -> Result<Created<Json<PassengerCreated>>, AppError> {
    let passenger_id = passenger_service.create(request.into_inner()).await?;
    Ok(Created::new("/passengers").body(Json(PassengerCreated { passenger_id })))
}
