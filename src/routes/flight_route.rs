use crate::models::flight::{FlightSearchQuery, FlightSearchResponse};
use crate::services::flight_service::FlightService;
use crate::utils::error::AppError;
use crate::utils::view::View;
use rocket::request::FlashMessage;
use rocket::serde::json::Json;
use rocket::State;

/// Search flights
#[get("/flights?<src>&<dst>&<date>")]
pub async fn list_flights(
    src: Option<String>,
    dst: Option<String>,
    date: Option<String>,
    flash: Option<FlashMessage<'_>>,
    flight_service: &State<FlightService>,
) -> Result<Json<View<FlightSearchResponse>>, AppError> {
    let query = FlightSearchQuery::from_params(src, dst, date)?;
    let flights = flight_service.search_flights(query).await?;
    Ok(View::new(flash, flights))
}
