use crate::utils::error::{AppError, AppResult};
use crate::utils::form::{filled, normalize_airport};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M %:z";

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Flight {
    pub flight_id: String,
    pub airplane_id: i64,
    pub origin_airport_id: String,
    pub destination_airport_id: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub price: f64,
    pub seats_total: i32,
    pub seats_available: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightSearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
}

impl FlightSearchQuery {
    // Build a query from raw `src`/`dst`/`date` parameters; blanks mean "any"
    pub fn from_params(
        src: Option<String>,
        dst: Option<String>,
        date: Option<String>,
    ) -> AppResult<Self> {
        let date = match filled(date) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| AppError::ValidationError("Invalid date format".into()))?,
            ),
            None => None,
        };

        Ok(FlightSearchQuery {
            origin: filled(src).map(|s| normalize_airport(&s)),
            destination: filled(dst).map(|s| normalize_airport(&s)),
            date,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FlightSearchResponse {
    pub src: Option<String>,
    pub dst: Option<String>,
    pub date: Option<NaiveDate>,
    pub flights: Vec<Flight>,
}

/// Raw admin form; every field is checked in [`FlightForm::into_input`].
#[derive(Debug, Default, FromForm)]
pub struct FlightForm {
    pub flight_id: Option<String>,
    pub airplane_id: Option<String>,
    pub origin_airport_id: Option<String>,
    pub destination_airport_id: Option<String>,
    pub departure_utc: Option<String>,
    pub arrival_utc: Option<String>,
    pub price: Option<String>,
    pub seats_total: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightInput {
    pub flight_id: String,
    pub airplane_id: i64,
    pub origin_airport_id: String,
    pub destination_airport_id: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub price: f64,
    pub seats_total: i32,
}

impl FlightForm {
    // `flight_id` comes from the path when editing and from the form when creating
    pub fn into_input(self, flight_id: Option<String>) -> AppResult<FlightInput> {
        let missing = || AppError::ValidationError("All fields are required!".into());

        let flight_id = filled(flight_id.or(self.flight_id)).ok_or_else(missing)?;
        let airplane_id = filled(self.airplane_id).ok_or_else(missing)?;
        let origin = filled(self.origin_airport_id).ok_or_else(missing)?;
        let destination = filled(self.destination_airport_id).ok_or_else(missing)?;
        let departure = filled(self.departure_utc).ok_or_else(missing)?;
        let arrival = filled(self.arrival_utc).ok_or_else(missing)?;
        let price = filled(self.price).ok_or_else(missing)?;
        let seats_total = filled(self.seats_total).ok_or_else(missing)?;

        let airplane_id = airplane_id
            .parse::<i64>()
            .map_err(|_| AppError::ValidationError("Invalid airplane id.".into()))?;
        let price = match price.parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => price,
            _ => return Err(AppError::ValidationError("Invalid price.".into())),
        };
        let seats_total = match seats_total.parse::<i32>() {
            Ok(seats) if seats >= 0 => seats,
            _ => return Err(AppError::ValidationError("Invalid seat count.".into())),
        };

        Ok(FlightInput {
            flight_id,
            airplane_id,
            origin_airport_id: normalize_airport(&origin),
            destination_airport_id: normalize_airport(&destination),
            departure_utc: parse_timestamp(&departure)?,
            arrival_utc: parse_timestamp(&arrival)?,
            price,
            seats_total,
        })
    }
}

/// Accepts `YYYY-MM-DD HH:MM +HH:MM` (the admin form format) or RFC 3339.
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::<FixedOffset>::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(raw, "%Y-%m-%d %H:%M %z"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| AppError::ValidationError(format!("Invalid timestamp: {}", raw)))
}

/// Values for pre-filling the edit form.
#[derive(Debug, Serialize)]
pub struct FlightFormView {
    pub mode: &'static str,
    pub flight: Option<FlightFormValues>,
}

#[derive(Debug, Serialize)]
pub struct FlightFormValues {
    pub flight_id: String,
    pub airplane_id: i64,
    pub origin_airport_id: String,
    pub destination_airport_id: String,
    pub departure_utc: String,
    pub arrival_utc: String,
    pub price: f64,
    pub seats_total: i32,
}

impl From<Flight> for FlightFormValues {
    fn from(flight: Flight) -> Self {
        FlightFormValues {
            flight_id: flight.flight_id,
            airplane_id: flight.airplane_id,
            origin_airport_id: flight.origin_airport_id,
            destination_airport_id: flight.destination_airport_id,
            departure_utc: flight.departure_utc.format(TIMESTAMP_FORMAT).to_string(),
            arrival_utc: flight.arrival_utc.format(TIMESTAMP_FORMAT).to_string(),
            price: flight.price,
            seats_total: flight.seats_total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlightListView {
    pub flights: Vec<Flight>,
}
