use airline_reservation::{
    db::Database,
    models::{booking::BookingRequest, flight::FlightSearchQuery},
    services::{booking_service::BookingService, flight_service::FlightService},
    utils::error::AppError,
};
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{at, flight_input, utc_offset, TestDb};

struct FlightServiceContext {
    db: Database,
    flight_service: FlightService,
    booking_service: BookingService,
}

#[async_trait]
impl AsyncTestContext for FlightServiceContext {
    async fn setup() -> Self {
        let db = TestDb::new()
            .await
            .expect("Failed to create test database");

        let flight_service = FlightService::new(db.get_pool().clone(), utc_offset());
        let booking_service = BookingService::new(db.get_pool().clone());

        FlightServiceContext {
            db,
            flight_service,
            booking_service,
        }
    }

    async fn teardown(self) {
        self.db.pool.close().await;
    }
}

impl FlightServiceContext {
    async fn seed(&self) -> Result<(), AppError> {
        self.flight_service
            .create_flight(flight_input("UA200", "SFO", "JFK", at(2024, 12, 2, 8, 0), 100))
            .await?;
        self.flight_service
            .create_flight(flight_input("AA100", "JFK", "LAX", at(2024, 12, 1, 12, 0), 100))
            .await?;
        self.flight_service
            .create_flight(flight_input("DL300", "JFK", "SEA", at(2024, 12, 1, 9, 30), 100))
            .await?;
        Ok(())
    }

    async fn book(&self, flight_id: &str, seat_no: &str) -> Result<i64, AppError> {
        let confirmation = self
            .booking_service
            .submit(BookingRequest {
                passenger_name: "Jane Doe".to_string(),
                contact: None,
                email: "jane@x.com".to_string(),
                flight_id: flight_id.to_string(),
                seat_no: seat_no.to_string(),
                amount: 199.99,
            })
            .await?;
        Ok(confirmation.booking_id)
    }
}

fn ids(response: &airline_reservation::models::flight::FlightSearchResponse) -> Vec<&str> {
    response.flights.iter().map(|f| f.flight_id.as_str()).collect()
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_without_filters_lists_all_by_departure(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    ctx.seed().await?;

    let response = ctx
        .flight_service
        .search_flights(FlightSearchQuery::default())
        .await?;

    assert_eq!(ids(&response), vec!["DL300", "AA100", "UA200"]);
    assert_eq!(response.src, None);
    assert_eq!(response.date, None);

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_filters_normalize_airports(ctx: &FlightServiceContext) -> Result<(), AppError> {
    ctx.seed().await?;

    let query = FlightSearchQuery::from_params(Some(" jfk ".into()), Some("lax".into()), None)?;
    let response = ctx.flight_service.search_flights(query).await?;

    assert_eq!(ids(&response), vec!["AA100"]);
    assert_eq!(response.src.as_deref(), Some("JFK"));
    assert_eq!(response.dst.as_deref(), Some("LAX"));

    let query = FlightSearchQuery::from_params(Some("JFK".into()), Some(String::new()), None)?;
    let response = ctx.flight_service.search_flights(query).await?;
    assert_eq!(ids(&response), vec!["DL300", "AA100"]);

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_date_uses_local_calendar_day(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    // 2024-12-02 03:00 UTC is still the evening of 2024-12-01 in New York
    ctx.flight_service
        .create_flight(flight_input("AA900", "JFK", "LAX", at(2024, 12, 2, 3, 0), 50))
        .await?;
    ctx.flight_service
        .create_flight(flight_input("AA100", "JFK", "LAX", at(2024, 12, 1, 12, 0), 50))
        .await?;
    // Local 2024-11-30 23:00
    ctx.flight_service
        .create_flight(flight_input("AA050", "JFK", "LAX", at(2024, 12, 1, 4, 0), 50))
        .await?;

    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    let local_service = FlightService::new(ctx.db.get_pool().clone(), new_york);

    let query = FlightSearchQuery::from_params(
        Some("JFK".into()),
        Some("LAX".into()),
        Some("2024-12-01".into()),
    )?;
    let response = local_service.search_flights(query.clone()).await?;
    assert_eq!(ids(&response), vec!["AA100", "AA900"]);
    assert_eq!(response.date, NaiveDate::from_ymd_opt(2024, 12, 1));

    // The same date read as UTC picks the other early flight instead
    let response = ctx.flight_service.search_flights(query).await?;
    assert_eq!(ids(&response), vec!["AA050", "AA100"]);

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_rejects_bad_date(ctx: &FlightServiceContext) -> Result<(), AppError> {
    ctx.seed().await?;

    let result = FlightSearchQuery::from_params(None, None, Some("12/01/2024".into()));
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_create_flight_opens_every_seat(ctx: &FlightServiceContext) -> Result<(), AppError> {
    ctx.flight_service
        .create_flight(flight_input("AA100", "JFK", "LAX", at(2024, 12, 1, 12, 0), 150))
        .await?;

    let flight = ctx.flight_service.get_flight("AA100").await?;
    assert_eq!(flight.seats_total, 150);
    assert_eq!(flight.seats_available, 150);
    assert_eq!(flight.departure_utc, at(2024, 12, 1, 12, 0));
    assert_eq!(flight.arrival_utc, at(2024, 12, 1, 14, 0));

    let duplicate = ctx
        .flight_service
        .create_flight(flight_input("AA100", "JFK", "SEA", at(2024, 12, 3, 12, 0), 10))
        .await;
    assert!(matches!(duplicate, Err(AppError::DatabaseError(_))));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_update_flight_resets_available_seats(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    ctx.flight_service
        .create_flight(flight_input("AA100", "JFK", "LAX", at(2024, 12, 1, 12, 0), 10))
        .await?;
    ctx.book("AA100", "1A").await?;
    ctx.book("AA100", "1B").await?;
    assert_eq!(ctx.flight_service.get_flight("AA100").await?.seats_available, 8);

    let mut input = flight_input("AA100", "JFK", "LAX", at(2024, 12, 1, 13, 0), 12);
    input.price = 249.0;
    ctx.flight_service.update_flight(input).await?;

    let flight = ctx.flight_service.get_flight("AA100").await?;
    assert_eq!(flight.seats_total, 12);
    assert_eq!(flight.seats_available, 12, "Sold seats are discarded on update");
    assert_eq!(flight.price, 249.0);
    assert_eq!(flight.departure_utc, at(2024, 12, 1, 13, 0));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_missing_flight_is_not_found(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let get = ctx.flight_service.get_flight("ZZ999").await;
    assert!(matches!(get, Err(AppError::NotFound(_))));

    let update = ctx
        .flight_service
        .update_flight(flight_input("ZZ999", "JFK", "LAX", at(2024, 12, 1, 12, 0), 10))
        .await;
    assert!(matches!(update, Err(AppError::NotFound(_))));

    let delete = ctx.flight_service.delete_flight("ZZ999").await;
    assert!(matches!(delete, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_delete_flight(ctx: &FlightServiceContext) -> Result<(), AppError> {
    ctx.seed().await?;
    ctx.book("AA100", "1A").await?;

    // Bookings still point at AA100
    let blocked = ctx.flight_service.delete_flight("AA100").await;
    assert!(matches!(blocked, Err(AppError::DatabaseError(_))));
    assert!(ctx.flight_service.get_flight("AA100").await.is_ok());

    ctx.flight_service.delete_flight("UA200").await?;
    let remaining: Vec<String> = ctx
        .flight_service
        .list_flights()
        .await?
        .into_iter()
        .map(|f| f.flight_id)
        .collect();
    assert_eq!(remaining, vec!["DL300".to_string(), "AA100".to_string()]);

    Ok(())
}
