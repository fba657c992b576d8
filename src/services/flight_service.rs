use crate::models::flight::{Flight, FlightInput, FlightSearchQuery, FlightSearchResponse};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDate, TimeZone, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const FLIGHT_COLUMNS: &str = "flight_id, airplane_id, origin_airport_id, destination_airport_id, \
    departure_utc, arrival_utc, price, seats_total, seats_available";

pub struct FlightService {
    pool: SqlitePool,
    local_offset: FixedOffset,
}

impl FlightService {
    pub fn new(pool: SqlitePool, local_offset: FixedOffset) -> Self {
        FlightService { pool, local_offset }
    }

    // Search flights; every filter is optional and they combine with AND
    pub async fn search_flights(
        &self,
        search_query: FlightSearchQuery,
    ) -> AppResult<FlightSearchResponse> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM flight WHERE 1=1", FLIGHT_COLUMNS));

        if let Some(origin) = &search_query.origin {
            builder.push(" AND origin_airport_id = ").push_bind(origin.clone());
        }
        if let Some(destination) = &search_query.destination {
            builder
                .push(" AND destination_airport_id = ")
                .push_bind(destination.clone());
        }
        // The date is a local calendar date; compare against its UTC window
        if let Some(date) = search_query.date {
            let (start, end) = local_day_window(date, self.local_offset)?;
            builder
                .push(" AND departure_utc >= ")
                .push_bind(start)
                .push(" AND departure_utc < ")
                .push_bind(end);
        }
        builder.push(" ORDER BY departure_utc, flight_id");

        let flights = builder
            .build_query_as::<Flight>()
            .fetch_all(&self.pool)
            .await?;

        Ok(FlightSearchResponse {
            src: search_query.origin,
            dst: search_query.destination,
            date: search_query.date,
            flights,
        })
    }

    pub async fn list_flights(&self) -> AppResult<Vec<Flight>> {
        let flights = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {} FROM flight ORDER BY departure_utc, flight_id",
            FLIGHT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(flights)
    }

    pub async fn get_flight(&self, flight_id: &str) -> AppResult<Flight> {
        sqlx::query_as::<_, Flight>(&format!(
            "SELECT {} FROM flight WHERE flight_id = ?",
            FLIGHT_COLUMNS
        ))
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".into()))
    }

    // New flights start with every seat available
    pub async fn create_flight(&self, input: FlightInput) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO flight (flight_id, airplane_id, origin_airport_id, destination_airport_id,
                departure_utc, arrival_utc, price, seats_total, seats_available)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.flight_id)
        .bind(input.airplane_id)
        .bind(&input.origin_airport_id)
        .bind(&input.destination_airport_id)
        .bind(input.departure_utc)
        .bind(input.arrival_utc)
        .bind(input.price)
        .bind(input.seats_total)
        .bind(input.seats_total)
        .execute(&self.pool)
        .await?;

        tracing::info!(flight_id = %input.flight_id, "flight created");
        Ok(())
    }

    /// Overwrites the flight and resets `seats_available` to the new
    /// `seats_total`, discarding seats already sold.
    pub async fn update_flight(&self, input: FlightInput) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE flight
            SET airplane_id = ?,
                origin_airport_id = ?,
                destination_airport_id = ?,
                departure_utc = ?,
                arrival_utc = ?,
                price = ?,
                seats_total = ?,
                seats_available = ?
            WHERE flight_id = ?
            "#,
        )
        .bind(input.airplane_id)
        .bind(&input.origin_airport_id)
        .bind(&input.destination_airport_id)
        .bind(input.departure_utc)
        .bind(input.arrival_utc)
        .bind(input.price)
        .bind(input.seats_total)
        .bind(input.seats_total)
        .bind(&input.flight_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Flight not found".into()));
        }

        tracing::info!(flight_id = %input.flight_id, "flight updated");
        Ok(())
    }

    // No cascade: a flight that still has bookings fails on the foreign key
    pub async fn delete_flight(&self, flight_id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM flight WHERE flight_id = ?")
            .bind(flight_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Flight not found".into()));
        }

        tracing::info!(flight_id = %flight_id, "flight deleted");
        Ok(())
    }
}

/// The UTC instants `[start, end)` covering `date` in the zone `offset`.
pub fn local_day_window(
    date: NaiveDate,
    offset: FixedOffset,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::ValidationError("Invalid date".into()))?;

    match offset.from_local_datetime(&midnight) {
        LocalResult::Single(start) => {
            let start = start.with_timezone(&Utc);
            Ok((start, start + Duration::days(1)))
        }
        _ => Err(AppError::ValidationError("Invalid date".into())),
    }
}
