#![allow(dead_code)]

use airline_reservation::db::Database;
use airline_reservation::models::flight::FlightInput;
use airline_reservation::utils::config::AppConfig;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sqlx::Error;
use tempfile::TempDir;

// Cheapest cost bcrypt accepts; keeps hashing out of the test runtime
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestDb;

impl TestDb {
    // A fresh in-memory database with the schema applied, one per test
    pub async fn new() -> Result<Database, Error> {
        let database = Database::new("sqlite::memory:").await?;
        database.migrate().await?;
        Ok(database)
    }
}

// A migrated database file in its own temporary directory, for tests that need
// several connections writing at once; the directory goes away on drop
pub struct FileDb {
    pub database: Database,
    _dir: TempDir,
}

impl FileDb {
    pub async fn new() -> Result<Self, Error> {
        let dir = tempfile::tempdir().map_err(Error::Io)?;
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("airline.db").display());

        let database = Database::new(&url).await?;
        database.migrate().await?;
        Ok(FileDb {
            database,
            _dir: dir,
        })
    }
}

pub fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        local_offset: utc_offset(),
        bcrypt_cost: TEST_BCRYPT_COST,
        ..AppConfig::default()
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

// Flight input with a two hour block time
pub fn flight_input(
    flight_id: &str,
    origin: &str,
    destination: &str,
    departure: DateTime<Utc>,
    seats_total: i32,
) -> FlightInput {
    FlightInput {
        flight_id: flight_id.to_string(),
        airplane_id: 737,
        origin_airport_id: origin.to_string(),
        destination_airport_id: destination.to_string(),
        departure_utc: departure,
        arrival_utc: departure + chrono::Duration::hours(2),
        price: 199.99,
        seats_total,
    }
}
