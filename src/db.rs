use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS app_user (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL COLLATE NOCASE,
        password_hash TEXT NOT NULL,
        CONSTRAINT app_user_email_uindex UNIQUE (email)
    )",
    "CREATE TABLE IF NOT EXISTS admin_user (
        admin_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        full_name TEXT NULL,
        CONSTRAINT admin_user_username_uindex UNIQUE (username)
    )",
    "CREATE TABLE IF NOT EXISTS passenger (
        passenger_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        contact TEXT NULL,
        email TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS passenger_email_index ON passenger (email)",
    "CREATE TABLE IF NOT EXISTS flight (
        flight_id TEXT NOT NULL PRIMARY KEY,
        airplane_id INTEGER NOT NULL,
        origin_airport_id TEXT NOT NULL,
        destination_airport_id TEXT NOT NULL,
        departure_utc TEXT NOT NULL,
        arrival_utc TEXT NOT NULL,
        price REAL NOT NULL,
        seats_total INTEGER NOT NULL,
        seats_available INTEGER NOT NULL,
        CONSTRAINT flight_seats_check
            CHECK (seats_available >= 0 AND seats_available <= seats_total)
    )",
    "CREATE TABLE IF NOT EXISTS booking (
        booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
        passenger_id INTEGER NOT NULL,
        flight_id TEXT NOT NULL,
        seat_no TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'PENDING',
        booking_date TEXT NOT NULL,
        CONSTRAINT booking_passenger_fk
            FOREIGN KEY (passenger_id) REFERENCES passenger(passenger_id),
        CONSTRAINT booking_flight_fk
            FOREIGN KEY (flight_id) REFERENCES flight(flight_id)
    )",
    // One live booking per seat; cancelled rows free the seat
    "CREATE UNIQUE INDEX IF NOT EXISTS booking_active_seat_uindex
        ON booking (flight_id, seat_no) WHERE status <> 'CANCELLED'",
    "CREATE TABLE IF NOT EXISTS payment (
        payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        booking_id INTEGER NOT NULL,
        amount REAL NOT NULL,
        status TEXT NOT NULL DEFAULT 'NOT PAID',
        CONSTRAINT payment_booking_uindex UNIQUE (booking_id),
        CONSTRAINT payment_booking_fk
            FOREIGN KEY (booking_id) REFERENCES booking(booking_id)
    )",
];

// Writers wait this long for the write lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Database connection manager
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        // Every connection to an in-memory URL is its own database, so keep one
        // connection alive for the lifetime of the pool
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            // Readers keep going while a booking holds the write lock
            options = options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new().max_connections(10)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Database { pool })
    }

    // Create the schema if it does not exist yet
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
