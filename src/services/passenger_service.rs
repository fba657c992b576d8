use crate::models::passenger::{CreatePassengerRequest, Passenger};
use crate::utils::error::AppResult;
use crate::utils::form::{filled, normalize_email};
use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::Validate;

pub struct PassengerService {
    pool: SqlitePool,
}

impl PassengerService {
    pub fn new(pool: SqlitePool) -> Self {
        PassengerService { pool }
    }

    pub async fn create(&self, request: CreatePassengerRequest) -> AppResult<i64> {
        // Normalize first so a blank name cannot slip past validation
        let request = CreatePassengerRequest {
            name: request.name.trim().to_string(),
            contact: filled(request.contact),
            email: normalize_email(&request.email),
        };
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let passenger_id = insert_passenger(
            &mut tx,
            &request.name,
            request.contact.as_deref(),
            &request.email,
        )
        .await?;
        tx.commit().await?;

        Ok(passenger_id)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Passenger>> {
        let passengers = sqlx::query_as::<_, Passenger>(
            "SELECT passenger_id, name, contact, email FROM passenger ORDER BY passenger_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(passengers)
    }
}

/// Reuses the passenger row for `email` or inserts one.
///
/// Email is only advisory as a key: nothing stops two rows sharing it, and
/// the oldest one wins.
pub async fn find_or_create(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    contact: Option<&str>,
    email: &str,
) -> AppResult<i64> {
    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT passenger_id FROM passenger WHERE email = ? ORDER BY passenger_id LIMIT 1",
    )
    .bind(email)
    .fetch_optional(&mut **tx)
    .await?;

    match existing {
        Some(passenger_id) => Ok(passenger_id),
        None => insert_passenger(tx, name, contact, email).await,
    }
}

async fn insert_passenger(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    contact: Option<&str>,
    email: &str,
) -> AppResult<i64> {
    let result = sqlx::query("INSERT INTO passenger (name, contact, email) VALUES (?, ?, ?)")
        .bind(name)
        .bind(contact)
        .bind(email)
        .execute(&mut **tx)
        .await?;

    Ok(result.last_insert_rowid())
}
