//! Seat reservation and release.
//!
//! Both operations run inside the caller's transaction so that the seat count,
//! the booking row and the payment row move together. Each one opens with a
//! write, so the transaction holds SQLite's write lock before it reads anything;
//! competing reservations then queue on the busy timeout instead of deadlocking
//! on a lock upgrade. Seat accounting relies on a conditional decrement: the
//! `UPDATE` only matches while seats remain.

use crate::models::booking::{BookingRequest, BookingStatus};
use crate::models::payment::PaymentStatus;
use crate::services::passenger_service;
use crate::utils::error::AppResult;
use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReservationOutcome {
    #[strum(serialize = "SUCCESS")]
    Success,
    #[strum(serialize = "FLIGHT_NOT_FOUND")]
    FlightNotFound,
    #[strum(serialize = "SOLD_OUT")]
    SoldOut,
    #[strum(serialize = "SEAT_TAKEN")]
    SeatTaken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub booking_id: Option<i64>,
    pub outcome: ReservationOutcome,
}

impl Reservation {
    fn rejected(outcome: ReservationOutcome) -> Self {
        Reservation {
            booking_id: None,
            outcome,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CancelOutcome {
    #[strum(serialize = "SUCCESS")]
    Success,
    #[strum(serialize = "NOT_FOUND")]
    NotFound,
    #[strum(serialize = "ALREADY_CANCELLED")]
    AlreadyCancelled,
}

pub struct ReservationService;

impl ReservationService {
    /// Takes one seat on the requested flight and records a pending booking
    /// with an unpaid payment row for the passenger behind `request.email`.
    ///
    /// A rejected outcome may leave the seat decrement applied inside `tx`; the
    /// caller must roll back.
    pub async fn reserve(
        tx: &mut Transaction<'_, Sqlite>,
        request: &BookingRequest,
    ) -> AppResult<Reservation> {
        let flight_id = request.flight_id.as_str();
        let seat_no = request.seat_no.as_str();

        // First statement of the transaction: takes the write lock
        let decrement = sqlx::query(
            r#"
            UPDATE flight
            SET seats_available = seats_available - 1
            WHERE flight_id = ? AND seats_available > 0
            "#,
        )
        .bind(flight_id)
        .execute(&mut **tx)
        .await?;

        if decrement.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT 1 FROM flight WHERE flight_id = ?")
                    .bind(flight_id)
                    .fetch_optional(&mut **tx)
                    .await?;

            return Ok(Reservation::rejected(match exists {
                Some(_) => ReservationOutcome::SoldOut,
                None => ReservationOutcome::FlightNotFound,
            }));
        }

        let seat_holder: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT booking_id FROM booking
            WHERE flight_id = ? AND seat_no = ? AND status <> ?
            "#,
        )
        .bind(flight_id)
        .bind(seat_no)
        .bind(BookingStatus::Cancelled.to_string())
        .fetch_optional(&mut **tx)
        .await?;

        if seat_holder.is_some() {
            return Ok(Reservation::rejected(ReservationOutcome::SeatTaken));
        }

        let passenger_id = passenger_service::find_or_create(
            tx,
            &request.passenger_name,
            request.contact.as_deref(),
            &request.email,
        )
        .await?;

        let booking = sqlx::query(
            r#"
            INSERT INTO booking (passenger_id, flight_id, seat_no, status, booking_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(passenger_id)
        .bind(flight_id)
        .bind(seat_no)
        .bind(BookingStatus::Pending.to_string())
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        let booking_id = booking.last_insert_rowid();

        sqlx::query("INSERT INTO payment (booking_id, amount, status) VALUES (?, ?, ?)")
            .bind(booking_id)
            .bind(request.amount)
            .bind(PaymentStatus::NotPaid.to_string())
            .execute(&mut **tx)
            .await?;

        Ok(Reservation {
            booking_id: Some(booking_id),
            outcome: ReservationOutcome::Success,
        })
    }

    /// Marks the booking cancelled and hands its seat back to the flight.
    pub async fn cancel(
        tx: &mut Transaction<'_, Sqlite>,
        booking_id: i64,
    ) -> AppResult<CancelOutcome> {
        let cancelled = sqlx::query(
            "UPDATE booking SET status = ? WHERE booking_id = ? AND status <> ?",
        )
        .bind(BookingStatus::Cancelled.to_string())
        .bind(booking_id)
        .bind(BookingStatus::Cancelled.to_string())
        .execute(&mut **tx)
        .await?;

        if cancelled.rows_affected() == 0 {
            let known: Option<i64> =
                sqlx::query_scalar("SELECT booking_id FROM booking WHERE booking_id = ?")
                    .bind(booking_id)
                    .fetch_optional(&mut **tx)
                    .await?;

            return Ok(match known {
                Some(_) => CancelOutcome::AlreadyCancelled,
                None => CancelOutcome::NotFound,
            });
        }

        // Bounded so a flight edited down to fewer seats keeps its invariant
        sqlx::query(
            r#"
            UPDATE flight
            SET seats_available = seats_available + 1
            WHERE flight_id = (SELECT flight_id FROM booking WHERE booking_id = ?)
              AND seats_available < seats_total
            "#,
        )
        .bind(booking_id)
        .execute(&mut **tx)
        .await?;

        Ok(CancelOutcome::Success)
    }
}
