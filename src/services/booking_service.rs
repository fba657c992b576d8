use crate::models::booking::{
    Booking, BookingConfirmation, BookingRecord, BookingRequest, BookingStatus, TravelerBooking,
};
use crate::models::payment::{Payment, PaymentStatus};
use crate::services::reservation_service::{CancelOutcome, ReservationOutcome, ReservationService};
use crate::utils::error::{AppError, AppResult};
use crate::utils::form::normalize_email;
use sqlx::SqlitePool;

pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        BookingService { pool }
    }

    /// Books a seat for the passenger behind `request.email`.
    ///
    /// Seat reservation, passenger lookup and confirmation commit as one unit;
    /// a rejected reservation rolls everything back.
    pub async fn submit(&self, request: BookingRequest) -> AppResult<BookingConfirmation> {
        let mut tx = self.pool.begin().await?;

        let reservation = ReservationService::reserve(&mut tx, &request).await?;

        let booking_id = match (reservation.outcome, reservation.booking_id) {
            (ReservationOutcome::Success, Some(booking_id)) => booking_id,
            (outcome, _) => {
                tx.rollback().await?;
                tracing::warn!(
                    flight_id = %request.flight_id,
                    seat_no = %request.seat_no,
                    outcome = %outcome,
                    "booking rejected"
                );
                return Err(AppError::BookingRejected(outcome.to_string()));
            }
        };

        sqlx::query("UPDATE booking SET status = ? WHERE booking_id = ?")
            .bind(BookingStatus::Confirmed.to_string())
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            booking_id,
            flight_id = %request.flight_id,
            seat_no = %request.seat_no,
            "booking confirmed"
        );

        Ok(BookingConfirmation {
            booking_id,
            passenger_name: request.passenger_name,
            flight_id: request.flight_id,
            seat_no: request.seat_no,
            amount: request.amount,
        })
    }

    /// Cancels the booking and its payment together.
    pub async fn cancel(&self, booking_id: Option<i64>) -> AppResult<()> {
        let booking_id =
            booking_id.ok_or_else(|| AppError::ValidationError("Missing booking ID.".into()))?;

        let mut tx = self.pool.begin().await?;

        if ReservationService::cancel(&mut tx, booking_id).await? == CancelOutcome::NotFound {
            tx.rollback().await?;
            return Err(AppError::NotFound("Booking not found".into()));
        }

        sqlx::query("UPDATE payment SET status = ? WHERE booking_id = ?")
            .bind(PaymentStatus::Cancelled.to_string())
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(booking_id, "booking cancelled");
        Ok(())
    }

    pub async fn list_for_traveler(&self, email: &str) -> AppResult<Vec<TravelerBooking>> {
        let bookings = sqlx::query_as::<_, TravelerBooking>(
            r#"
            SELECT
                b.booking_id,
                p.name AS passenger_name,
                f.flight_id,
                b.seat_no,
                b.status AS booking_status,
                COALESCE(pay.status, 'NOT PAID') AS payment_status,
                b.booking_date
            FROM booking b
            JOIN passenger p ON p.passenger_id = b.passenger_id
            JOIN flight f ON f.flight_id = b.flight_id
            LEFT JOIN payment pay ON pay.booking_id = b.booking_id
            WHERE LOWER(p.email) = ?
            ORDER BY b.booking_date DESC, b.booking_id DESC
            "#,
        )
        .bind(normalize_email(email))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all(&self) -> AppResult<Vec<BookingRecord>> {
        let bookings = sqlx::query_as::<_, BookingRecord>(
            r#"
            SELECT
                b.booking_id,
                p.name AS passenger_name,
                p.email AS passenger_email,
                b.flight_id,
                b.seat_no,
                b.booking_date,
                b.status,
                COALESCE(pay.status, 'N/A') AS payment_status
            FROM booking b
            JOIN passenger p ON p.passenger_id = b.passenger_id
            LEFT JOIN payment pay ON pay.booking_id = b.booking_id
            ORDER BY b.booking_date DESC, b.booking_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn get_booking(&self, booking_id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT booking_id, passenger_id, flight_id, seat_no, status, booking_date
            FROM booking WHERE booking_id = ?
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn get_payment(&self, booking_id: i64) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT payment_id, booking_id, amount, status FROM payment WHERE booking_id = ?",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }
}
