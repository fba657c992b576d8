use crate::models::flight::Flight;
use crate::models::payment::PaymentStatus;
use crate::utils::error::{AppError, AppResult};
use crate::utils::form::{filled, normalize_email};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

// Booking Status Enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString,
)]
pub enum BookingStatus {
    #[sqlx(rename = "PENDING")]
    #[strum(serialize = "PENDING")]
    #[serde(rename = "PENDING")]
    Pending,
    #[sqlx(rename = "CONFIRMED")]
    #[strum(serialize = "CONFIRMED")]
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[sqlx(rename = "CANCELLED")]
    #[strum(serialize = "CANCELLED")]
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub passenger_id: i64,
    pub flight_id: String,
    pub seat_no: String,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
}

/// Raw booking form as posted by the browser.
#[derive(Debug, Default, Clone, FromForm)]
pub struct BookingForm {
    pub passenger_name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub flight_id: Option<String>,
    pub seat_no: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub passenger_name: String,
    pub contact: Option<String>,
    pub email: String,
    pub flight_id: String,
    pub seat_no: String,
    pub amount: f64,
}

impl BookingForm {
    /// Checks the form before anything touches the database.
    ///
    /// An empty email falls back to the logged-in traveler's address.
    pub fn into_request(self, session_email: Option<&str>) -> AppResult<BookingRequest> {
        let email = filled(self.email)
            .or_else(|| filled(session_email.map(str::to_string)))
            .map(|email| normalize_email(&email));

        let (passenger_name, email, flight_id, seat_no, amount) = match (
            filled(self.passenger_name),
            email,
            filled(self.flight_id),
            filled(self.seat_no),
            filled(self.amount),
        ) {
            (Some(name), Some(email), Some(flight), Some(seat), Some(amount)) => {
                (name, email, flight, seat, amount)
            }
            _ => return Err(AppError::ValidationError("All fields are required!".into())),
        };

        let amount = match amount.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
            _ => return Err(AppError::ValidationError("Invalid amount.".into())),
        };

        Ok(BookingRequest {
            passenger_name,
            contact: filled(self.contact),
            email,
            flight_id,
            seat_no,
            amount,
        })
    }
}

/// A reservation that went through and now waits for payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: i64,
    pub passenger_name: String,
    pub flight_id: String,
    pub seat_no: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TravelerBooking {
    pub booking_id: i64,
    pub passenger_name: String,
    pub flight_id: String,
    pub seat_no: String,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub booking_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BookingRecord {
    pub booking_id: i64,
    pub passenger_name: String,
    pub passenger_email: String,
    pub flight_id: String,
    pub seat_no: String,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
}

/// A row of the public bookings list, without contact details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicBooking {
    pub booking_id: i64,
    pub passenger_name: String,
    pub flight_id: String,
    pub seat_no: String,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
}

impl From<BookingRecord> for PublicBooking {
    fn from(record: BookingRecord) -> Self {
        PublicBooking {
            booking_id: record.booking_id,
            passenger_name: record.passenger_name,
            flight_id: record.flight_id,
            seat_no: record.seat_no,
            booking_date: record.booking_date,
            status: record.status,
            payment_status: record.payment_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingFormView {
    pub flights: Vec<Flight>,
}

#[derive(Debug, Serialize)]
pub struct MyBookingsView {
    pub bookings: Vec<TravelerBooking>,
}

#[derive(Debug, Serialize)]
pub struct BookingsView {
    pub bookings: Vec<PublicBooking>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn complete_form() -> BookingForm {
        BookingForm {
            passenger_name: Some("Jane".into()),
            contact: Some("555-0100".into()),
            email: Some("Jane@X.com".into()),
            flight_id: Some("AA100".into()),
            seat_no: Some("12A".into()),
            amount: Some("199.99".into()),
        }
    }

    #[test]
    fn complete_form_becomes_request() {
        let request = complete_form().into_request(None).unwrap();
        assert_eq!(request.email, "jane@x.com");
        assert_eq!(request.amount, 199.99);
        assert_eq!(request.contact.as_deref(), Some("555-0100"));
    }

    #[test]
    fn each_required_field_is_checked() {
        let strip: [fn(&mut BookingForm); 5] = [
            |f| f.passenger_name = None,
            |f| f.email = Some("  ".into()),
            |f| f.flight_id = None,
            |f| f.seat_no = Some(String::new()),
            |f| f.amount = None,
        ];
        for remove in strip {
            let mut form = complete_form();
            remove(&mut form);
            match form.into_request(None) {
                Err(AppError::ValidationError(msg)) => assert_eq!(msg, "All fields are required!"),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn contact_is_optional() {
        let form = BookingForm {
            contact: None,
            ..complete_form()
        };
        assert_eq!(form.into_request(None).unwrap().contact, None);
    }

    #[test]
    fn email_falls_back_to_session() {
        let form = BookingForm {
            email: None,
            ..complete_form()
        };
        let request = form.into_request(Some("Traveler@Y.com")).unwrap();
        assert_eq!(request.email, "traveler@y.com");
    }

    #[test]
    fn amount_must_be_a_number() {
        for amount in ["abc", "-5", "NaN"] {
            let form = BookingForm {
                amount: Some(amount.into()),
                ..complete_form()
            };
            match form.into_request(None) {
                Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Invalid amount."),
                other => panic!("expected invalid amount for {}, got {:?}", amount, other),
            }
        }
    }

    #[test]
    fn status_strings_match_storage() {
        assert_eq!(BookingStatus::Confirmed.to_string(), "CONFIRMED");
        assert_eq!(
            BookingStatus::from_str("CANCELLED").unwrap(),
            BookingStatus::Cancelled
        );
    }
}
