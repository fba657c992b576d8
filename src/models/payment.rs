use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

// Payment Status Enum; bookings without a payment row read as N/A or NOT PAID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString,
)]
pub enum PaymentStatus {
    #[sqlx(rename = "N/A")]
    #[strum(serialize = "N/A")]
    #[serde(rename = "N/A")]
    NotApplicable,
    #[sqlx(rename = "NOT PAID")]
    #[strum(serialize = "NOT PAID")]
    #[serde(rename = "NOT PAID")]
    NotPaid,
    #[sqlx(rename = "PAID")]
    #[strum(serialize = "PAID")]
    #[serde(rename = "PAID")]
    Paid,
    #[sqlx(rename = "CANCELLED")]
    #[strum(serialize = "CANCELLED")]
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub payment_id: i64,
    pub booking_id: i64,
    pub amount: f64,
    pub status: PaymentStatus,
}

/// Booking fields re-posted from the booking page to the payment step.
#[derive(Debug, Default, Clone, FromForm)]
pub struct PaymentForm {
    pub passenger_name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub flight_id: Option<String>,
    pub seat_no: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView {
    pub booking_id: i64,
    pub name: Option<String>,
    pub flight_id: Option<String>,
    pub seat_no: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSuccessView {
    pub booking_id: Option<i64>,
    pub amount: Option<String>,
}
