use crate::models::booking::BookingRecord;
use crate::models::passenger::Passenger;
use serde::Serialize;

#[derive(Debug, sqlx::FromRow)]
pub struct AdminAccount {
    pub admin_id: i64,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

impl AdminAccount {
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self.username.clone(),
        }
    }
}

#[derive(Debug, Default, FromForm)]
pub struct AdminLoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub admin_name: String,
}

#[derive(Debug, Serialize)]
pub struct AdminBookingsView {
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, Serialize)]
pub struct AdminPassengersView {
    pub passengers: Vec<Passenger>,
}
