use crate::utils::error::{AppError, AppResult};
use rocket::http::{Cookie, CookieJar};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use rocket_okapi::JsonSchema;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "session";

// Bump when the shape of `Session` changes; older cookies then load as empty
const SESSION_VERSION: u32 = 1;

/// The two disjoint identities a browser can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum Role {
    Traveler,
    Admin,
}

impl Role {
    pub fn login_path(&self) -> &'static str {
        match self {
            Role::Traveler => "/login",
            Role::Admin => "/admin/login",
        }
    }

    pub fn login_prompt(&self) -> &'static str {
        match self {
            Role::Traveler => "Please log in to continue.",
            Role::Admin => "Admin access required.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelerIdentity {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub admin_id: i64,
    pub name: String,
}

/// Booking fields parked between the booking form and the payment page.
///
/// `booking_id` is only known once a reservation went through; the payment
/// page shows a placeholder until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingPayment {
    pub booking_id: Option<i64>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub flight_id: Option<String>,
    pub seat_no: Option<String>,
    pub amount: Option<String>,
}

/// Per-browser state, stored as JSON in one private cookie.
///
/// Handlers receive it through the request guard and write it back with
/// [`Session::save`]; nothing reads the cookie directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    version: u32,
    pub traveler: Option<TravelerIdentity>,
    pub admin: Option<AdminIdentity>,
    pub pending_payment: Option<PendingPayment>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            version: SESSION_VERSION,
            traveler: None,
            admin: None,
            pending_payment: None,
        }
    }
}

impl Session {
    pub fn load(cookies: &CookieJar<'_>) -> Self {
        match cookies.get_private(SESSION_COOKIE) {
            Some(cookie) => Session::decode(cookie.value()),
            None => Session::default(),
        }
    }

    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Session>(raw) {
            Ok(session) if session.version == SESSION_VERSION => session,
            Ok(session) => {
                tracing::debug!(version = session.version, "discarding outdated session");
                Session::default()
            }
            Err(err) => {
                tracing::debug!(error = %err, "discarding unreadable session");
                Session::default()
            }
        }
    }

    pub fn save(&self, cookies: &CookieJar<'_>) {
        match serde_json::to_string(self) {
            Ok(value) => cookies.add_private(Cookie::new(SESSION_COOKIE, value)),
            Err(err) => tracing::error!(error = %err, "failed to encode session"),
        }
    }

    pub fn clear(cookies: &CookieJar<'_>) {
        cookies.remove_private(SESSION_COOKIE);
    }

    pub fn require_traveler(&self) -> AppResult<&TravelerIdentity> {
        self.traveler
            .as_ref()
            .ok_or(AppError::Unauthenticated(Role::Traveler))
    }

    pub fn require_admin(&self) -> AppResult<&AdminIdentity> {
        self.admin
            .as_ref()
            .ok_or(AppError::Unauthenticated(Role::Admin))
    }

    pub fn log_out_traveler(&mut self) {
        self.traveler = None;
        self.pending_payment = None;
    }

    pub fn log_out_admin(&mut self) {
        self.admin = None;
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(Session::load(request.cookies()))
    }
}
