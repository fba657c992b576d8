use crate::utils::session::Role;
use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::{Flash, Redirect, Responder};
use rocket::Request;
use rocket::Response;
use rocket_okapi::JsonSchema;
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug, Serialize, JsonSchema)]
pub enum AppError {
    // The driver message stays in the server log, never in the response
    #[error("Database error")]
    DatabaseError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Email already registered. Please log in.")]
    DuplicateEmail,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("{}", .0.login_prompt())]
    Unauthenticated(Role),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Booking failed: {0}")]
    BookingRejected(String),
}

// Convert sqlx::Error (database error) to AppError::DatabaseError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        AppError::ValidationError(format!("Invalid or missing: {}", fields.join(", ")))
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::DatabaseError(_) => Status::InternalServerError,
            AppError::InvalidCredentials | AppError::Unauthenticated(_) => Status::Unauthorized,
            AppError::DuplicateEmail | AppError::BookingRejected(_) => Status::Conflict,
        }
    }

    /// Turns the error into a flash message on a redirect for the HTML flows.
    ///
    /// `fallback` is where the handler sends the user back to. Missing sessions
    /// go to the matching login page and duplicate signups to the traveler login
    /// regardless of `fallback`.
    pub fn into_flash(self, fallback: Redirect) -> Flash<Redirect> {
        match self {
            AppError::Unauthenticated(role) => {
                Flash::warning(Redirect::to(role.login_path()), role.login_prompt())
            }
            AppError::DuplicateEmail => {
                Flash::warning(Redirect::to("/login"), AppError::DuplicateEmail.to_string())
            }
            AppError::DatabaseError(ref detail) => {
                tracing::error!(error = %detail, "database operation failed");
                Flash::error(fallback, "A database error occurred. Please try again.")
            }
            AppError::ValidationError(_) | AppError::NotFound(_) => {
                Flash::warning(fallback, self.to_string())
            }
            AppError::InvalidCredentials | AppError::BookingRejected(_) => {
                Flash::error(fallback, self.to_string())
            }
        }
    }
}

// Format errors from the JSON endpoints as a JSON body with the matching status
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();

        if let AppError::DatabaseError(ref detail) = self {
            tracing::error!(error = %detail, "database operation failed");
        }

        let json = json!({
            "error": self.to_string()
        });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(None, Cursor::new(json.to_string()))
            .ok()
    }
}
