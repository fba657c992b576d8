use crate::models::user::{LoginRequest, SignupRequest, TravelerAccount};
use crate::utils::error::{AppError, AppResult};
use crate::utils::form::normalize_email;
use crate::utils::session::TravelerIdentity;
use bcrypt::{hash, verify};
use sqlx::SqlitePool;

pub struct UserService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        UserService { pool, bcrypt_cost }
    }

    // Register a new traveler and return the identity to put in the session
    pub async fn signup(&self, request: SignupRequest) -> AppResult<TravelerIdentity> {
        let email = normalize_email(&request.email);

        // Check if email already exists
        let existing_user = sqlx::query("SELECT user_id FROM app_user WHERE email = ?")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        if existing_user.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        // Hash password
        let password_hash = hash(request.password.as_bytes(), self.bcrypt_cost)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        // Insert user; the unique index still catches a concurrent signup
        let result = sqlx::query("INSERT INTO app_user (name, email, password_hash) VALUES (?, ?, ?)")
            .bind(&request.name)
            .bind(&email)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(db_err) = &err {
                    if db_err.is_unique_violation() {
                        return AppError::DuplicateEmail;
                    }
                }
                AppError::from(err)
            })?;

        tracing::info!(email = %email, "traveler signed up");

        Ok(TravelerIdentity {
            user_id: result.last_insert_rowid(),
            name: request.name,
            email,
        })
    }

    // Login traveler
    pub async fn login(&self, request: LoginRequest) -> AppResult<TravelerIdentity> {
        let email = normalize_email(&request.email);

        let user = sqlx::query_as::<_, TravelerAccount>(
            "SELECT user_id, name, email, password_hash FROM app_user WHERE email = ?",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        // Verify password; an unreadable hash counts as a mismatch
        let password_matches = verify(request.password.as_bytes(), &user.password_hash)
            .unwrap_or(false);

        if !password_matches {
            tracing::warn!(email = %email, "traveler login rejected");
            return Err(AppError::InvalidCredentials);
        }

        Ok(TravelerIdentity {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
        })
    }
}
