use crate::models::admin::AdminAccount;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::AdminIdentity;
use bcrypt::{hash, verify};
use sqlx::SqlitePool;

pub struct AdminService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl AdminService {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        AdminService { pool, bcrypt_cost }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<AdminIdentity> {
        let admin = sqlx::query_as::<_, AdminAccount>(
            "SELECT admin_id, username, password_hash, full_name FROM admin_user WHERE username = ?",
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !verify(password.as_bytes(), &admin.password_hash).unwrap_or(false) {
            tracing::warn!(username = %admin.username, "admin login rejected");
            return Err(AppError::InvalidCredentials);
        }

        Ok(AdminIdentity {
            admin_id: admin.admin_id,
            name: admin.display_name(),
        })
    }

    /// Creates the admin account unless the username is already taken.
    /// Returns whether a row was inserted.
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> AppResult<bool> {
        let password_hash = hash(password.as_bytes(), self.bcrypt_cost)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO admin_user (username, password_hash, full_name)
            VALUES (?, ?, ?)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username.trim())
        .bind(&password_hash)
        .bind(full_name)
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() > 0;
        if created {
            tracing::info!(username = %username.trim(), "admin account created");
        }
        Ok(created)
    }
}
