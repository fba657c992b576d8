use crate::utils::error::AppResult;
use crate::utils::form::normalize_email;
use serde::Serialize;
use validator::Validate;

#[derive(Debug, sqlx::FromRow)]
pub struct TravelerAccount {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Default, FromForm, Validate)]
pub struct SignupForm {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn into_request(self) -> AppResult<SignupRequest> {
        let form = SignupForm {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| normalize_email(&e)),
            password: self.password,
        };
        form.validate()?;

        Ok(SignupRequest {
            name: form.name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            password: form.password.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, FromForm)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginForm> for LoginRequest {
    // Missing fields simply fail verification later
    fn from(form: LoginForm) -> Self {
        LoginRequest {
            email: normalize_email(form.email.as_deref().unwrap_or_default()),
            password: form.password.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WelcomeView {
    pub user: String,
}
