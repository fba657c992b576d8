use chrono::{FixedOffset, Local};
use std::env;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://airline.db?mode=rwc";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Credentials for the admin account created at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_user: Option<String>,
    pub database_password: Option<String>,
    /// Key for Rocket's private cookies; Rocket generates one in debug builds.
    pub secret_key: Option<String>,
    /// Zone used to turn a departure timestamp into a local calendar date.
    pub local_offset: FixedOffset,
    pub bcrypt_cost: u32,
    pub admin: Option<AdminBootstrap>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_user: None,
            database_password: None,
            secret_key: None,
            local_offset: *Local::now().offset(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            admin: None,
        }
    }
}

impl AppConfig {
    // Read configuration from the environment (call dotenv first)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let local_offset = match var("LOCAL_UTC_OFFSET") {
            Some(raw) => parse_offset(&raw).ok_or(ConfigError::Invalid {
                name: "LOCAL_UTC_OFFSET",
                value: raw,
            })?,
            None => defaults.local_offset,
        };

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "BCRYPT_COST",
                        value: raw,
                    })
                }
            },
            None => defaults.bcrypt_cost,
        };

        let admin = match (var("ADMIN_USERNAME"), var("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminBootstrap {
                username,
                password,
                full_name: var("ADMIN_FULL_NAME"),
            }),
            _ => None,
        };

        Ok(AppConfig {
            database_url: check_database_url(
                var("DATABASE_URL").unwrap_or(defaults.database_url),
            )?,
            database_user: var("DATABASE_USER"),
            database_password: var("DATABASE_PASSWORD"),
            secret_key: var("SECRET_KEY"),
            local_offset,
            bcrypt_cost,
            admin,
        })
    }

    /// Whether DATABASE_USER or DATABASE_PASSWORD was given. SQLite has no
    /// use for either, so they are only reported at startup.
    pub fn has_database_credentials(&self) -> bool {
        self.database_user.is_some() || self.database_password.is_some()
    }
}

/// The pool only speaks SQLite, so any other scheme is rejected up front.
pub fn check_database_url(url: String) -> Result<String, ConfigError> {
    if url.trim_start().starts_with("sqlite:") {
        Ok(url)
    } else {
        Err(ConfigError::Invalid {
            name: "DATABASE_URL",
            value: url,
        })
    }
}

// Empty values count as unset
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM` or `Z`.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let sign = match raw.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = raw[1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
