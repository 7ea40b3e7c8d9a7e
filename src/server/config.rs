use chrono::Duration;
use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 15;
const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;
const MIN_JWT_SECRET_LEN: usize = 32;

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    pub cors_origin: String,

    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,

    /// Used to create the first superadmin when none exists.
    pub superadmin_email: Option<String>,
    pub superadmin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::InvalidEnvVar {
                name: "JWT_SECRET".to_string(),
                reason: format!("must be at least {} bytes", MIN_JWT_SECRET_LEN),
            }
            .into());
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            cors_origin: optional("CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            access_token_ttl: Duration::minutes(parse_or(
                "ACCESS_TOKEN_TTL_MINUTES",
                DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            )?),
            refresh_token_ttl: Duration::days(parse_or(
                "REFRESH_TOKEN_TTL_DAYS",
                DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            )?),
            superadmin_email: optional("SUPERADMIN_EMAIL"),
            superadmin_password: optional("SUPERADMIN_PASSWORD"),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
