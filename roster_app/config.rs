use dotenvy::dotenv;
use std::{env, fmt::Display, str::FromStr, time::Duration};

use roster_types::errors::ApplicationError;

use crate::repository::KeyCollision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub port: u16,
    pub db_max_connections: u32,
    pub request_timeout: Duration,
    pub key_collision: KeyCollision,
}

impl Config {
    pub fn from_env() -> Result<Self, ApplicationError> {
        dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the config from a variable lookup. Unparseable values fall back to defaults.
    pub fn from_vars<F>(var: F) -> Result<Self, ApplicationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match var("ROSTER_STORE").as_deref().map(str::trim) {
            Some("postgres") => StoreKind::Postgres,
            Some("memory") | None => StoreKind::Memory,
            Some(other) => {
                tracing::warn!("Unknown ROSTER_STORE '{other}', using the in-memory store");
                StoreKind::Memory
            }
        };

        let database_url = var("DATABASE_URL");
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ApplicationError::Infrastructure(
                "DATABASE_URL must be set when ROSTER_STORE=postgres".to_string(),
            ));
        }

        let port = parse_or("ROSTER_PORT", var("ROSTER_PORT"), 8080u16);
        let db_max_connections = parse_or(
            "ROSTER_DB_MAX_CONNECTIONS",
            var("ROSTER_DB_MAX_CONNECTIONS"),
            5u32,
        )
        .max(1);
        let request_timeout = Duration::from_millis(parse_or(
            "ROSTER_REQUEST_TIMEOUT_MS",
            var("ROSTER_REQUEST_TIMEOUT_MS"),
            5000u64,
        ));
        let key_collision = parse_or(
            "ROSTER_MEMORY_KEY_COLLISION",
            var("ROSTER_MEMORY_KEY_COLLISION"),
            KeyCollision::default(),
        );

        Ok(Self {
            store,
            database_url,
            port,
            db_max_connections,
            request_timeout,
            key_collision,
        })
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match value {
        None => default,
        Some(val) => val.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {name} '{val}' ({e}), using {default:?}");
            default
        }),
    }
}
