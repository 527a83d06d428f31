//! Configuration types for seeding, read from the process environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Number of rows to generate for each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    /// `NUM_USERS`
    pub users: usize,
    /// `NUM_PRODUCTS`
    pub products: usize,
    /// `NUM_ORDERS`
    pub orders: usize,
    /// `NUM_ORDER_DETAILS`
    pub order_details: usize,
    /// `NUM_CATEGORIES`. Also the upper bound of `Products.category_id`.
    pub categories: usize,
}

impl Default for RowCounts {
    fn default() -> Self {
        Self {
            users: 100,
            products: 100,
            orders: 100,
            order_details: 300,
            categories: 10,
        }
    }
}

impl RowCounts {
    /// Same count for every table. Handy for small runs.
    pub const fn uniform(count: usize) -> Self {
        Self {
            users: count,
            products: count,
            orders: count,
            order_details: count,
            categories: count,
        }
    }

    /// Total number of rows a full run inserts.
    pub fn total(&self) -> usize {
        self.users + self.products + self.orders + self.order_details + self.categories
    }

    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            users: parse_var(lookup, "NUM_USERS")?.unwrap_or(defaults.users),
            products: parse_var(lookup, "NUM_PRODUCTS")?.unwrap_or(defaults.products),
            orders: parse_var(lookup, "NUM_ORDERS")?.unwrap_or(defaults.orders),
            order_details: parse_var(lookup, "NUM_ORDER_DETAILS")?
                .unwrap_or(defaults.order_details),
            categories: parse_var(lookup, "NUM_CATEGORIES")?.unwrap_or(defaults.categories),
        })
    }
}

/// PostgreSQL connection parameters.
///
/// Anything left unset falls back to the driver defaults (`PGHOST`, `PGPORT`,
/// ... and finally `localhost:5432`).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// `POSTGRES_DB`
    pub database: Option<String>,
    /// `POSTGRES_USER`
    pub user: Option<String>,
    /// `POSTGRES_PASSWORD`
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// `DB_HOST`
    pub host: Option<String>,
    /// `DB_PORT`
    pub port: Option<u16>,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl ConnectionConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database: string_var(lookup, "POSTGRES_DB"),
            user: string_var(lookup, "POSTGRES_USER"),
            password: string_var(lookup, "POSTGRES_PASSWORD"),
            host: string_var(lookup, "DB_HOST"),
            port: parse_var(lookup, "DB_PORT")?,
        })
    }

    /// Builds driver options, overriding only the parameters that were set.
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new();
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        options
    }
}

/// Configuration for a seeding run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    pub connection: ConnectionConfig,

    pub counts: RowCounts,

    /// Seed for the random generator (`SEED_RNG_SEED`). Unset means entropy.
    pub rng_seed: Option<u64>,

    /// Instant that generated timestamps count back from
    /// (`SEED_REFERENCE_TIME`, RFC 3339). Unset means the current time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub reference_time: Option<OffsetDateTime>,

    /// Empty all seeded tables before inserting (`SEED_CLEAR_EXISTING`).
    pub clear_existing: bool,

    /// Generate into memory without touching a database (`SEED_DRY_RUN`).
    pub dry_run: bool,
}

impl SeedConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            connection: ConnectionConfig::from_lookup(&lookup)?,
            counts: RowCounts::from_lookup(&lookup)?,
            rng_seed: parse_var(&lookup, "SEED_RNG_SEED")?,
            reference_time: time_var(&lookup, "SEED_REFERENCE_TIME")?,
            clear_existing: bool_var(&lookup, "SEED_CLEAR_EXISTING")?.unwrap_or(false),
            dry_run: bool_var(&lookup, "SEED_DRY_RUN")?.unwrap_or(false),
        })
    }
}

/// Returns the trimmed value of `var`, treating empty values as unset.
fn string_var<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    string_var(lookup, var)
        .map(|value| {
            value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

fn time_var<F>(lookup: &F, var: &'static str) -> Result<Option<OffsetDateTime>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    string_var(lookup, var)
        .map(|value| {
            OffsetDateTime::parse(&value, &Rfc3339).map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

fn bool_var<F>(lookup: &F, var: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    string_var(lookup, var)
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var,
                value,
                reason: "expected true or false".to_string(),
            }),
        })
        .transpose()
}
