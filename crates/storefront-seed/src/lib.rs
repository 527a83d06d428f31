//! Synthetic data seeding for the storefront schema.
//!
//! This crate generates users, products, orders, order details and product
//! categories and inserts them into PostgreSQL one statement at a time,
//! inside a single transaction that is committed once at the end.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storefront_seed::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let mut rng = rand::thread_rng();
//! let report = seed_database(&config, &mut rng).await?;
//! println!("{} rows", report.inserted.total());
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod models;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, ConnectionConfig, RowCounts, SeedConfig};
    pub use crate::db::{
        MemoryStore, PgStore, SeedError, SeedReport, SeedStore, Seeder, seed_database,
        seed_memory, seed_pool,
    };
    pub use crate::generators::{
        CategoryGenerator, OrderDetailGenerator, OrderGenerator, ProductGenerator, UserGenerator,
    };
    pub use crate::models::{LoyaltyStatus, OrderStatus, Table};
}
