//! Database integration for seeding.
//!
//! The [`Seeder`] drives the generate-and-insert sequence against any
//! [`SeedStore`]: [`PgStore`] writes to PostgreSQL inside one transaction,
//! [`MemoryStore`] keeps rows in process for dry runs and tests.

mod memory;
mod postgres;
mod seeder;
mod store;

pub use memory::{MemoryStore, seed_memory};
pub use postgres::{PgStore, seed_database, seed_pool};
pub use seeder::{SeedError, SeedReport, Seeder};
pub use store::SeedStore;
