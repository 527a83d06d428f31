//! Row generators for the storefront tables.
//!
//! Generators are pure: they only draw from the supplied RNG and never touch
//! the database. References to other rows are passed in by the caller.
//! - [`UserGenerator`]: users with names, unique emails and loyalty tiers
//! - [`ProductGenerator`]: catalog products with prices and stock
//! - [`OrderGenerator`]: orders with amounts and delivery dates
//! - [`OrderDetailGenerator`]: order lines, priced after the product lookup
//! - [`CategoryGenerator`]: product categories with optional parents

pub mod category;
pub mod order;
pub mod order_detail;
pub mod product;
pub mod text;
pub mod timestamps;
pub mod user;

pub use category::{CategoryGenerator, GeneratedCategory};
pub use order::{GeneratedOrder, OrderGenConfig, OrderGenerator};
pub use order_detail::{GeneratedOrderDetail, OrderDetailGenerator, PricedOrderDetail};
pub use product::{GeneratedProduct, ProductGenConfig, ProductGenerator};
pub use user::{GeneratedUser, UserGenerator};

use rand::Rng;
use uuid::Uuid;

/// A version 4 key drawn from `rng`, so seeded runs repeat their keys.
pub fn random_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}
