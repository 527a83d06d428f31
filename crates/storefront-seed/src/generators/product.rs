//! Product catalog generation.

use std::ops::RangeInclusive;

use rand::Rng;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{random_id, text, timestamps};

/// Generated product data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedProduct {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// `None` when no categories are configured.
    pub category_id: Option<i32>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub creation_date: OffsetDateTime,
}

/// Configuration for product generation.
#[derive(Debug, Clone)]
pub struct ProductGenConfig {
    /// Price range in cents (5.00 to 500.00).
    pub price_cents: RangeInclusive<i64>,
    /// Units in stock.
    pub stock_quantity: RangeInclusive<i32>,
    /// Upper bound on description length in characters.
    pub description_max_chars: usize,
}

impl Default for ProductGenConfig {
    fn default() -> Self {
        Self {
            price_cents: 500..=50_000,
            stock_quantity: 1..=1000,
            description_max_chars: 200,
        }
    }
}

/// Generates catalog products.
///
/// Category references are drawn from `1..=category_count` and are not
/// checked against existing rows; categories are seeded after products.
pub struct ProductGenerator {
    config: ProductGenConfig,
    category_count: usize,
    now: OffsetDateTime,
}

impl ProductGenerator {
    /// Creates a generator for `category_count` categories.
    pub fn new(category_count: usize) -> Self {
        Self::with_config(ProductGenConfig::default(), category_count)
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ProductGenConfig, category_count: usize) -> Self {
        Self {
            config,
            category_count,
            now: OffsetDateTime::now_utc(),
        }
    }

    /// Pins the reference time used for creation dates.
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = now;
        self
    }

    /// Generates a single product.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedProduct {
        let category_id = (self.category_count > 0)
            .then(|| rng.gen_range(1..=self.category_count))
            .map(|id| i32::try_from(id).unwrap_or(i32::MAX));
        let cents = rng.gen_range(self.config.price_cents.clone());

        GeneratedProduct {
            id: random_id(rng),
            name: text::capitalized_word(rng),
            description: text::text(self.config.description_max_chars, rng),
            category_id,
            price: Decimal::new(cents, 2),
            stock_quantity: rng.gen_range(self.config.stock_quantity.clone()),
            creation_date: timestamps::this_decade(self.now, rng),
        }
    }

    /// Generates multiple products.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedProduct> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}
