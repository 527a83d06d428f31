//! Order generation.

use std::ops::RangeInclusive;

use rand::{Rng, seq::SliceRandom};
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::{random_id, timestamps};
use crate::models::OrderStatus;

/// Generated order data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_date: OffsetDateTime,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub delivery_date: OffsetDateTime,
}

/// Configuration for order generation.
#[derive(Debug, Clone)]
pub struct OrderGenConfig {
    /// Order total in cents (20.00 to 1000.00).
    pub total_cents: RangeInclusive<i64>,
    /// Whole days between ordering and delivery.
    pub delivery_days: RangeInclusive<i64>,
}

impl Default for OrderGenConfig {
    fn default() -> Self {
        Self {
            total_cents: 2_000..=100_000,
            delivery_days: 1..=10,
        }
    }
}

/// Generates orders placed by existing users.
pub struct OrderGenerator {
    config: OrderGenConfig,
    now: OffsetDateTime,
}

impl OrderGenerator {
    pub fn new() -> Self {
        Self::with_config(OrderGenConfig::default())
    }

    pub fn with_config(config: OrderGenConfig) -> Self {
        Self {
            config,
            now: OffsetDateTime::now_utc(),
        }
    }

    /// Pins the reference time used for order dates.
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = now;
        self
    }

    /// Generates an order for `user_id`.
    ///
    /// The order date falls within the current year; delivery follows
    /// a whole number of days later.
    pub fn generate(&self, user_id: Uuid, rng: &mut impl Rng) -> GeneratedOrder {
        let order_date = timestamps::this_year(self.now, rng);
        let delivery_days = rng.gen_range(self.config.delivery_days.clone());
        let cents = rng.gen_range(self.config.total_cents.clone());
        let status = *OrderStatus::ALL
            .choose(rng)
            .unwrap_or(&OrderStatus::Pending);

        GeneratedOrder {
            id: random_id(rng),
            user_id,
            order_date,
            total_amount: Decimal::new(cents, 2),
            status,
            delivery_date: order_date + Duration::days(delivery_days),
        }
    }
}

impl Default for OrderGenerator {
    fn default() -> Self {
        Self::new()
    }
}
