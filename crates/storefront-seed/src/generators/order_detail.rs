//! Order line generation.
//!
//! A line is generated without a price; the seeder looks the unit price up
//! from the referenced product and then calls [`GeneratedOrderDetail::priced`].

use std::ops::RangeInclusive;

use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

/// An order line awaiting its unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedOrderDetail {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

impl GeneratedOrderDetail {
    /// Attaches the unit price and computes the line total.
    pub fn priced(self, price_per_unit: Decimal) -> PricedOrderDetail {
        PricedOrderDetail {
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            price_per_unit,
            total_price: price_per_unit * Decimal::from(self.quantity),
        }
    }
}

/// Order line ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrderDetail {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price_per_unit: Decimal,
    pub total_price: Decimal,
}

/// Generates order lines.
pub struct OrderDetailGenerator {
    quantity: RangeInclusive<i32>,
}

impl OrderDetailGenerator {
    pub fn new() -> Self {
        Self { quantity: 1..=10 }
    }

    /// Generates a line for `product_id` within `order_id`.
    pub fn generate(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        rng: &mut impl Rng,
    ) -> GeneratedOrderDetail {
        GeneratedOrderDetail {
            order_id,
            product_id,
            quantity: rng.gen_range(self.quantity.clone()),
        }
    }
}

impl Default for OrderDetailGenerator {
    fn default() -> Self {
        Self::new()
    }
}
