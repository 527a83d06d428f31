//! Storage seam used by the seeder.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::SeedError;
use crate::generators::{
    GeneratedCategory, GeneratedOrder, GeneratedProduct, GeneratedUser, PricedOrderDetail,
};
use crate::models::Table;

/// Deletion order that respects foreign keys: children before parents.
pub(crate) const CLEAR_ORDER: [Table; 5] = [
    Table::OrderDetails,
    Table::Orders,
    Table::Products,
    Table::ProductCategories,
    Table::Users,
];

/// One statement per method; implementations execute them in call order.
#[async_trait]
pub trait SeedStore: Send {
    async fn insert_user(&mut self, user: &GeneratedUser) -> Result<(), SeedError>;

    async fn insert_product(&mut self, product: &GeneratedProduct) -> Result<(), SeedError>;

    async fn insert_order(&mut self, order: &GeneratedOrder) -> Result<(), SeedError>;

    /// Looks up the current price of a product. `None` if no row matches.
    async fn product_price(&mut self, product_id: Uuid) -> Result<Option<Decimal>, SeedError>;

    async fn insert_order_detail(&mut self, detail: &PricedOrderDetail) -> Result<(), SeedError>;

    /// Inserts a category and returns the key assigned to it.
    async fn insert_category(&mut self, category: &GeneratedCategory) -> Result<i32, SeedError>;

    /// Deletes every row from the seeded tables.
    async fn clear_all(&mut self) -> Result<(), SeedError>;
}
