//! In-process store for dry runs.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::{SeedError, SeedReport, SeedStore, Seeder};
use crate::config::{RowCounts, SeedConfig};
use crate::generators::{
    GeneratedCategory, GeneratedOrder, GeneratedProduct, GeneratedUser, PricedOrderDetail,
};
use crate::models::Table;

/// Keeps every inserted row in memory.
///
/// Category keys count up from 1 like a `SERIAL` column and are not reused
/// after [`SeedStore::clear_all`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Vec<GeneratedUser>,
    products: Vec<GeneratedProduct>,
    orders: Vec<GeneratedOrder>,
    order_details: Vec<PricedOrderDetail>,
    categories: Vec<(i32, GeneratedCategory)>,
    last_category_id: i32,
    insert_log: Vec<Table>,
}

impl MemoryStore {
    pub fn users(&self) -> &[GeneratedUser] {
        &self.users
    }

    pub fn products(&self) -> &[GeneratedProduct] {
        &self.products
    }

    pub fn orders(&self) -> &[GeneratedOrder] {
        &self.orders
    }

    pub fn order_details(&self) -> &[PricedOrderDetail] {
        &self.order_details
    }

    /// Categories with their assigned keys, in insertion order.
    pub fn categories(&self) -> &[(i32, GeneratedCategory)] {
        &self.categories
    }

    /// Table of every insert since the last clear, in insertion order.
    pub fn insert_log(&self) -> &[Table] {
        &self.insert_log
    }

    /// Rows currently held per table.
    pub fn row_counts(&self) -> RowCounts {
        RowCounts {
            users: self.users.len(),
            products: self.products.len(),
            orders: self.orders.len(),
            order_details: self.order_details.len(),
            categories: self.categories.len(),
        }
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn insert_user(&mut self, user: &GeneratedUser) -> Result<(), SeedError> {
        self.users.push(user.clone());
        self.insert_log.push(Table::Users);
        Ok(())
    }

    async fn insert_product(&mut self, product: &GeneratedProduct) -> Result<(), SeedError> {
        self.products.push(product.clone());
        self.insert_log.push(Table::Products);
        Ok(())
    }

    async fn insert_order(&mut self, order: &GeneratedOrder) -> Result<(), SeedError> {
        self.orders.push(order.clone());
        self.insert_log.push(Table::Orders);
        Ok(())
    }

    async fn product_price(&mut self, product_id: Uuid) -> Result<Option<Decimal>, SeedError> {
        Ok(self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.price))
    }

    async fn insert_order_detail(&mut self, detail: &PricedOrderDetail) -> Result<(), SeedError> {
        self.order_details.push(detail.clone());
        self.insert_log.push(Table::OrderDetails);
        Ok(())
    }

    async fn insert_category(&mut self, category: &GeneratedCategory) -> Result<i32, SeedError> {
        self.last_category_id += 1;
        self.categories
            .push((self.last_category_id, category.clone()));
        self.insert_log.push(Table::ProductCategories);
        Ok(self.last_category_id)
    }

    async fn clear_all(&mut self) -> Result<(), SeedError> {
        self.order_details.clear();
        self.orders.clear();
        self.products.clear();
        self.categories.clear();
        self.users.clear();
        self.insert_log.clear();
        Ok(())
    }
}

/// Runs the full sequence against a fresh [`MemoryStore`].
pub async fn seed_memory(
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<(SeedReport, MemoryStore), SeedError> {
    info!("Dry run: generating rows without a database");
    let mut seeder = Seeder::for_config(MemoryStore::default(), config);
    let report = seeder.run(&config.counts, rng).await?;
    Ok((report, seeder.into_store()))
}
