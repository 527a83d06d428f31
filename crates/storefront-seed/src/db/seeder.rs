//! The generate-and-insert sequence.

use std::time::Instant;

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::SeedStore;
use crate::config::{RowCounts, SeedConfig};
use crate::generators::{
    CategoryGenerator, OrderDetailGenerator, OrderGenerator, ProductGenerator, UserGenerator,
};
use crate::models::Table;

/// Rows between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No product with id {0} to price an order line")]
    ProductNotFound(Uuid),
    #[error("Cannot seed {table}: no {parent} rows to reference")]
    MissingReferences { table: Table, parent: Table },
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// Rows inserted per table.
    pub inserted: RowCounts,
    /// Wall-clock time spent generating and inserting (milliseconds).
    pub elapsed_ms: u64,
}

/// Generates rows table by table and hands each one to a [`SeedStore`].
///
/// Keys of inserted rows are remembered so later tables reference rows that
/// really exist: orders point at seeded users, order lines at seeded orders
/// and products, categories at earlier categories.
pub struct Seeder<S> {
    store: S,
    now: OffsetDateTime,
    category_count: usize,
    user_gen: UserGenerator,
    user_ids: Vec<Uuid>,
    product_ids: Vec<Uuid>,
    order_ids: Vec<Uuid>,
    category_ids: Vec<i32>,
}

impl<S: SeedStore> Seeder<S> {
    /// Creates a seeder writing to `store`.
    pub fn new(store: S) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            store,
            now,
            category_count: RowCounts::default().categories,
            user_gen: UserGenerator::at(now),
            user_ids: Vec::new(),
            product_ids: Vec::new(),
            order_ids: Vec::new(),
            category_ids: Vec::new(),
        }
    }

    /// Pins the reference time for every generated timestamp.
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = now;
        self.user_gen = UserGenerator::at(now);
        self
    }

    /// Creates a seeder for `config`, pinning the reference time when one is
    /// configured.
    pub fn for_config(store: S, config: &SeedConfig) -> Self {
        match config.reference_time {
            Some(now) => Self::new(store).at(now),
            None => Self::new(store),
        }
    }

    /// Sets the upper bound for `Products.category_id` used by
    /// [`Seeder::generate_products`]. [`Seeder::run`] takes it from
    /// `counts.categories` instead.
    pub fn with_category_count(mut self, count: usize) -> Self {
        self.category_count = count;
        self
    }

    /// Runs every table in the fixed order: users, products, orders,
    /// order details, categories. Stops at the first error.
    pub async fn run(
        &mut self,
        counts: &RowCounts,
        rng: &mut impl Rng,
    ) -> Result<SeedReport, SeedError> {
        let start = Instant::now();
        self.category_count = counts.categories;

        let users = self.generate_users(counts.users, rng).await?;
        let products = self.generate_products(counts.products, rng).await?;
        let orders = self.generate_orders(counts.orders, rng).await?;
        let order_details = self
            .generate_order_details(counts.order_details, rng)
            .await?;
        let categories = self
            .generate_product_categories(counts.categories, rng)
            .await?;

        Ok(SeedReport {
            inserted: RowCounts {
                users,
                products,
                orders,
                order_details,
                categories,
            },
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Inserts `count` users with run-unique emails.
    pub async fn generate_users(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} users...", count);

        for i in 0..count {
            let user = self.user_gen.generate(rng);
            self.store.insert_user(&user).await?;
            self.user_ids.push(user.id);
            log_progress(Table::Users, i + 1, count);
        }

        info!("Seeded {} users", count);
        Ok(count)
    }

    /// Inserts `count` products. Category ids are not checked.
    pub async fn generate_products(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} products...", count);
        let product_gen = ProductGenerator::new(self.category_count).at(self.now);

        for i in 0..count {
            let product = product_gen.generate(rng);
            self.store.insert_product(&product).await?;
            self.product_ids.push(product.id);
            log_progress(Table::Products, i + 1, count);
        }

        info!("Seeded {} products", count);
        Ok(count)
    }

    /// Inserts `count` orders, each placed by a user seeded earlier.
    pub async fn generate_orders(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} orders...", count);
        let order_gen = OrderGenerator::new().at(self.now);

        for i in 0..count {
            let user_id = sample(&self.user_ids, Table::Orders, Table::Users, rng)?;
            let order = order_gen.generate(user_id, rng);
            self.store.insert_order(&order).await?;
            self.order_ids.push(order.id);
            log_progress(Table::Orders, i + 1, count);
        }

        info!("Seeded {} orders", count);
        Ok(count)
    }

    /// Inserts `count` order lines.
    ///
    /// Each line reads the unit price of its product from the store first.
    /// A lookup that finds no product fails the run with
    /// [`SeedError::ProductNotFound`].
    pub async fn generate_order_details(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} order details...", count);
        let detail_gen = OrderDetailGenerator::new();

        for i in 0..count {
            let order_id = sample(&self.order_ids, Table::OrderDetails, Table::Orders, rng)?;
            let product_id = sample(&self.product_ids, Table::OrderDetails, Table::Products, rng)?;
            let detail = detail_gen.generate(order_id, product_id, rng);

            let price_per_unit = self
                .store
                .product_price(product_id)
                .await?
                .ok_or(SeedError::ProductNotFound(product_id))?;

            self.store
                .insert_order_detail(&detail.priced(price_per_unit))
                .await?;
            log_progress(Table::OrderDetails, i + 1, count);
        }

        info!("Seeded {} order details", count);
        Ok(count)
    }

    /// Inserts `count` categories; about half hang below an earlier one.
    pub async fn generate_product_categories(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} product categories...", count);
        let category_gen = CategoryGenerator::new();

        for i in 0..count {
            let category = category_gen.generate(&self.category_ids, rng);
            let id = self.store.insert_category(&category).await?;
            self.category_ids.push(id);
            log_progress(Table::ProductCategories, i + 1, count);
        }

        info!("Seeded {} product categories", count);
        Ok(count)
    }

    /// Clears all seeded tables and forgets every remembered key.
    ///
    /// **WARNING**: This deletes all data from the tables, not only rows
    /// written by this seeder.
    pub async fn clear_all(&mut self) -> Result<(), SeedError> {
        info!("Clearing all seeded tables...");
        self.store.clear_all().await?;
        self.user_ids.clear();
        self.product_ids.clear();
        self.order_ids.clear();
        self.category_ids.clear();
        info!("All tables cleared");
        Ok(())
    }

    pub fn user_ids(&self) -> &[Uuid] {
        &self.user_ids
    }

    pub fn product_ids(&self) -> &[Uuid] {
        &self.product_ids
    }

    pub fn order_ids(&self) -> &[Uuid] {
        &self.order_ids
    }

    pub fn category_ids(&self) -> &[i32] {
        &self.category_ids
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Picks a random key of an already seeded parent table.
fn sample<T: Copy>(
    ids: &[T],
    table: Table,
    parent: Table,
    rng: &mut impl Rng,
) -> Result<T, SeedError> {
    ids.choose(rng)
        .copied()
        .ok_or(SeedError::MissingReferences { table, parent })
}

fn log_progress(table: Table, done: usize, total: usize) {
    if done % PROGRESS_INTERVAL == 0 && done < total {
        debug!("  Seeded {}/{} {}", done, total, table);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::db::MemoryStore;
    use rand::{SeedableRng, rngs::StdRng};
    use time::{Duration, macros::datetime};

    fn seeder() -> Seeder<MemoryStore> {
        Seeder::new(MemoryStore::default()).at(datetime!(2026-10-17 12:00:00 UTC))
    }

    #[tokio::test]
    async fn test_generate_users_inserts_exactly_n() {
        let mut rng = StdRng::seed_from_u64(1);

        for n in [0, 1, 7, 250] {
            let mut seeder = seeder();
            let inserted = seeder.generate_users(n, &mut rng).await.unwrap();

            assert_eq!(inserted, n);
            assert_eq!(seeder.store().insert_log().len(), n);
            assert_eq!(seeder.store().users().len(), n);
            assert_eq!(seeder.user_ids().len(), n);
        }
    }

    #[tokio::test]
    async fn test_run_inserts_in_fixed_order() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut seeder = seeder();
        let counts = RowCounts {
            users: 5,
            products: 6,
            orders: 7,
            order_details: 8,
            categories: 4,
        };

        let report = seeder.run(&counts, &mut rng).await.unwrap();
        assert_eq!(report.inserted, counts);

        let mut tables = seeder.store().insert_log().to_vec();
        assert_eq!(tables.len(), counts.total());
        tables.dedup();
        assert_eq!(tables, Table::SEED_ORDER);
        assert_eq!(seeder.store().row_counts(), counts);
    }

    #[tokio::test]
    async fn test_default_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seeder = seeder();
        let report = seeder.run(&RowCounts::default(), &mut rng).await.unwrap();

        assert_eq!(report.inserted, RowCounts::default());
        assert_eq!(seeder.store().order_details().len(), 300);
    }

    #[tokio::test]
    async fn test_references_point_at_seeded_rows() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut seeder = seeder();
        seeder.run(&RowCounts::uniform(40), &mut rng).await.unwrap();
        let store = seeder.store();

        let users: HashSet<_> = store.users().iter().map(|u| u.id).collect();
        let orders: HashSet<_> = store.orders().iter().map(|o| o.id).collect();
        let prices: HashMap<_, _> = store.products().iter().map(|p| (p.id, p.price)).collect();

        assert!(store.orders().iter().all(|o| users.contains(&o.user_id)));
        for detail in store.order_details() {
            assert!(orders.contains(&detail.order_id));
            assert_eq!(prices.get(&detail.product_id), Some(&detail.price_per_unit));
            assert_eq!(
                detail.total_price,
                detail.price_per_unit * rust_decimal::Decimal::from(detail.quantity)
            );
        }

        let mut earlier = HashSet::new();
        for (id, category) in store.categories() {
            if let Some(parent) = category.parent_category_id {
                assert!(earlier.contains(&parent), "parent {parent} not seeded before {id}");
            }
            earlier.insert(*id);
        }
    }

    #[tokio::test]
    async fn test_seeded_value_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seeder = seeder();
        let counts = RowCounts {
            users: 20,
            products: 200,
            orders: 200,
            order_details: 200,
            categories: 6,
        };
        seeder.run(&counts, &mut rng).await.unwrap();
        let store = seeder.store();

        for product in store.products() {
            let category = product.category_id.unwrap();
            assert!((1..=6).contains(&category));
            assert!(product.price >= rust_decimal::Decimal::new(500, 2));
            assert!(product.price <= rust_decimal::Decimal::new(50_000, 2));
        }
        for order in store.orders() {
            let gap = order.delivery_date - order.order_date;
            assert!(gap >= Duration::days(1) && gap <= Duration::days(10));
        }
    }

    #[tokio::test]
    async fn test_zero_users_skips_table_without_error() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut seeder = seeder();
        let counts = RowCounts {
            users: 0,
            products: 10,
            orders: 0,
            order_details: 0,
            categories: 3,
        };

        let report = seeder.run(&counts, &mut rng).await.unwrap();
        assert_eq!(report.inserted.users, 0);
        assert!(seeder.store().users().is_empty());
        assert_eq!(seeder.store().products().len(), 10);
        assert_eq!(seeder.store().categories().len(), 3);
    }

    #[tokio::test]
    async fn test_orders_without_users_fail() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seeder = seeder();
        let counts = RowCounts {
            users: 0,
            ..RowCounts::uniform(5)
        };

        let err = seeder.run(&counts, &mut rng).await.unwrap_err();
        assert!(matches!(
            err,
            SeedError::MissingReferences {
                table: Table::Orders,
                parent: Table::Users,
            }
        ));
        // Users and products ran before the failure, nothing after it.
        assert_eq!(seeder.store().products().len(), 5);
        assert!(seeder.store().orders().is_empty());
        assert!(seeder.store().categories().is_empty());
    }

    #[tokio::test]
    async fn test_missing_product_price_surfaces_error() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut seeder = seeder();
        seeder.generate_users(3, &mut rng).await.unwrap();
        seeder.generate_products(3, &mut rng).await.unwrap();
        seeder.generate_orders(3, &mut rng).await.unwrap();

        // Products vanish from the store while the seeder still references them.
        seeder.store_mut().clear_all().await.unwrap();

        let err = seeder.generate_order_details(1, &mut rng).await.unwrap_err();
        match err {
            SeedError::ProductNotFound(id) => assert!(seeder.product_ids().contains(&id)),
            other => panic!("expected ProductNotFound, got {other:?}"),
        }
        assert!(seeder.store().order_details().is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_forgets_references() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seeder = seeder();
        seeder.run(&RowCounts::uniform(3), &mut rng).await.unwrap();

        seeder.clear_all().await.unwrap();
        assert!(seeder.user_ids().is_empty());
        assert!(seeder.category_ids().is_empty());
        assert_eq!(seeder.store().row_counts(), RowCounts::uniform(0));

        let err = seeder.generate_orders(1, &mut rng).await.unwrap_err();
        assert!(matches!(err, SeedError::MissingReferences { .. }));
    }

    #[tokio::test]
    async fn test_category_count_bounds_single_table_products() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut step_by_step = seeder().with_category_count(2);
        step_by_step.generate_products(200, &mut rng).await.unwrap();
        assert!(
            step_by_step
                .store()
                .products()
                .iter()
                .all(|p| matches!(p.category_id, Some(1..=2)))
        );

        // A full run follows the configured category count.
        let mut full_run = seeder().with_category_count(2);
        let counts = RowCounts {
            categories: 0,
            ..RowCounts::uniform(20)
        };
        full_run.run(&counts, &mut rng).await.unwrap();
        assert!(full_run.store().products().iter().all(|p| p.category_id.is_none()));
    }

    #[tokio::test]
    async fn test_same_seed_same_rows() {
        let counts = RowCounts::uniform(10);

        let mut first = seeder();
        first
            .run(&counts, &mut StdRng::seed_from_u64(42))
            .await
            .unwrap();
        let mut second = seeder();
        second
            .run(&counts, &mut StdRng::seed_from_u64(42))
            .await
            .unwrap();

        assert_eq!(first.user_ids(), second.user_ids());
        assert_eq!(first.product_ids(), second.product_ids());
        assert_eq!(first.order_ids(), second.order_ids());
        assert_eq!(first.category_ids(), second.category_ids());

        let users = |s: &Seeder<MemoryStore>| -> Vec<_> {
            s.store()
                .users()
                .iter()
                .map(|u| (u.id, u.email.clone(), u.registration_date))
                .collect()
        };
        assert_eq!(users(&first), users(&second));

        let products = |s: &Seeder<MemoryStore>| -> Vec<_> {
            s.store()
                .products()
                .iter()
                .map(|p| (p.id, p.price, p.category_id, p.creation_date))
                .collect()
        };
        assert_eq!(products(&first), products(&second));

        let orders = |s: &Seeder<MemoryStore>| -> Vec<_> {
            s.store()
                .orders()
                .iter()
                .map(|o| (o.id, o.user_id, o.order_date, o.delivery_date))
                .collect()
        };
        assert_eq!(orders(&first), orders(&second));

        let details = |s: &Seeder<MemoryStore>| -> Vec<_> {
            s.store()
                .order_details()
                .iter()
                .map(|d| (d.order_id, d.product_id, d.quantity, d.total_price))
                .collect()
        };
        assert_eq!(details(&first), details(&second));

        let categories = |s: &Seeder<MemoryStore>| s.store().categories().to_vec();
        assert_eq!(categories(&first), categories(&second));
    }

    #[tokio::test]
    async fn test_different_seeds_different_keys() {
        let counts = RowCounts::uniform(5);

        let mut first = seeder();
        first.run(&counts, &mut StdRng::seed_from_u64(1)).await.unwrap();
        let mut second = seeder();
        second.run(&counts, &mut StdRng::seed_from_u64(2)).await.unwrap();

        assert_ne!(first.user_ids(), second.user_ids());
    }

    #[tokio::test]
    async fn test_for_config_pins_reference_time() {
        let now = datetime!(2024-03-01 00:00:00 UTC);
        let config = SeedConfig {
            reference_time: Some(now),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut seeder = Seeder::for_config(MemoryStore::default(), &config);
        seeder.run(&RowCounts::uniform(50), &mut rng).await.unwrap();
        let store = seeder.store();

        assert!(store.users().iter().all(|u| u.registration_date <= now));
        assert!(store.products().iter().all(|p| p.creation_date <= now));
        assert!(
            store
                .orders()
                .iter()
                .all(|o| o.order_date >= datetime!(2024-01-01 00:00:00 UTC) && o.order_date <= now)
        );
    }
}
