//! PostgreSQL store and the transactional seeding entry points.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, postgres::PgPoolOptions};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::store::CLEAR_ORDER;
use super::{SeedError, SeedReport, SeedStore, Seeder};
use crate::config::SeedConfig;
use crate::generators::{
    GeneratedCategory, GeneratedOrder, GeneratedProduct, GeneratedUser, PricedOrderDetail,
};

/// Executes seeding statements on a borrowed connection, normally the
/// connection of an open transaction.
pub struct PgStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> SeedStore for PgStore<'c> {
    async fn insert_user(&mut self, user: &GeneratedUser) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO Users (user_id, first_name, last_name, email, phone, registration_date, loyalty_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.registration_date)
        .bind(user.loyalty_status.as_str())
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn insert_product(&mut self, product: &GeneratedProduct) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO Products (product_id, name, description, category_id, price, stock_quantity, creation_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(product.creation_date)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn insert_order(&mut self, order: &GeneratedOrder) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO Orders (order_id, user_id, order_date, total_amount, status, delivery_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id)
        .bind(order.user_id)
        .bind(order.order_date)
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .bind(order.delivery_date)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn product_price(&mut self, product_id: Uuid) -> Result<Option<Decimal>, SeedError> {
        let price = sqlx::query_scalar::<_, Decimal>(
            "SELECT price FROM Products WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(price)
    }

    async fn insert_order_detail(&mut self, detail: &PricedOrderDetail) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO OrderDetails (order_id, product_id, quantity, price_per_unit, total_price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(detail.order_id)
        .bind(detail.product_id)
        .bind(detail.quantity)
        .bind(detail.price_per_unit)
        .bind(detail.total_price)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn insert_category(&mut self, category: &GeneratedCategory) -> Result<i32, SeedError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO ProductCategories (name, parent_category_id)
            VALUES ($1, $2)
            RETURNING category_id
            "#,
        )
        .bind(&category.name)
        .bind(category.parent_category_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    async fn clear_all(&mut self) -> Result<(), SeedError> {
        for table in CLEAR_ORDER {
            let statement = format!("DELETE FROM {table}");
            sqlx::query(&statement).execute(&mut *self.conn).await?;
        }

        Ok(())
    }
}

/// Connects, seeds everything in one transaction and closes the connection.
///
/// The pool holds a single connection and is closed on success and failure.
pub async fn seed_database(
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<SeedReport, SeedError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(config.connection.connect_options())
        .await?;

    info!("Connected to database");

    let result = seed_pool(&pool, config, rng).await;
    pool.close().await;
    result
}

/// Seeds through `pool` inside a single transaction.
///
/// Commits only when every table succeeded; otherwise rolls back so no row
/// of the run remains.
pub async fn seed_pool(
    pool: &PgPool,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<SeedReport, SeedError> {
    let mut tx = pool.begin().await?;

    let outcome = run_seeder(&mut *tx, config, rng).await;

    match outcome {
        Ok(report) => {
            tx.commit().await?;
            info!("Committed {} rows", report.inserted.total());
            Ok(report)
        }
        Err(e) => {
            warn!("Seeding failed, rolling back: {e}");
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback failed: {rollback_err}");
            }
            Err(e)
        }
    }
}

async fn run_seeder(
    conn: &mut PgConnection,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<SeedReport, SeedError> {
    let mut seeder = Seeder::for_config(PgStore::new(conn), config);
    if config.clear_existing {
        seeder.clear_all().await?;
    }
    seeder.run(&config.counts, rng).await
}
