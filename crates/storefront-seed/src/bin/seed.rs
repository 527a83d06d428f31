//! Seeds the storefront database from environment configuration.
//!
//! Run with:
//! ```
//! POSTGRES_DB=shop POSTGRES_USER=shop DB_HOST=localhost cargo run -p storefront-seed --bin seed
//! ```

use anyhow::Context;
use rand::{SeedableRng, rngs::StdRng};
use storefront_seed::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over the file.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env().context("Invalid seeding configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if config.rng_seed.is_some() && config.reference_time.is_none() {
        tracing::warn!("SEED_RNG_SEED is set without SEED_REFERENCE_TIME; timestamps follow the clock");
    }

    let report = if config.dry_run {
        let (report, _) = seed_memory(&config, &mut rng).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        report
    } else {
        seed_database(&config, &mut rng)
            .await
            .context("Seeding failed, nothing was committed")?
    };

    // Summary output
    tracing::info!("Seed completed in {} ms", report.elapsed_ms);
    tracing::info!("  Users: {}", report.inserted.users);
    tracing::info!("  Products: {}", report.inserted.products);
    tracing::info!("  Orders: {}", report.inserted.orders);
    tracing::info!("  Order details: {}", report.inserted.order_details);
    tracing::info!("  Product categories: {}", report.inserted.categories);

    Ok(())
}
