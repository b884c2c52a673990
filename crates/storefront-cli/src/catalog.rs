//! `catalog sync`: pull the Printful catalog into the products table.

use storefront_catalog::{CatalogError, PrintfulClient};
use storefront_core::AppConfig;
use storefront_db::JwtClaims;

/// Subject recorded in the JWT claims of sync transactions.
const SYNC_SUBJECT: &str = "storefront-cli";

/// Fetch, normalize and upsert the whole catalog in one transaction.
///
/// With `dry_run` the normalized products are listed and nothing is written;
/// `pool` may then be `None`.
///
/// # Errors
///
/// Returns an error if `PRINTFUL_API_KEY` is unset, the fetch or
/// normalization fails, or any upsert fails (the transaction is rolled back).
pub(crate) async fn run_catalog_sync(
    config: &AppConfig,
    pool: Option<&sqlx::PgPool>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let api_key = config
        .printful_api_key
        .as_deref()
        .ok_or(CatalogError::MissingCredential {
            var: "PRINTFUL_API_KEY",
        })?;

    let client = PrintfulClient::with_base_url(
        &config.printful_base_url,
        config.printful_request_timeout_secs,
        &config.user_agent,
    )?;
    let products = client.fetch_catalog(api_key).await?;

    if dry_run {
        println!("dry-run: would sync {} products", products.len());
        for product in &products {
            println!("  {} {} ({:.2})", product.id, product.name, product.price);
        }
        return Ok(());
    }

    let pool = pool.ok_or(storefront_db::DbError::MissingDatabaseUrl)?;
    let mut tx = storefront_db::begin_with_claims(pool, &JwtClaims::admin(SYNC_SUBJECT)).await?;
    for product in &products {
        storefront_db::upsert_catalog_product(&mut tx, product)
            .await
            .map_err(|e| anyhow::anyhow!("failed to upsert product {}: {e}", product.id))?;
    }
    tx.commit().await?;

    tracing::info!(count = products.len(), "catalog sync complete");
    println!("synced {} products", products.len());
    Ok(())
}
