//! Database operations for `products` and the `collection_products` listing.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::{Color, Product};
use uuid::Uuid;

use crate::categories::upsert_category;
use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table joined with its category name.
///
/// `category` is `NULL` when the product has no category or the category
/// was deleted (`ON DELETE SET NULL`).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Json<Vec<Color>>,
    pub in_stock: bool,
    pub is_new: bool,
    pub is_limited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Converts the row into the storefront's product shape.
    ///
    /// The product id is the vendor id when one is recorded, otherwise the
    /// row's UUID. A missing category becomes an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidData`] if the stored price does not fit an
    /// `f64`.
    pub fn into_product(self) -> Result<Product, DbError> {
        let price = self.price.to_f64().ok_or_else(|| {
            DbError::InvalidData(format!("price {} of product {}", self.price, self.id))
        })?;
        let image_url = self
            .image_url
            .or_else(|| self.image_urls.first().cloned())
            .unwrap_or_default();

        Ok(Product {
            id: self.external_id.unwrap_or_else(|| self.id.to_string()),
            name: self.name,
            price,
            description: self.description,
            image_url,
            image_urls: self.image_urls,
            category: self.category.unwrap_or_default(),
            tags: self.tags,
            sizes: self.sizes,
            colors: self.colors.0,
            in_stock: self.in_stock,
            is_new: self.is_new,
            is_limited: self.is_limited,
        })
    }
}

/// Optional filters for [`list_products`].
#[derive(Debug, Clone, Default)]
pub struct ProductListFilters {
    /// Category slug or name; matched case-insensitively.
    pub category: Option<String>,
    pub in_stock_only: bool,
    pub limit: Option<i64>,
}

const PRODUCT_COLUMNS: &str = "\
    p.id, p.external_id, p.name, p.description, p.price, p.image_url, \
    p.image_urls, c.name AS category, p.tags, p.sizes, p.colors, \
    p.in_stock, p.is_new, p.is_limited, p.created_at, p.updated_at";

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Lists products, newest first, optionally narrowed by category.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(
    pool: &PgPool,
    filters: &ProductListFilters,
) -> Result<Vec<ProductRow>, DbError> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} \
         FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id \
         WHERE ($1::text IS NULL OR LOWER(c.slug) = LOWER($1) OR LOWER(c.name) = LOWER($1)) \
           AND (NOT $2 OR p.in_stock) \
         ORDER BY p.created_at DESC, p.id \
         LIMIT $3"
    );

    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(filters.category.as_deref())
        .bind(filters.in_stock_only)
        .bind(filters.limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Lists the products of the collection with `slug`, in curated position
/// order.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no collection has that slug, or
/// [`DbError::Sqlx`] if a query fails.
pub async fn list_collection_products(
    pool: &PgPool,
    slug: &str,
) -> Result<Vec<ProductRow>, DbError> {
    let collection = crate::collections::get_collection_by_slug(pool, slug)
        .await?
        .ok_or(DbError::NotFound)?;

    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} \
         FROM collection_products cp \
         JOIN products p ON p.id = cp.product_id \
         LEFT JOIN categories c ON c.id = p.category_id \
         WHERE cp.collection_id = $1 \
         ORDER BY cp.position, p.name"
    );

    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(collection.id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Upserts a vendor product keyed on `external_id` inside `tx`.
///
/// New rows take every field from `product`, creating its category by name
/// when needed. On conflict only vendor-derived columns (`name`, `price`,
/// `image_url`, `image_urls`, `sizes`, `colors`) are refreshed; curated
/// fields such as category, tags and the stock flags are left as edited.
///
/// Run it inside [`crate::begin_with_claims`] so row-level security sees an
/// admin principal.
///
/// Returns the row's UUID.
///
/// # Errors
///
/// Returns [`DbError::InvalidData`] if the price is not representable as
/// `NUMERIC(10,2)`, or [`DbError::Sqlx`] if a statement fails.
pub async fn upsert_catalog_product(
    tx: &mut Transaction<'_, Postgres>,
    product: &Product,
) -> Result<Uuid, DbError> {
    let price = Decimal::from_f64_retain(product.price)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| {
            DbError::InvalidData(format!("price {} of product {}", product.price, product.id))
        })?;

    let category_id = if product.category.trim().is_empty() {
        None
    } else {
        Some(upsert_category(&mut **tx, &product.category).await?)
    };

    let id: Uuid = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO products \
             (external_id, name, description, price, image_url, image_urls, category_id, \
              tags, sizes, colors, in_stock, is_new, is_limited) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, \
                 $8, $9, $10, $11, $12, $13) \
         ON CONFLICT (external_id) DO UPDATE SET \
             name       = EXCLUDED.name, \
             price      = EXCLUDED.price, \
             image_url  = EXCLUDED.image_url, \
             image_urls = EXCLUDED.image_urls, \
             sizes      = EXCLUDED.sizes, \
             colors     = EXCLUDED.colors \
         RETURNING id",
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(price)
    .bind(&product.image_url)
    .bind(&product.image_urls)
    .bind(category_id)
    .bind(&product.tags)
    .bind(&product.sizes)
    .bind(Json(&product.colors))
    .bind(product.in_stock)
    .bind(product.is_new)
    .bind(product.is_limited)
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}
