//! Database operations for `collections`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `collections` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CollectionRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lists collections, featured first, then by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_collections(pool: &PgPool) -> Result<Vec<CollectionRow>, DbError> {
    let rows = sqlx::query_as::<_, CollectionRow>(
        "SELECT id, name, slug, description, image_url, is_featured, created_at, updated_at \
         FROM collections \
         ORDER BY is_featured DESC, name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches a single collection by its slug. Returns `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_collection_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<CollectionRow>, DbError> {
    let row = sqlx::query_as::<_, CollectionRow>(
        "SELECT id, name, slug, description, image_url, is_featured, created_at, updated_at \
         FROM collections \
         WHERE slug = $1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
