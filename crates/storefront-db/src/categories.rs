//! Database operations for `categories`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::DbError;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lists all categories ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, name, slug, description, image_url, created_at, updated_at \
         FROM categories \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the id of the category named `name`, creating it when absent.
///
/// Categories are keyed by slug, so `"Wall Art"` and `"wall art"` resolve
/// to the same row. An existing row keeps its display name.
///
/// # Errors
///
/// Returns [`DbError::InvalidData`] if `name` produces an empty slug, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_category<'e, E>(executor: E, name: &str) -> Result<Uuid, DbError>
where
    E: PgExecutor<'e>,
{
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(DbError::InvalidData(format!(
            "category name {name:?} has no slug"
        )));
    }

    // DO UPDATE (rather than DO NOTHING) so RETURNING yields the existing id.
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO categories (name, slug) \
         VALUES ($1, $2) \
         ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug \
         RETURNING id",
    )
    .bind(name.trim())
    .bind(&slug)
    .fetch_one(executor)
    .await?;

    Ok(id)
}

/// Lowercase ASCII alphanumerics joined by single hyphens.
pub(crate) fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Apparel"), "apparel");
        assert_eq!(slugify("  Wall Art & Prints "), "wall-art-prints");
    }

    #[test]
    fn slugify_empty_for_symbols_only() {
        assert_eq!(slugify("&&"), "");
    }
}
