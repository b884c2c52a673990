use serde::{Deserialize, Serialize};

/// A product in the storefront's own schema, as served by the catalog
/// normalizer and consumed by the listing page.
///
/// Serialized in camelCase (`imageUrl`, `inStock`, ...) to match the JSON
/// contract the page reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Primary image, the first preview of the first variant.
    pub image_url: String,
    /// One preview per variant, in variant order. Duplicates are kept.
    pub image_urls: Vec<String>,
    pub category: String,
    pub tags: Vec<String>,
    /// Distinct sizes in first-seen order.
    pub sizes: Vec<String>,
    /// Distinct colors in first-seen order.
    pub colors: Vec<Color>,
    pub in_stock: bool,
    pub is_new: bool,
    pub is_limited: bool,
}

impl Product {
    /// Returns `true` if any of this product's sizes appears in `sizes`.
    #[must_use]
    pub fn has_any_size<'a, I>(&self, sizes: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        sizes.into_iter().any(|wanted| self.sizes.contains(wanted))
    }
}

/// A color swatch: display name plus its lowercased form used for matching
/// and CSS class names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    pub value: String,
}

impl Color {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: name.to_lowercase(),
        }
    }
}
