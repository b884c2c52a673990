//! Normalization from raw Printful types to [`storefront_core::Product`].
//!
//! Mapping is all-or-nothing: one bad product fails the whole catalog, so
//! the storefront never shows a partial list.

use storefront_core::{Color, Product};

use crate::error::CatalogError;
use crate::types::{PrintfulProduct, PrintfulVariant};

/// Size reported for variants that carry no `size` option.
pub const ONE_SIZE: &str = "One Size";

// Printful's store listing carries no merchandising metadata, so these
// fields are fixed until products are enriched from the database.
const DEFAULT_CATEGORY: &str = "Apparel";
const DEFAULT_IN_STOCK: bool = true;
const DEFAULT_IS_NEW: bool = false;
const DEFAULT_IS_LIMITED: bool = false;

/// Normalizes every product of a Printful catalog, preserving order.
///
/// # Errors
///
/// Returns the first [`CatalogError::Normalization`] encountered.
pub fn normalize_catalog(products: Vec<PrintfulProduct>) -> Result<Vec<Product>, CatalogError> {
    products.into_iter().map(normalize_product).collect()
}

/// Normalizes a raw [`PrintfulProduct`] into a storefront [`Product`].
///
/// # Errors
///
/// Returns [`CatalogError::Normalization`] if the product has no variants,
/// or its first variant lacks a numeric retail price or a preview file.
/// Later variants without a preview are left out of `image_urls`.
pub fn normalize_product(product: PrintfulProduct) -> Result<Product, CatalogError> {
    let product_id = product.id.to_string();
    let fail = |reason: String| CatalogError::Normalization {
        product_id: product_id.clone(),
        reason,
    };

    let Some(first) = product.variants.first() else {
        return Err(fail("product has no variants".into()));
    };
    let price = match first.retail_price.as_deref() {
        Some(raw) => parse_retail_price(raw)
            .ok_or_else(|| fail(format!("invalid retail price \"{raw}\"")))?,
        None => return Err(fail("first variant has no retail price".into())),
    };
    let image_url =
        first_preview_url(first).ok_or_else(|| fail("first variant has no preview file".into()))?;

    let image_urls: Vec<String> = product
        .variants
        .iter()
        .enumerate()
        .filter_map(|(idx, variant)| {
            let url = first_preview_url(variant);
            if url.is_none() {
                tracing::debug!(product_id = %product_id, variant = idx, "variant has no preview file; image skipped");
            }
            url
        })
        .collect();

    let mut sizes: Vec<String> = Vec::new();
    let mut colors: Vec<Color> = Vec::new();
    for variant in &product.variants {
        let size = option_value(variant, "size").unwrap_or_else(|| ONE_SIZE.to_string());
        if !sizes.contains(&size) {
            sizes.push(size);
        }

        if let Some(name) = option_value(variant, "color") {
            if !colors.iter().any(|c| c.name == name) {
                colors.push(Color::from_name(&name));
            }
        }
    }

    Ok(Product {
        id: product_id,
        name: product.name,
        price,
        description: String::new(),
        image_url,
        image_urls,
        category: DEFAULT_CATEGORY.to_string(),
        tags: Vec::new(),
        sizes,
        colors,
        in_stock: DEFAULT_IN_STOCK,
        is_new: DEFAULT_IS_NEW,
        is_limited: DEFAULT_IS_LIMITED,
    })
}

/// Parses a decimal price string such as `"29.50"`.
///
/// Non-finite values (`"NaN"`, `"inf"`) are rejected since they would
/// escape every price band.
fn parse_retail_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

fn first_preview_url(variant: &PrintfulVariant) -> Option<String> {
    variant
        .files
        .first()
        .and_then(|file| file.preview_url.as_deref())
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
}

/// Returns the text value of the option whose key equals `key`, ignoring case.
fn option_value(variant: &PrintfulVariant, key: &str) -> Option<String> {
    variant
        .options
        .iter()
        .find(|opt| opt.id.eq_ignore_ascii_case(key))
        .and_then(crate::types::PrintfulOption::text)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
