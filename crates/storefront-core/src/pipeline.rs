//! Filter and sort derivation for the product listing.
//!
//! [`derive_listing`] is a pure function of the full product list, the
//! shopper's [`FilterSelection`] and the active [`SortKey`]. Callers rerun it
//! whenever any of the three inputs changes and replace their displayed list
//! with the result.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// One of the four fixed price ranges offered as filters.
///
/// The 100 and 150 boundaries each belong to exactly one band, so no price
/// matches two bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    #[serde(rename = "under-50")]
    Under50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-150")]
    From100To150,
    #[serde(rename = "over-150")]
    Over150,
}

impl PriceBand {
    pub const ALL: [PriceBand; 4] = [
        PriceBand::Under50,
        PriceBand::From50To100,
        PriceBand::From100To150,
        PriceBand::Over150,
    ];

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceBand::Under50 => price < 50.0,
            PriceBand::From50To100 => (50.0..=100.0).contains(&price),
            PriceBand::From100To150 => price > 100.0 && price <= 150.0,
            PriceBand::Over150 => price > 150.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriceBand::Under50 => "under-50",
            PriceBand::From50To100 => "50-100",
            PriceBand::From100To150 => "100-150",
            PriceBand::Over150 => "over-150",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceBand::ALL
            .into_iter()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| {
                format!("unknown price band \"{s}\" (expected under-50, 50-100, 100-150, or over-150)")
            })
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
    /// `is_new` products first; no ordering among ties beyond stability.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Keeps the filtered order. Any unrecognized key maps here.
    #[serde(other, rename = "original")]
    Original,
}

impl SortKey {
    /// Parses a sort key as sent by the page. Unknown values leave the list
    /// in its filtered order rather than failing.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "newest" => SortKey::Newest,
            _ => SortKey::Original,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Original => "original",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chosen filters. An empty set places no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub categories: BTreeSet<String>,
    pub price_bands: BTreeSet<PriceBand>,
    pub sizes: BTreeSet<String>,
}

impl FilterSelection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.price_bands.is_empty() && self.sizes.is_empty()
    }

    /// Number of chosen entries across all three dimensions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.categories.len() + self.price_bands.len() + self.sizes.len()
    }

    /// AND across dimensions, OR within each.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_price(product) && self.matches_size(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_price(&self, product: &Product) -> bool {
        self.price_bands.is_empty()
            || self
                .price_bands
                .iter()
                .any(|band| band.contains(product.price))
    }

    fn matches_size(&self, product: &Product) -> bool {
        self.sizes.is_empty() || product.has_any_size(&self.sizes)
    }
}

/// Derives the displayed listing: filter, then sort.
///
/// Returns an ordered subsequence of `products`; the input is never mutated.
/// All sorts are stable.
#[must_use]
pub fn derive_listing(
    products: &[Product],
    selection: &FilterSelection,
    sort: SortKey,
) -> Vec<Product> {
    let mut listing: Vec<Product> = products
        .iter()
        .filter(|product| selection.matches(product))
        .cloned()
        .collect();

    match sort {
        SortKey::PriceLow => listing.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => listing.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Newest => listing.sort_by_key(|product| !product.is_new),
        SortKey::Original => {}
    }

    listing
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
