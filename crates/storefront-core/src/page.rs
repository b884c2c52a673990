//! Listing page state as an explicit reducer.
//!
//! The page loads the product list once, then every shopper interaction is a
//! [`PageAction`] applied to [`PageState`]. Actions that touch the product
//! list, the filters or the sort key recompute the visible listing from
//! scratch via [`derive_listing`].

use std::collections::BTreeSet;


use crate::pipeline::{derive_listing, FilterSelection, PriceBand, SortKey};
use crate::products::Product;

/// Fetch state of the product list for this page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Terminal for this load; only [`PageAction::Reload`] leaves it.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    Loaded(Vec<Product>),
    LoadFailed(String),
    /// The shopper's "Try again": discard everything fetched and start over.
    Reload,
    ToggleCategory(String),
    TogglePriceBand(PriceBand),
    ToggleSize(String),
    ClearFilters,
    SetSort(SortKey),
    ToggleFilterPanel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    status: LoadStatus,
    products: Vec<Product>,
    filters: FilterSelection,
    sort: SortKey,
    filter_open: bool,
    visible: Vec<Product>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Loading,
            products: Vec::new(),
            filters: FilterSelection::default(),
            sort: SortKey::default(),
            filter_open: false,
            visible: Vec::new(),
        }
    }
}

impl PageState {
    /// Initial state for a page opened with `query` (the URL query string,
    /// with or without the leading `?`). A `category` parameter preselects
    /// that category.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        if let Some(category) = query_param(query, "category").filter(|c| !c.is_empty()) {
            state.filters.categories.insert(category);
        }
        state
    }

    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::Loaded(products) => {
                self.status = LoadStatus::Ready;
                self.products = products;
            }
            PageAction::LoadFailed(message) => {
                self.status = LoadStatus::Failed(message);
                self.products.clear();
            }
            PageAction::Reload => {
                self.status = LoadStatus::Loading;
                self.products.clear();
            }
            PageAction::ToggleCategory(category) => {
                toggle(&mut self.filters.categories, category);
            }
            PageAction::TogglePriceBand(band) => {
                toggle(&mut self.filters.price_bands, band);
            }
            PageAction::ToggleSize(size) => {
                toggle(&mut self.filters.sizes, size);
            }
            PageAction::ClearFilters => {
                self.filters = FilterSelection::default();
            }
            PageAction::SetSort(sort) => {
                self.sort = sort;
            }
            PageAction::ToggleFilterPanel => {
                self.filter_open = !self.filter_open;
                return;
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = derive_listing(&self.products, &self.filters, self.sort);
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn visible(&self) -> &[Product] {
        &self.visible
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn filter_open(&self) -> bool {
        self.filter_open
    }

    /// Badge count shown on the filter toggle.
    #[must_use]
    pub fn total_active_filters(&self) -> usize {
        self.filters.active_count()
    }

    /// Categories present in the loaded list, for building filter options.
    #[must_use]
    pub fn available_categories(&self) -> BTreeSet<&str> {
        self.products.iter().map(|p| p.category.as_str()).collect()
    }

    /// Sizes present in the loaded list, for building filter options.
    #[must_use]
    pub fn available_sizes(&self) -> BTreeSet<&str> {
        self.products
            .iter()
            .flat_map(|p| p.sizes.iter().map(String::as_str))
            .collect()
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Returns the decoded value of the first `name` parameter in a URL query.
fn query_param(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
