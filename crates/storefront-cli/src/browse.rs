//! The `browse` command: the catalog listing page rendered to a terminal.
//!
//! One GET against the normalizer endpoint feeds [`PageState`]; the command
//! line filters and sort are replayed as page actions before rendering.

use std::fmt::Write as _;
use std::process::ExitCode;

use clap::Args;
use serde::Deserialize;
use storefront_core::{AppConfig, LoadStatus, PageAction, PageState, PriceBand, Product, SortKey};

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Normalizer endpoint (defaults to `STOREFRONT_ENDPOINT`)
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Page query string, e.g. `category=Apparel`
    #[arg(long)]
    pub query: Option<String>,
    /// Category to include (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Price band to include: under-50, 50-100, 100-150, over-150 (repeatable)
    #[arg(long = "price-band")]
    pub price_bands: Vec<PriceBand>,
    /// Size to include (repeatable)
    #[arg(long = "size")]
    pub sizes: Vec<String>,
    /// Sort order: price-low, price-high, newest
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Builds the page state the listing starts from, before any data arrives.
pub(crate) fn initial_state(args: &BrowseArgs) -> PageState {
    let mut state = PageState::from_query(args.query.as_deref().unwrap_or_default());
    state.apply(PageAction::SetSort(SortKey::parse(&args.sort)));

    for category in &args.categories {
        if !state.filters().categories.contains(category) {
            state.apply(PageAction::ToggleCategory(category.clone()));
        }
    }
    for band in &args.price_bands {
        if !state.filters().price_bands.contains(band) {
            state.apply(PageAction::TogglePriceBand(*band));
        }
    }
    for size in &args.sizes {
        if !state.filters().sizes.contains(size) {
            state.apply(PageAction::ToggleSize(size.clone()));
        }
    }
    state
}

/// Fetches the product list. The error string is what the page shows.
pub(crate) async fn fetch_products(
    client: &reqwest::Client,
    endpoint: &str,
) -> Result<Vec<Product>, String> {
    let response = client
        .get(endpoint)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read response: {e}"))?;

    if !status.is_success() {
        return Err(serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| format!("HTTP {status}"), |b| b.error));
    }

    serde_json::from_str::<Vec<Product>>(&body).map_err(|e| format!("unexpected response: {e}"))
}

pub(crate) fn render_listing(state: &PageState) -> String {
    let mut out = String::new();
    let visible = state.visible();
    let active = state.total_active_filters();

    writeln!(
        out,
        "{} of {} products (sort: {}, {} active filter{})",
        visible.len(),
        state.products().len(),
        state.sort(),
        active,
        if active == 1 { "" } else { "s" }
    )
    .ok();

    if visible.is_empty() {
        writeln!(out, "No products match the selected filters.").ok();
        return out;
    }

    for product in visible {
        let mut badges = Vec::new();
        if product.is_new {
            badges.push("new");
        }
        if product.is_limited {
            badges.push("limited");
        }
        if !product.in_stock {
            badges.push("sold out");
        }
        writeln!(
            out,
            "{:>10}  {:<32} {:>9.2}  {:<12} {}{}",
            product.id,
            product.name,
            product.price,
            product.category,
            product.sizes.join("/"),
            if badges.is_empty() {
                String::new()
            } else {
                format!("  [{}]", badges.join(", "))
            }
        )
        .ok();
    }
    out
}

pub(crate) fn render_failure(message: &str) -> String {
    format!("Could not load products: {message}\nTry again: rerun `storefront browse`.\n")
}

/// Runs the command. Prints the listing on success; on failure prints the
/// error with a retry hint and exits non-zero. No automatic retry.
pub async fn run_browse(config: &AppConfig, args: &BrowseArgs) -> anyhow::Result<ExitCode> {
    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.storefront_endpoint.clone());
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;

    let mut state = initial_state(args);
    tracing::debug!(%endpoint, "fetching products");
    match fetch_products(&client, &endpoint).await {
        Ok(products) => state.apply(PageAction::Loaded(products)),
        Err(message) => {
            tracing::warn!(%endpoint, error = %message, "product load failed");
            state.apply(PageAction::LoadFailed(message));
        }
    }

    match state.status() {
        LoadStatus::Failed(message) => {
            eprint!("{}", render_failure(message));
            Ok(ExitCode::FAILURE)
        }
        LoadStatus::Ready | LoadStatus::Loading => {
            print!("{}", render_listing(&state));
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
#[path = "browse_test.rs"]
mod tests;
