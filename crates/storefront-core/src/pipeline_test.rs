use super::*;
use crate::products::Color;

fn make_product(id: &str, category: &str, price: f64, sizes: &[&str], is_new: bool) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        price,
        description: String::new(),
        image_url: format!("https://files.example.com/{id}.png"),
        image_urls: vec![format!("https://files.example.com/{id}.png")],
        category: category.to_string(),
        tags: vec![],
        sizes: sizes.iter().map(|s| (*s).to_string()).collect(),
        colors: vec![Color::from_name("Black")],
        in_stock: true,
        is_new,
        is_limited: false,
    }
}

fn ids(listing: &[Product]) -> Vec<&str> {
    listing.iter().map(|p| p.id.as_str()).collect()
}

fn bands_matching(price: f64) -> Vec<PriceBand> {
    PriceBand::ALL
        .into_iter()
        .filter(|band| band.contains(price))
        .collect()
}

// -----------------------------------------------------------------------
// PriceBand
// -----------------------------------------------------------------------

#[test]
fn price_band_boundaries_are_claimed_once() {
    assert_eq!(bands_matching(49.99), vec![PriceBand::Under50]);
    assert_eq!(bands_matching(50.0), vec![PriceBand::From50To100]);
    assert_eq!(bands_matching(100.0), vec![PriceBand::From50To100]);
    assert_eq!(bands_matching(100.01), vec![PriceBand::From100To150]);
    assert_eq!(bands_matching(150.0), vec![PriceBand::From100To150]);
    assert_eq!(bands_matching(150.01), vec![PriceBand::Over150]);
}

#[test]
fn price_band_parses_page_identifiers() {
    assert_eq!("under-50".parse::<PriceBand>(), Ok(PriceBand::Under50));
    assert_eq!("50-100".parse::<PriceBand>(), Ok(PriceBand::From50To100));
    assert_eq!("100-150".parse::<PriceBand>(), Ok(PriceBand::From100To150));
    assert_eq!("over-150".parse::<PriceBand>(), Ok(PriceBand::Over150));
    assert!("cheap".parse::<PriceBand>().is_err());
}

#[test]
fn price_band_serializes_as_page_identifier() {
    let json = serde_json::to_string(&PriceBand::From100To150).expect("serialize");
    assert_eq!(json, "\"100-150\"");
}

// -----------------------------------------------------------------------
// SortKey
// -----------------------------------------------------------------------

#[test]
fn sort_key_parse_unknown_is_original() {
    assert_eq!(SortKey::parse("price-low"), SortKey::PriceLow);
    assert_eq!(SortKey::parse("price-high"), SortKey::PriceHigh);
    assert_eq!(SortKey::parse("newest"), SortKey::Newest);
    assert_eq!(SortKey::parse("bestselling"), SortKey::Original);
}

#[test]
fn sort_key_deserializes_unknown_as_original() {
    let key: SortKey = serde_json::from_str("\"popularity\"").expect("deserialize");
    assert_eq!(key, SortKey::Original);
}

#[test]
fn sort_key_defaults_to_newest() {
    assert_eq!(SortKey::default(), SortKey::Newest);
}

// -----------------------------------------------------------------------
// derive_listing
// -----------------------------------------------------------------------

#[test]
fn empty_selection_with_original_order_returns_input_unchanged() {
    let products = vec![
        make_product("a", "Apparel", 80.0, &["M"], false),
        make_product("b", "Accessories", 20.0, &["One Size"], true),
        make_product("c", "Apparel", 120.0, &["L"], false),
    ];
    let listing = derive_listing(&products, &FilterSelection::default(), SortKey::Original);
    assert_eq!(listing, products);
}

#[test]
fn newest_places_new_items_first_regardless_of_price() {
    let products = vec![
        make_product("b", "Apparel", 20.0, &["M"], false),
        make_product("a", "Apparel", 80.0, &["M"], true),
    ];
    let listing = derive_listing(&products, &FilterSelection::default(), SortKey::Newest);
    assert_eq!(ids(&listing), vec!["a", "b"]);
}

#[test]
fn price_low_orders_ascending() {
    let products = vec![
        make_product("a", "Apparel", 80.0, &["M"], true),
        make_product("b", "Apparel", 20.0, &["M"], false),
    ];
    let listing = derive_listing(&products, &FilterSelection::default(), SortKey::PriceLow);
    assert_eq!(ids(&listing), vec!["b", "a"]);
}

#[test]
fn price_high_orders_descending_and_keeps_ties_stable() {
    let products = vec![
        make_product("a", "Apparel", 40.0, &["M"], false),
        make_product("b", "Apparel", 90.0, &["M"], false),
        make_product("c", "Apparel", 40.0, &["M"], false),
    ];
    let listing = derive_listing(&products, &FilterSelection::default(), SortKey::PriceHigh);
    assert_eq!(ids(&listing), vec!["b", "a", "c"]);
}

#[test]
fn newest_keeps_relative_order_within_partitions() {
    let products = vec![
        make_product("old-1", "Apparel", 10.0, &["M"], false),
        make_product("new-1", "Apparel", 30.0, &["M"], true),
        make_product("old-2", "Apparel", 20.0, &["M"], false),
        make_product("new-2", "Apparel", 5.0, &["M"], true),
    ];
    let listing = derive_listing(&products, &FilterSelection::default(), SortKey::Newest);
    assert_eq!(ids(&listing), vec!["new-1", "new-2", "old-1", "old-2"]);
}

#[test]
fn category_filter_is_or_within_dimension() {
    let products = vec![
        make_product("tee", "Apparel", 30.0, &["M"], false),
        make_product("mug", "Home", 15.0, &["One Size"], false),
        make_product("cap", "Accessories", 25.0, &["One Size"], false),
    ];
    let selection = FilterSelection {
        categories: ["Apparel", "Home"].iter().map(|s| (*s).to_string()).collect(),
        ..FilterSelection::default()
    };
    let listing = derive_listing(&products, &selection, SortKey::Original);
    assert_eq!(ids(&listing), vec!["tee", "mug"]);
}

#[test]
fn category_and_size_filters_combine_with_and() {
    let products = vec![
        make_product("tee-m", "Apparel", 30.0, &["S", "M"], false),
        make_product("tee-xl", "Apparel", 30.0, &["XL"], false),
        make_product("mug", "Home", 15.0, &["M"], false),
    ];
    let selection = FilterSelection {
        categories: std::iter::once("Apparel".to_string()).collect(),
        sizes: ["M", "L"].iter().map(|s| (*s).to_string()).collect(),
        ..FilterSelection::default()
    };
    let listing = derive_listing(&products, &selection, SortKey::Original);
    assert_eq!(ids(&listing), vec!["tee-m"]);
}

#[test]
fn price_band_filter_matches_any_chosen_band() {
    let products = vec![
        make_product("cheap", "Apparel", 25.0, &["M"], false),
        make_product("mid", "Apparel", 100.0, &["M"], false),
        make_product("upper", "Apparel", 150.0, &["M"], false),
        make_product("premium", "Apparel", 220.0, &["M"], false),
    ];
    let selection = FilterSelection {
        price_bands: [PriceBand::Under50, PriceBand::Over150].into_iter().collect(),
        ..FilterSelection::default()
    };
    let listing = derive_listing(&products, &selection, SortKey::Original);
    assert_eq!(ids(&listing), vec!["cheap", "premium"]);
}

#[test]
fn filtering_never_mutates_input() {
    let products = vec![
        make_product("a", "Apparel", 80.0, &["M"], false),
        make_product("b", "Apparel", 20.0, &["M"], true),
    ];
    let before = products.clone();
    let selection = FilterSelection {
        sizes: std::iter::once("M".to_string()).collect(),
        ..FilterSelection::default()
    };
    let _ = derive_listing(&products, &selection, SortKey::PriceLow);
    assert_eq!(products, before);
}

#[test]
fn selection_active_count_sums_dimensions() {
    let selection = FilterSelection {
        categories: std::iter::once("Apparel".to_string()).collect(),
        price_bands: [PriceBand::Under50, PriceBand::Over150].into_iter().collect(),
        sizes: std::iter::once("M".to_string()).collect(),
    };
    assert_eq!(selection.active_count(), 4);
    assert!(!selection.is_empty());
    assert!(FilterSelection::default().is_empty());
}
