pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::PrintfulClient;
pub use error::CatalogError;
pub use normalize::{normalize_catalog, normalize_product};
pub use types::{PrintfulProduct, PrintfulProductsResponse, PrintfulVariant};
