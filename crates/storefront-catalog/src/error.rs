use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{var} is not configured")]
    MissingCredential { var: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Printful API error: {reason}")]
    UpstreamStatus { status: u16, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("normalization error for product {product_id}: {reason}")]
    Normalization { product_id: String, reason: String },

    #[error("invalid Printful base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
