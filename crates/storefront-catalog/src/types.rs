//! Printful API response types for `GET /store/products`.
//!
//! ### Envelope
//! Every Printful response is wrapped as `{"code": 200, "result": ...}`. The
//! `code` mirrors the HTTP status and is informational only; the HTTP status
//! is what decides success.
//!
//! ### Identifiers
//! Product ids are numeric in current responses but have been strings on
//! some store types. [`PrintfulId`] accepts both and renders as a string.
//!
//! ### Variants
//! Depending on the endpoint revision the variant list is named `variants`
//! or `sync_variants`; both are accepted. Missing lists deserialize as empty
//! and are rejected during normalization.
//!
//! ### Options
//! Each option is `{"id": "size", "value": "M"}`. Values are usually strings
//! but may be numbers or arrays (e.g. embroidery thread colors), so they are
//! kept as raw JSON and interpreted in `normalize.rs`.

use std::fmt;

use serde::Deserialize;

/// Top-level response from `GET /store/products`.
#[derive(Debug, Deserialize)]
pub struct PrintfulProductsResponse {
    #[serde(default)]
    pub code: Option<u16>,
    pub result: Vec<PrintfulProduct>,
}

/// A product or sync product id, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PrintfulId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PrintfulId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintfulId::Number(n) => write!(f, "{n}"),
            PrintfulId::Text(s) => f.write_str(s),
        }
    }
}

/// A single store product.
#[derive(Debug, Deserialize)]
pub struct PrintfulProduct {
    pub id: PrintfulId,

    /// Display name, e.g. `"Unisex Logo Tee"`.
    pub name: String,

    /// Purchasable variants, in the order Printful lists them.
    #[serde(default, alias = "sync_variants")]
    pub variants: Vec<PrintfulVariant>,
}

/// A single purchasable variant of a [`PrintfulProduct`].
#[derive(Debug, Deserialize)]
pub struct PrintfulVariant {
    #[serde(default)]
    pub id: Option<PrintfulId>,

    /// Retail price as a decimal string, e.g. `"29.50"`. Only the first
    /// variant's price is read.
    #[serde(default)]
    pub retail_price: Option<String>,

    /// Print and preview files. The first file's `preview_url` is the image
    /// shown for this variant.
    #[serde(default)]
    pub files: Vec<PrintfulFile>,

    /// Key/value options such as size and color.
    #[serde(default)]
    pub options: Vec<PrintfulOption>,
}

/// A file attached to a variant.
#[derive(Debug, Deserialize)]
pub struct PrintfulFile {
    /// File role, e.g. `"default"` or `"preview"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// An option key/value pair on a variant.
#[derive(Debug, Deserialize)]
pub struct PrintfulOption {
    /// Option key, e.g. `"size"` or `"color"`.
    pub id: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl PrintfulOption {
    /// Returns the option value as text, or `None` when it is empty or not
    /// a scalar.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text = match &self.value {
            serde_json::Value::String(s) => s.trim().to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_accepts_numeric_and_text_ids() {
        let json = r#"{
            "code": 200,
            "result": [
                {"id": 1001, "name": "Tee", "variants": []},
                {"id": "ext-42", "name": "Mug", "variants": []}
            ]
        }"#;
        let parsed: PrintfulProductsResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.result[0].id.to_string(), "1001");
        assert_eq!(parsed.result[1].id.to_string(), "ext-42");
    }

    #[test]
    fn product_accepts_sync_variants_alias() {
        let json = r#"{
            "id": 7,
            "name": "Hoodie",
            "sync_variants": [{"retail_price": "49.00"}]
        }"#;
        let parsed: PrintfulProduct = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.variants.len(), 1);
        assert!(parsed.variants[0].files.is_empty());
        assert!(parsed.variants[0].options.is_empty());
    }

    #[test]
    fn option_text_handles_scalars_only() {
        let string_opt: PrintfulOption =
            serde_json::from_str(r#"{"id": "size", "value": " XL "}"#).expect("parse");
        let number_opt: PrintfulOption =
            serde_json::from_str(r#"{"id": "size", "value": 42}"#).expect("parse");
        let array_opt: PrintfulOption =
            serde_json::from_str(r##"{"id": "thread_colors", "value": ["#FFFFFF"]}"##)
                .expect("parse");
        let empty_opt: PrintfulOption =
            serde_json::from_str(r#"{"id": "color", "value": ""}"#).expect("parse");

        assert_eq!(string_opt.text().as_deref(), Some("XL"));
        assert_eq!(number_opt.text().as_deref(), Some("42"));
        assert!(array_opt.text().is_none());
        assert!(empty_opt.text().is_none());
    }
}
