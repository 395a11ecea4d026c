use crate::Result;
use crate::product::Product;
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
    /// Include the page source next to the product
    pub include_source: bool,
}

/// JSON document written for one product
#[derive(Debug, Clone, Serialize)]
struct JsonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(flatten)]
    product: &'a Product,
}

/// Convert a product to JSON
pub fn convert_to_json(product: &Product, source: Option<&str>, config: &JsonConfig) -> Result<String> {
    let output = JsonOutput { source: source.filter(|_| config.include_source), product };

    if config.pretty { Ok(serde_json::to_string_pretty(&output)?) } else { Ok(serde_json::to_string(&output)?) }
}
