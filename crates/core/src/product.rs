//! The extracted product record.

use serde::{Deserialize, Serialize};

/// The four fields scraped from one product page.
///
/// Each text field holds either the extracted text or its fixed fallback
/// string. `images` keeps one slot per gallery image, `None` when the image
/// carries no zoom URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: String,
    pub description: String,
    pub images: Vec<Option<String>>,
}
