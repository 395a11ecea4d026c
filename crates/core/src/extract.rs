//! Product field extraction.
//!
//! The free functions map a [`Document`] to one field each through the
//! compiled [`ProductSelectors`]. A lookup that matches nothing is recovered
//! here with a fixed fallback string; it is never reported as an error.
//!
//! [`Extractor`] owns one parsed page and memoizes every field, so asking
//! for the same field twice neither re-selects nor re-fetches. [`scrape`]
//! is the end-to-end operation: fetch, parse, extract.
//!
//! # Example
//!
//! ```rust
//! use vitrina_core::{Extractor, ExtractorConfig, Page};
//!
//! let html = r#"
//!     <div class="ui-pdp-container__col col-2 mr-32">
//!         <h1 class="ui-pdp-title">Widget</h1>
//!         <span class="andes-money-amount__fraction">199</span>
//!     </div>
//! "#;
//!
//! let extractor = Extractor::new(Page::new("fixture", html), &ExtractorConfig::default());
//! let product = extractor.all_attributes();
//! assert_eq!(product.name, "Widget");
//! assert_eq!(product.price, "199");
//! ```

use std::cell::OnceCell;
use std::sync::Arc;
use std::time::Instant;

use crate::fetch::{FetchConfig, Page};
use crate::parse::Document;
use crate::product::Product;
use crate::profile::{FieldSelector, ProductSelectors};

pub const NAME_NOT_FOUND: &str = "The product name was not found.";
pub const PRICE_NOT_FOUND: &str = "The product price was not found.";
pub const DESCRIPTION_NOT_FOUND: &str = "The product description was not found.";

/// Extracts the product name, or [`NAME_NOT_FOUND`].
pub fn extract_name(doc: &Document, selectors: &ProductSelectors) -> String {
    extract_text(doc, &selectors.name).unwrap_or_else(|| NAME_NOT_FOUND.to_string())
}

/// Extracts the price fragment, or [`PRICE_NOT_FOUND`].
pub fn extract_price(doc: &Document, selectors: &ProductSelectors) -> String {
    extract_text(doc, &selectors.price).unwrap_or_else(|| PRICE_NOT_FOUND.to_string())
}

/// Extracts the description paragraph, or [`DESCRIPTION_NOT_FOUND`].
pub fn extract_description(doc: &Document, selectors: &ProductSelectors) -> String {
    extract_text(doc, &selectors.description).unwrap_or_else(|| DESCRIPTION_NOT_FOUND.to_string())
}

/// Reads the zoom attribute of every gallery image, in document order.
///
/// Images without the attribute keep their position as `None`.
pub fn extract_images(doc: &Document, selectors: &ProductSelectors) -> Vec<Option<String>> {
    doc.find_all(&selectors.gallery)
        .iter()
        .map(|img| img.attr(&selectors.image_attr).map(str::to_string))
        .collect()
}

/// First container match, then the first target inside it.
fn extract_text(doc: &Document, field: &FieldSelector) -> Option<String> {
    let target = match &field.container {
        Some(container) => doc.find(container)?.find(&field.target),
        None => doc.find(&field.target),
    };

    target.map(|el| el.text())
}

/// Configuration for one [`Extractor`].
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Emit timing diagnostics for this instance.
    pub verbose: bool,

    /// Compute every field at construction instead of on first access.
    pub eager: bool,

    /// HTTP settings used by [`scrape`].
    pub fetch: FetchConfig,

    /// Selector table; shared because compiled selectors are reused across requests.
    pub selectors: Arc<ProductSelectors>,
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitrina_core::ExtractorConfig;
    ///
    /// let config = ExtractorConfig::builder().verbose(true).eager(true).build();
    /// assert!(config.eager);
    /// ```
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }
}

/// Builder for ExtractorConfig.
#[derive(Debug, Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn eager(mut self, eager: bool) -> Self {
        self.config.eager = eager;
        self
    }

    pub fn fetch(mut self, fetch: FetchConfig) -> Self {
        self.config.fetch = fetch;
        self
    }

    pub fn selectors(mut self, selectors: impl Into<Arc<ProductSelectors>>) -> Self {
        self.config.selectors = selectors.into();
        self
    }

    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

/// Extracts product fields from one fetched page.
///
/// The extractor owns its parsed [`Document`] exclusively. Each field is
/// computed at most once and then served from its cell.
pub struct Extractor {
    url: String,
    document: Document,
    selectors: Arc<ProductSelectors>,
    verbose: bool,
    name: OnceCell<String>,
    price: OnceCell<String>,
    description: OnceCell<String>,
    images: OnceCell<Vec<Option<String>>>,
}

impl Extractor {
    /// Parses `page`; in eager mode every field is extracted before returning.
    pub fn new(page: Page, config: &ExtractorConfig) -> Self {
        let started = Instant::now();
        let document = Document::parse(&page.html);

        if config.verbose {
            tracing::info!(
                url = %page.url,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Parsed product page"
            );
        }

        let extractor = Self {
            url: page.url,
            document,
            selectors: Arc::clone(&config.selectors),
            verbose: config.verbose,
            name: OnceCell::new(),
            price: OnceCell::new(),
            description: OnceCell::new(),
            images: OnceCell::new(),
        };

        if config.eager {
            extractor.load_all();
        }

        extractor
    }

    /// Where the page came from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The parsed page.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn name(&self) -> &str {
        self.name.get_or_init(|| extract_name(&self.document, &self.selectors))
    }

    pub fn price(&self) -> &str {
        self.price.get_or_init(|| extract_price(&self.document, &self.selectors))
    }

    pub fn description(&self) -> &str {
        self.description
            .get_or_init(|| extract_description(&self.document, &self.selectors))
    }

    pub fn images(&self) -> &[Option<String>] {
        self.images.get_or_init(|| extract_images(&self.document, &self.selectors))
    }

    /// True once every field has been computed.
    pub fn is_loaded(&self) -> bool {
        self.name.get().is_some()
            && self.price.get().is_some()
            && self.description.get().is_some()
            && self.images.get().is_some()
    }

    fn load_all(&self) {
        self.name();
        self.price();
        self.description();
        self.images();
    }

    /// Returns every field, computing only the ones not cached yet.
    pub fn all_attributes(&self) -> Product {
        let started = Instant::now();
        self.load_all();

        let product = Product {
            name: self.name().to_string(),
            price: self.price().to_string(),
            description: self.description().to_string(),
            images: self.images().to_vec(),
        };

        if self.verbose {
            tracing::info!(
                url = %self.url,
                elapsed_ms = started.elapsed().as_millis() as u64,
                images = product.images.len(),
                "Extracted all attributes"
            );
        }

        product
    }
}

/// Fetches `url` and extracts its product fields.
///
/// A failed fetch is returned as an error; extraction never runs without a
/// document. The parsed document lives only after the fetch completes, so
/// the returned future stays `Send`.
#[cfg(feature = "fetch")]
pub async fn scrape(url: &str, config: &ExtractorConfig) -> crate::Result<Product> {
    let started = Instant::now();
    if config.verbose {
        tracing::info!(url, "Fetching product page");
    }

    let page = crate::fetch::fetch_page(url, &config.fetch).await?;

    if config.verbose {
        tracing::info!(
            url,
            bytes = page.html.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched product page"
        );
    }

    let extractor = Extractor::new(page, config);
    Ok(extractor.all_attributes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PDP_HTML: &str = r#"
        <html><body>
            <div class="ui-pdp-container__col col-1">
                <h1 class="ui-pdp-title">Decoy</h1>
            </div>
            <div class="ui-pdp-container__col col-2 mr-32">
                <h1 class="ui-pdp-title">
                    Laptop Lenovo IdeaPad 15.6
                </h1>
                <span class="andes-money-amount__fraction">8,499</span>
                <span class="andes-money-amount__fraction">9,999</span>
            </div>
            <div class="ui-pdp-description">
                <p class="ui-pdp-description__content">Ryzen 3, 8 GB RAM, 256 GB SSD.</p>
            </div>
            <div class="ui-pdp-gallery">
                <span class="ui-pdp-gallery__column">
                    <figure class="ui-pdp-gallery__figure">
                        <img src="1.webp" data-zoom="https://http2.mlstatic.com/1-zoom.webp">
                    </figure>
                    <figure class="ui-pdp-gallery__figure">
                        <img src="2.webp">
                    </figure>
                    <figure class="ui-pdp-gallery__figure">
                        <img src="3.webp" data-zoom="https://http2.mlstatic.com/3-zoom.webp">
                    </figure>
                </span>
            </div>
            <figure class="ui-pdp-gallery__figure"><img data-zoom="outside.webp"></figure>
        </body></html>
    "#;

    fn doc(html: &str) -> Document {
        Document::parse(html)
    }

    #[test]
    fn test_widget_scenario() {
        let html = r#"<div class="ui-pdp-container__col col-2 mr-32"><h1 class="ui-pdp-title">Widget</h1><span class="andes-money-amount__fraction">199</span></div>"#;
        let selectors = ProductSelectors::builtin();

        assert_eq!(extract_name(&doc(html), &selectors), "Widget");
        assert_eq!(extract_price(&doc(html), &selectors), "199");
    }

    #[test]
    fn test_name_is_trimmed_and_scoped_to_container() {
        let selectors = ProductSelectors::builtin();
        assert_eq!(extract_name(&doc(PDP_HTML), &selectors), "Laptop Lenovo IdeaPad 15.6");
    }

    #[test]
    fn test_price_takes_first_fraction_in_container() {
        let selectors = ProductSelectors::builtin();
        assert_eq!(extract_price(&doc(PDP_HTML), &selectors), "8,499");
    }

    #[test]
    fn test_description() {
        let selectors = ProductSelectors::builtin();
        assert_eq!(
            extract_description(&doc(PDP_HTML), &selectors),
            "Ryzen 3, 8 GB RAM, 256 GB SSD."
        );
    }

    #[test]
    fn test_images_keep_order_and_missing_zoom() {
        let selectors = ProductSelectors::builtin();
        assert_eq!(
            extract_images(&doc(PDP_HTML), &selectors),
            vec![
                Some("https://http2.mlstatic.com/1-zoom.webp".to_string()),
                None,
                Some("https://http2.mlstatic.com/3-zoom.webp".to_string()),
            ]
        );
    }

    #[rstest]
    #[case::empty_page("<html><body></body></html>")]
    #[case::heading_without_container(r#"<h1 class="ui-pdp-title">Orphan</h1><span class="andes-money-amount__fraction">1</span>"#)]
    #[case::container_without_heading(r#"<div class="ui-pdp-container__col col-2 mr-32"><h2>Other</h2></div>"#)]
    #[case::reordered_container_classes(r#"<div class="col-2 ui-pdp-container__col mr-32"><h1 class="ui-pdp-title">Widget</h1><span class="andes-money-amount__fraction">199</span></div>"#)]
    #[case::extra_container_class(r#"<div class="ui-pdp-container__col col-2 mr-32 sticky"><h1 class="ui-pdp-title">Widget</h1><span class="andes-money-amount__fraction">199</span></div>"#)]
    fn test_fallbacks(#[case] html: &str) {
        let selectors = ProductSelectors::builtin();
        let document = doc(html);

        assert_eq!(extract_name(&document, &selectors), NAME_NOT_FOUND);
        assert_eq!(extract_price(&document, &selectors), PRICE_NOT_FOUND);
        assert_eq!(extract_description(&document, &selectors), DESCRIPTION_NOT_FOUND);
        assert!(extract_images(&document, &selectors).is_empty());
    }

    #[test]
    fn test_fallback_strings_are_exact() {
        assert_eq!(NAME_NOT_FOUND, "The product name was not found.");
        assert_eq!(PRICE_NOT_FOUND, "The product price was not found.");
        assert_eq!(DESCRIPTION_NOT_FOUND, "The product description was not found.");
    }

    #[test]
    fn test_lazy_extractor_fills_on_demand() {
        let extractor = Extractor::new(Page::new("fixture", PDP_HTML), &ExtractorConfig::default());
        assert!(!extractor.is_loaded());

        assert_eq!(extractor.price(), "8,499");
        assert!(!extractor.is_loaded());

        let _ = extractor.all_attributes();
        assert!(extractor.is_loaded());
    }

    #[test]
    fn test_eager_extractor_loads_on_construction() {
        let config = ExtractorConfig::builder().eager(true).verbose(true).build();
        let extractor = Extractor::new(Page::new("fixture", PDP_HTML), &config);

        assert!(extractor.is_loaded());
        assert_eq!(extractor.url(), "fixture");
    }

    #[test]
    fn test_all_attributes_is_idempotent() {
        let extractor = Extractor::new(Page::new("fixture", PDP_HTML), &ExtractorConfig::default());

        let first = extractor.all_attributes();
        let second = extractor.all_attributes();

        assert_eq!(first, second);
        assert!(std::ptr::eq(extractor.name(), extractor.name()));
    }

    #[test]
    fn test_custom_selectors() {
        use crate::profile::{ProfileParser, ProductSelectors};

        let profile = ProfileParser::parse_string("name_container: article\nname: h2\nimage_attr: src\n").unwrap();
        let config = ExtractorConfig::builder()
            .selectors(ProductSelectors::compile(&profile).unwrap())
            .build();

        let html = r#"<article><h2>Custom</h2></article>
            <div class="ui-pdp-gallery"><span class="ui-pdp-gallery"><figure class="ui-pdp-gallery"><img src="s.jpg"></figure></span></div>"#;
        let product = Extractor::new(Page::new("fixture", html), &config).all_attributes();

        assert_eq!(product.name, "Custom");
        assert_eq!(product.price, PRICE_NOT_FOUND);
        assert_eq!(product.images, vec![Some("s.jpg".to_string())]);
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_scrape_rejects_invalid_url_before_extracting() {
        let result = scrape("no-scheme.example/p/1", &ExtractorConfig::default()).await;
        assert!(matches!(result, Err(crate::VitrinaError::InvalidUrl(_))));
    }
}
