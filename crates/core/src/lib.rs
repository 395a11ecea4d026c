pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod product;
pub mod profile;

pub use error::{Result, VitrinaError};
pub use extract::{
    DESCRIPTION_NOT_FOUND, Extractor, ExtractorConfig, ExtractorConfigBuilder, NAME_NOT_FOUND, PRICE_NOT_FOUND,
    extract_description, extract_images, extract_name, extract_price,
};
#[cfg(feature = "fetch")]
pub use extract::scrape;
#[cfg(feature = "fetch")]
pub use fetch::fetch_page;
pub use fetch::{FetchConfig, Page, fetch_file, fetch_stdin, parse_product_url};
pub use formatters::{JsonConfig, TextConfig, convert_to_json, convert_to_text};
pub use parse::{Document, Element};
pub use product::Product;
pub use profile::{
    Directive, FieldSelector, ProductSelectors, ProfileLoader, ProfileLoaderBuilder, ProfileParser, SiteProfile,
};
