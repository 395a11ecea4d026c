//! Compiled selector table.
//!
//! The built-in values target MercadoLibre product detail pages. They are the
//! one place coupled to the marketplace's markup: when the site changes its
//! class names, extraction silently degrades to the fallback strings, so
//! update these constants (or ship a site profile) together with a fixture.

use scraper::Selector;

use crate::error::{Result, VitrinaError};
use crate::profile::directives::SiteProfile;

/// Column holding the product title and price block. Matches the exact
/// `class` attribute, so reordered or additional classes do not match.
pub const DEFAULT_CONTAINER: &str = r#"div[class="ui-pdp-container__col col-2 mr-32"]"#;
pub const DEFAULT_NAME: &str = "h1.ui-pdp-title";
pub const DEFAULT_PRICE: &str = "span.andes-money-amount__fraction";
pub const DEFAULT_DESCRIPTION: &str = "p.ui-pdp-description__content";
/// Gallery chain: three nested class-substring fragments, then the image.
pub const DEFAULT_GALLERY: &str =
    r#"div[class*="ui-pdp-gallery"] span[class*="ui-pdp-gallery"] figure[class*="ui-pdp-gallery"] img"#;
pub const DEFAULT_IMAGE_ATTR: &str = "data-zoom";

/// Lookup for one text field: an optional container, then a target inside it.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    pub container: Option<Selector>,
    pub target: Selector,
}

/// Every selector the extractor needs, compiled once.
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    pub name: FieldSelector,
    pub price: FieldSelector,
    pub description: FieldSelector,
    pub gallery: Selector,
    pub image_attr: String,
}

impl ProductSelectors {
    /// Compiles a profile, using the built-in value for every unset field.
    pub fn compile(profile: &SiteProfile) -> Result<Self> {
        let or_default = |value: &Option<String>, default: &'static str| -> String {
            value.clone().unwrap_or_else(|| default.to_string())
        };

        let name = FieldSelector {
            container: Some(compile_one(
                "name_container",
                &or_default(&profile.name_container, DEFAULT_CONTAINER),
            )?),
            target: compile_one("name", &or_default(&profile.name, DEFAULT_NAME))?,
        };

        let price = FieldSelector {
            container: Some(compile_one(
                "price_container",
                &or_default(&profile.price_container, DEFAULT_CONTAINER),
            )?),
            target: compile_one("price", &or_default(&profile.price, DEFAULT_PRICE))?,
        };

        let description = FieldSelector {
            container: None,
            target: compile_one(
                "description",
                &or_default(&profile.description, DEFAULT_DESCRIPTION),
            )?,
        };

        let gallery = compile_one("gallery", &or_default(&profile.gallery, DEFAULT_GALLERY))?;
        let image_attr = or_default(&profile.image_attr, DEFAULT_IMAGE_ATTR);

        Ok(Self { name, price, description, gallery, image_attr })
    }

    /// The built-in MercadoLibre table.
    pub fn builtin() -> Self {
        Self::compile(&SiteProfile::new()).expect("built-in selectors are valid CSS")
    }
}

impl Default for ProductSelectors {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile_one(field: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| VitrinaError::InvalidSelector { field: field.to_string(), reason: e.to_string() })
}
