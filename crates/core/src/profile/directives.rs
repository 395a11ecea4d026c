use crate::error::{Result, VitrinaError};
use std::collections::HashMap;

/// A single line of a site profile file.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Selectors for the product fields
    NameContainer(String),
    Name(String),
    PriceContainer(String),
    Price(String),
    Description(String),
    Gallery(String),

    /// Attribute holding the full-size image URL
    ImageAttr(String),

    /// HTTP configuration
    HttpHeader(String, String),
}

/// Selector table for one marketplace.
///
/// Unset fields fall back to the built-in MercadoLibre selectors when the
/// profile is compiled into [`crate::ProductSelectors`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteProfile {
    pub name_container: Option<String>,
    pub name: Option<String>,
    pub price_container: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub gallery: Option<String>,
    pub image_attr: Option<String>,

    /// HTTP headers sent with the fetch
    pub http_headers: HashMap<String, String>,
}

impl SiteProfile {
    /// Create a new empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive to this profile
    pub fn add_directive(&mut self, directive: Directive) {
        match directive {
            Directive::NameContainer(css) => self.name_container = Some(css),
            Directive::Name(css) => self.name = Some(css),
            Directive::PriceContainer(css) => self.price_container = Some(css),
            Directive::Price(css) => self.price = Some(css),
            Directive::Description(css) => self.description = Some(css),
            Directive::Gallery(css) => self.gallery = Some(css),
            Directive::ImageAttr(attr) => self.image_attr = Some(attr),

            Directive::HttpHeader(name, value) => {
                self.http_headers.insert(name, value);
            }
        }
    }

    /// Merge another profile into this one.
    /// Fields set in `other` win over the ones already present.
    pub fn merge(&mut self, other: &SiteProfile) {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }

        take(&mut self.name_container, &other.name_container);
        take(&mut self.name, &other.name);
        take(&mut self.price_container, &other.price_container);
        take(&mut self.price, &other.price);
        take(&mut self.description, &other.description);
        take(&mut self.gallery, &other.gallery);
        take(&mut self.image_attr, &other.image_attr);

        for (name, value) in &other.http_headers {
            self.http_headers.insert(name.clone(), value.clone());
        }
    }

    /// Headers as owned pairs, sorted by name for a stable request order
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> =
            self.http_headers.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        headers.sort();
        headers
    }

    /// Check if this profile overrides nothing
    pub fn is_empty(&self) -> bool {
        self.name_container.is_none()
            && self.name.is_none()
            && self.price_container.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.gallery.is_none()
            && self.image_attr.is_none()
            && self.http_headers.is_empty()
    }
}

/// Parse a directive line from a profile file
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(VitrinaError::SiteConfigError("Empty or comment line".to_string()));
    }

    if let Some((key, value)) = line.split_once(':') {
        let key = key.trim();
        let value = value.trim().to_string();

        if value.is_empty() {
            return Err(VitrinaError::SiteConfigError(format!("Missing value for {}", key)));
        }

        match key {
            "name_container" => Ok(Directive::NameContainer(value)),
            "name" => Ok(Directive::Name(value)),
            "price_container" => Ok(Directive::PriceContainer(value)),
            "price" => Ok(Directive::Price(value)),
            "description" => Ok(Directive::Description(value)),
            "gallery" => Ok(Directive::Gallery(value)),
            "image_attr" => Ok(Directive::ImageAttr(value)),

            _ => {
                if let Some(header_name) = key.strip_prefix("http_header(") {
                    if let Some(header_name) = header_name.strip_suffix(')') {
                        Ok(Directive::HttpHeader(header_name.to_string(), value))
                    } else {
                        Err(VitrinaError::SiteConfigError(format!(
                            "Invalid http_header format: {}",
                            key
                        )))
                    }
                } else {
                    Err(VitrinaError::SiteConfigError(format!("Unknown directive: {}", key)))
                }
            }
        }
    } else {
        Err(VitrinaError::SiteConfigError(format!(
            "Invalid directive format: {}",
            line
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directive_name() {
        let directive = parse_directive("name: h1.ui-pdp-title").unwrap();
        assert_eq!(directive, Directive::Name("h1.ui-pdp-title".to_string()));
    }

    #[test]
    fn test_parse_directive_keeps_colons_in_value() {
        let directive = parse_directive("gallery: figure:first-child img").unwrap();
        assert_eq!(directive, Directive::Gallery("figure:first-child img".to_string()));

        let directive = parse_directive("name_container: div:not(.ad) > section").unwrap();
        assert_eq!(directive, Directive::NameContainer("div:not(.ad) > section".to_string()));
    }

    #[test]
    fn test_parse_directive_http_header() {
        let directive = parse_directive("http_header(Cookie): cp=01000").unwrap();
        assert_eq!(
            directive,
            Directive::HttpHeader("Cookie".to_string(), "cp=01000".to_string())
        );
    }

    #[test]
    fn test_parse_directive_errors() {
        assert!(parse_directive("# comment").is_err());
        assert!(parse_directive("no separator here").is_err());
        assert!(parse_directive("colour: red").is_err());
        assert!(parse_directive("name:").is_err());
        assert!(parse_directive("http_header(Cookie: x").is_err());
    }

    #[test]
    fn test_merge_overrides_set_fields_only() {
        let mut base = SiteProfile::new();
        base.add_directive(Directive::Name("h1.title".to_string()));
        base.add_directive(Directive::Price("span.price".to_string()));

        let mut other = SiteProfile::new();
        other.add_directive(Directive::Price("span.amount".to_string()));
        other.add_directive(Directive::HttpHeader("Cookie".to_string(), "a=b".to_string()));

        base.merge(&other);

        assert_eq!(base.name.as_deref(), Some("h1.title"));
        assert_eq!(base.price.as_deref(), Some("span.amount"));
        assert_eq!(base.header_pairs(), vec![("Cookie".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn test_is_empty() {
        let mut profile = SiteProfile::new();
        assert!(profile.is_empty());

        profile.add_directive(Directive::ImageAttr("data-src".to_string()));
        assert!(!profile.is_empty());
    }
}
