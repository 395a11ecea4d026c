//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! extractor. Queries take pre-compiled [`Selector`]s so a site profile is
//! validated once instead of on every lookup.
//!
//! # Example
//!
//! ```rust
//! use vitrina_core::parse::Document;
//! use scraper::Selector;
//!
//! let doc = Document::parse(r#"<p class="ui-pdp-description__content">Great</p>"#);
//! let selector = Selector::parse("p.ui-pdp-description__content").unwrap();
//! assert_eq!(doc.find(&selector).unwrap().text(), "Great");
//! ```

use scraper::{Html, Selector};

/// A parsed HTML document.
///
/// A Document wraps one fetched page and is owned by exactly one extractor.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from malformed markup, so parsing itself never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Returns the first element matching `selector`, in document order.
    pub fn find(&self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(|element| Element { element })
    }

    /// Returns every element matching `selector`, in document order.
    pub fn find_all(&self, selector: &Selector) -> Vec<Element<'_>> {
        self.html.select(selector).map(|element| Element { element }).collect()
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.find(&selector).map(|el| el.text())
    }
}

/// A single element of a [`Document`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element with surrounding whitespace removed.
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    /// Gets the value of an attribute, `None` when absent.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Returns the first descendant matching `selector`.
    pub fn find(&self, selector: &Selector) -> Option<Element<'a>> {
        self.element.select(selector).next().map(|element| Element { element })
    }
}
