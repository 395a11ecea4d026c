//! askama views. Every template auto-escapes, scraped text included.

use askama::Template;
use vitrina_core::Product;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "product.html")]
pub struct ProductTemplate<'a> {
    pub url: &'a str,
    pub name: &'a str,
    pub price: &'a str,
    pub images: &'a [Option<String>],
    pub description: &'a str,
}

impl<'a> ProductTemplate<'a> {
    pub fn new(url: &'a str, product: &'a Product) -> Self {
        Self {
            url,
            name: &product.name,
            price: &product.price,
            images: &product.images,
            description: &product.description,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub status: u16,
    pub title: &'a str,
    pub message: &'a str,
}
