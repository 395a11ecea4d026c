pub mod directives;
pub mod loader;
pub mod parser;
pub mod selectors;

pub use directives::{Directive, SiteProfile};
pub use loader::{ProfileLoader, ProfileLoaderBuilder};
pub use parser::ProfileParser;
pub use selectors::{FieldSelector, ProductSelectors};
