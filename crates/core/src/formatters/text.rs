use crate::product::Product;

/// Placeholder printed for a gallery image without a zoom URL.
pub const MISSING_IMAGE: &str = "(no zoom image)";

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Wrap the description at the given width (0 = no wrapping)
    pub line_width: usize,

    /// Print the page source above the fields
    pub include_source: bool,
}

/// Render a product as a labelled text block
pub fn convert_to_text(product: &Product, source: Option<&str>, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_source
        && let Some(source) = source
    {
        output.push_str(&format!("Source: {}\n\n", source));
    }

    output.push_str(&format!("Name: {}\n", product.name));
    output.push_str(&format!("Price: {}\n", product.price));
    output.push_str("Description:\n");
    output.push_str(&wrap_text(&product.description, config.line_width));
    output.push('\n');

    output.push_str(&format!("Images ({}):\n", product.images.len()));
    for image in &product.images {
        output.push_str("  - ");
        output.push_str(image.as_deref().unwrap_or(MISSING_IMAGE));
        output.push('\n');
    }

    output
}

/// Wrap text at word boundaries
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
        } else if current_line.chars().count() + 1 + word.chars().count() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}
