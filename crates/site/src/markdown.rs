//! Markdown rendering for article bodies.

use comrak::{Options, markdown_to_html};

/// Render an article body to HTML with GitHub Flavored Markdown extensions.
///
/// Article bodies arrive through the JSON API, so raw HTML in the source is
/// escaped rather than passed through.
#[must_use]
pub fn render(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    options.render.r#unsafe = false;
    options.render.escape = true;

    markdown_to_html(content, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_headings_and_tables() {
        let html = render("## Materiali\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h2>"));
        assert!(html.contains("Materiali"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
