use std::collections::{HashMap, HashSet};

/// Render a model reply as sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "em", "strong", "del", "code", "pre", "blockquote", "ul", "ol", "li", "a",
        "h1", "h2", "h3", "h4", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_common_reply_markup() {
        let html = markdown_to_html("## Photosynthesis\n\n- **light** reactions\n- Calvin cycle");
        assert!(html.contains("<h2>Photosynthesis</h2>"));
        assert!(html.contains("<strong>light</strong>"));
        assert!(html.contains("<li>Calvin cycle</li>"));
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let html = markdown_to_html("<script>alert(1)</script>[x](https://example.com)");
        assert!(!html.contains("<script"));
        assert!(html.contains("href=\"https://example.com\""));

        let cleaned = sanitize_html("<p onclick=\"evil()\">hi</p>");
        assert_eq!(cleaned, "<p>hi</p>");
    }
}
