use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_markdown_content(&raw_html)
}

/// Sanitizes rendered Markdown to remove unsafe HTML.
///
/// Root-relative links are kept so posts can reference the site's own
/// assets (`/images/...`); protocol-relative `//host` links are dropped.
pub fn sanitize_markdown_content(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::Custom(Box::new(keep_site_relative)))
        .clean(content)
        .to_string()
}

fn keep_site_relative(url: &str) -> Option<std::borrow::Cow<'_, str>> {
    if url.starts_with('/') && !url.starts_with("//") {
        Some(url.into())
    } else {
        None
    }
}

/// Escapes free text for embedding in HTML, turning line breaks into `<br>`.
pub fn text_to_html(text: &str) -> String {
    text.lines()
        .map(ammonia::clean_text)
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown_and_strips_scripts() {
        let html = safe_markdown_to_html("## Hello\n\n<script>alert(1)</script>\n\n**bold**");
        assert!(html.contains("<h2>Hello</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn keeps_site_relative_images_only() {
        let html = safe_markdown_to_html("![a](/images/blog/a.png) ![b](//evil.example/b.png)");
        assert!(html.contains("src=\"/images/blog/a.png\""));
        assert!(!html.contains("evil.example"));
    }

    #[test]
    fn external_links_get_rel_attributes() {
        let html = safe_markdown_to_html("[site](https://example.com)");
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""));
    }

    #[test]
    fn text_to_html_escapes_and_breaks_lines() {
        assert_eq!(
            text_to_html("line <one>\nline two"),
            "line&#32;&lt;one&gt;<br>line&#32;two"
        );
    }
}
