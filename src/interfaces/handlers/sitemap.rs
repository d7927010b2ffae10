use actix_web::{http::header::CACHE_CONTROL, web, HttpResponse};
use chrono::SecondsFormat;
use tracing::{error, instrument};

use crate::{
    constants::SITEMAP_CACHE_CONTROL, entities::blog::BlogSitemapEntry, errors::AppError, AppState,
};

const STATIC_PAGES: [&str; 3] = ["/", "/projects", "/blog"];

#[instrument(skip(state))]
pub async fn sitemap(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = state.blog_handler.sitemap_entries().await.map_err(|e| {
        error!("Error building sitemap: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .insert_header((CACHE_CONTROL, SITEMAP_CACHE_CONTROL))
        .body(render_sitemap(state.config.site_root(), &entries)))
}

pub fn render_sitemap(site_root: &str, entries: &[BlogSitemapEntry]) -> String {
    let root = escape_xml(site_root);
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for page in STATIC_PAGES {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}{}</loc>\n    <changefreq>daily</changefreq>\n    <priority>0.7</priority>\n  </url>\n",
            root, page
        ));
    }

    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}/blog/{}</loc>\n    <changefreq>weekly</changefreq>\n    <lastmod>{}</lastmod>\n    <priority>0.6</priority>\n  </url>\n",
            root,
            escape_xml(&entry.slug),
            entry.last_modified().to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
    }

    xml.push_str("</urlset>");
    xml
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn lists_static_pages_then_posts() {
        let updated = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let xml = render_sitemap(
            "https://example.dev",
            &[BlogSitemapEntry {
                slug: "hello-world".into(),
                published_at: Some(updated),
                updated_at: updated,
            }],
        );

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://example.dev/</loc>"));
        assert!(xml.contains("<loc>https://example.dev/projects</loc>"));
        assert!(xml.contains("<loc>https://example.dev/blog/hello-world</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01T12:00:00.000Z</lastmod>"));
        assert_eq!(xml.matches("<priority>0.7</priority>").count(), 3);
        assert_eq!(xml.matches("<priority>0.6</priority>").count(), 1);
    }

    #[test]
    fn slugs_are_escaped() {
        let now = Utc::now();
        let xml = render_sitemap(
            "https://example.dev",
            &[BlogSitemapEntry {
                slug: "a&b<c>".into(),
                published_at: None,
                updated_at: now,
            }],
        );
        assert!(xml.contains("/blog/a&amp;b&lt;c&gt;</loc>"));
    }
}
