//! Discovery feed formatting: sitemap, robots, RSS.
//!
//! Pure string builders — no I/O, no state. The orchestrator decides what to
//! write where; this module only knows how each format looks. All dynamic
//! values pass through XML escaping.

use chrono::{DateTime, Utc};

use crate::document::Document;

/// A post entry ready for the RSS channel: the resolved document plus its
/// canonical public path.
pub struct FeedPost<'a> {
    pub doc: &'a Document,
    pub path: String,
}

/// sitemap.xml from the canonical URLs of every written route.
pub fn sitemap_xml(urls: &[String]) -> String {
    let mut items = String::new();
    for url in urls {
        items.push_str(&format!(
            "\n  <url>\n    <loc>{}</loc>\n    <changefreq>weekly</changefreq>\n    <priority>0.7</priority>\n  </url>",
            xml_escape(url)
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">{items}\n</urlset>\n"
    )
}

/// robots.txt allowing everything and pointing at the sitemap.
pub fn robots_txt(hostname: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: https://{hostname}/sitemap.xml\n")
}

/// rss.xml for one locale's posts.
pub fn rss_xml(hostname: &str, site_name: &str, posts: &[FeedPost]) -> String {
    let mut items = String::new();
    for post in posts {
        let link = format!("https://{hostname}{}", post.path);
        items.push_str("\n    <item>\n");
        items.push_str(&format!(
            "      <title>{}</title>\n",
            xml_escape(&post.doc.title)
        ));
        items.push_str(&format!("      <link>{}</link>\n", xml_escape(&link)));
        items.push_str(&format!("      <guid>{}</guid>\n", xml_escape(&link)));
        if let Some(published) = &post.doc.published_at {
            items.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                rfc2822(published)
            ));
        }
        items.push_str(&format!(
            "      <description>{}</description>\n",
            xml_escape(&post.doc.meta_description)
        ));
        items.push_str("    </item>");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\"><channel>\n  <title>{title}</title>\n  <link>https://{hostname}/</link>\n  <description>{title} feed</description>{items}\n</channel></rss>\n",
        title = xml_escape(site_name),
    )
}

fn rfc2822(dt: &DateTime<Utc>) -> String {
    dt.to_rfc2822()
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
