//! SEO artifacts derived from the resolved site config. All three are pure
//! functions of the view model; no extra state, no network.

use chrono::{SecondsFormat, Utc};
use models::view_model::SiteConfig;
use serde_json::{json, Value};

const OG_WIDTH: u32 = 1200;
const OG_HEIGHT: u32 = 630;

/// schema.org Restaurant document for the `<script type="application/ld+json">`
/// block. Opening-hours and rating blocks are fixed editorial copy.
pub fn structured_data(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Restaurant",
        "name": config.branding.name,
        "image": "https://images.unsplash.com/photo-1414235077428-338989a2e8c0",
        "description": config.branding.description,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": config.contact.address.street,
            "addressLocality": config.contact.address.city,
            "addressRegion": config.contact.address.state,
            "postalCode": config.contact.address.zip,
            "addressCountry": config.contact.address.country,
        },
        "telephone": config.contact.phone,
        "email": config.contact.email,
        "servesCuisine": "Fine Dining",
        "priceRange": "$$$",
        "openingHoursSpecification": [
            {
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": ["Tuesday", "Wednesday", "Thursday"],
                "opens": "17:00",
                "closes": "22:00",
            },
            {
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": ["Friday", "Saturday"],
                "opens": "17:00",
                "closes": "23:00",
            },
            {
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": "Sunday",
                "opens": "17:00",
                "closes": "21:00",
            }
        ],
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": "4.9",
            "reviewCount": "247",
        },
    })
}

struct SitemapEntry {
    anchor: &'static str,
    change_frequency: &'static str,
    priority: &'static str,
}

const SITEMAP_ENTRIES: &[SitemapEntry] = &[
    SitemapEntry { anchor: "", change_frequency: "weekly", priority: "1.0" },
    SitemapEntry { anchor: "#about", change_frequency: "monthly", priority: "0.8" },
    SitemapEntry { anchor: "#services", change_frequency: "weekly", priority: "0.9" },
    SitemapEntry { anchor: "#gallery", change_frequency: "weekly", priority: "0.7" },
    SitemapEntry { anchor: "#testimonials", change_frequency: "monthly", priority: "0.6" },
    SitemapEntry { anchor: "#contact", change_frequency: "monthly", priority: "0.8" },
];

/// Section-anchor sitemap for the one-page site.
pub fn sitemap_xml(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let last_modified = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in SITEMAP_ENTRIES {
        let loc = if entry.anchor.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{}", entry.anchor)
        };
        out.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape_xml(&loc),
            last_modified,
            entry.change_frequency,
            entry.priority,
        ));
    }
    out.push_str("</urlset>\n");
    out
}

/// 1200×630 social-preview card: name, tagline and description over a dark
/// gradient, mirroring the generated open-graph image.
pub fn og_image_svg(config: &SiteConfig) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            "  <defs>\n",
            "    <linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\n",
            "      <stop offset=\"0%\" stop-color=\"#0f172a\"/>\n",
            "      <stop offset=\"100%\" stop-color=\"#1e293b\"/>\n",
            "    </linearGradient>\n",
            "  </defs>\n",
            "  <rect width=\"{w}\" height=\"{h}\" fill=\"url(#bg)\"/>\n",
            "  <text x=\"600\" y=\"280\" font-family=\"serif\" font-size=\"80\" font-weight=\"bold\" fill=\"#f59e0b\" text-anchor=\"middle\">{name}</text>\n",
            "  <text x=\"600\" y=\"360\" font-family=\"serif\" font-size=\"40\" fill=\"#fbbf24\" text-anchor=\"middle\">{tagline}</text>\n",
            "  <text x=\"600\" y=\"430\" font-family=\"sans-serif\" font-size=\"28\" fill=\"#cbd5e1\" text-anchor=\"middle\">{description}</text>\n",
            "</svg>\n",
        ),
        w = OG_WIDTH,
        h = OG_HEIGHT,
        name = escape_xml(&config.branding.name),
        tagline = escape_xml(&config.branding.tagline),
        description = escape_xml(&config.branding.description),
    )
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_config;

    #[test]
    fn structured_data_reflects_branding_and_contact() {
        let mut cfg = fallback_config();
        cfg.branding.name = "Le Jardin Élégant".into();
        cfg.contact.phone = "+1 (555) 123-4567".into();
        let data = structured_data(&cfg);
        assert_eq!(data["@type"], "Restaurant");
        assert_eq!(data["name"], "Le Jardin Élégant");
        assert_eq!(data["telephone"], "+1 (555) 123-4567");
    }

    #[test]
    fn sitemap_lists_every_section_anchor() {
        let xml = sitemap_xml("https://bistro.example.com/");
        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("<loc>https://bistro.example.com</loc>"));
        assert!(xml.contains("https://bistro.example.com/#contact"));
        assert!(!xml.contains("com//#"));
    }

    #[test]
    fn og_image_escapes_markup_in_copy() {
        let mut cfg = fallback_config();
        cfg.branding.name = "Bistro <& Friends>".into();
        let svg = og_image_svg(&cfg);
        assert!(svg.contains("Bistro &lt;&amp; Friends&gt;"));
        assert!(svg.contains("width=\"1200\" height=\"630\""));
    }
}
