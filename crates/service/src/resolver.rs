//! Resolves the upstream provider record into an always-complete
//! [`SiteConfig`]. Every failure path collapses into the static fallback;
//! callers never see an error from here.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use models::provider::{MediaRef, ServiceOffering, ServiceProviderRecord};
use models::view_model::{
    About, Address, Branding, Contact, Footer, Gallery, Hero, HeroButton, ImageRef, Logo, Menu,
    MenuItem, Seo, SiteConfig, Social, Testimonials,
};
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::fallback;
use crate::upstream::UpstreamClient;

/// Offerings become menu entries only while active; the category label is
/// fixed for service-derived items.
pub fn menu_items_from(services: &[ServiceOffering]) -> Vec<MenuItem> {
    services
        .iter()
        .filter(|s| s.is_active())
        .map(|s| MenuItem {
            id: s.id.clone(),
            name: s.name.clone(),
            category: "Servicio".into(),
            description: s.description.clone().unwrap_or_default(),
            price: s.price_label(),
        })
        .collect()
}

pub fn gallery_images_from(images: &[MediaRef]) -> Vec<ImageRef> {
    images
        .iter()
        .map(|img| ImageRef {
            id: img.url.clone(),
            alt: img.key.clone().unwrap_or_else(|| "Imagen de galería".into()),
        })
        .collect()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build a full site config from the record's direct fields plus fixed
/// default copy. Used when the record carries no `siteConfig` document.
pub fn synthesize_site_config(record: &ServiceProviderRecord) -> SiteConfig {
    let name = non_blank(&record.business_name).unwrap_or("Proveedor de Servicios");
    let description = non_blank(&record.description)
        .unwrap_or("Servicio de calidad en el que puedes confiar");
    let cover = non_blank(&record.cover_image).unwrap_or(fallback::DEFAULT_IMAGE_URL);

    let seo_title = match non_blank(&record.location) {
        Some(location) => format!("{name} | {location}"),
        None => name.to_string(),
    };
    let keywords: Vec<String> = [&record.business_name, &record.provider_type, &record.location]
        .into_iter()
        .filter_map(non_blank)
        .map(String::from)
        .collect();

    SiteConfig {
        branding: Branding {
            name: name.into(),
            tagline: "Proveedor de Servicios Profesionales".into(),
            description: description.into(),
            logo: Logo { url: cover.into(), alt: name.into() },
        },
        theme: fallback::default_theme(),
        hero: Hero {
            title: non_blank(&record.business_name).unwrap_or("Bienvenido").into(),
            subtitle: "Servicio Profesional".into(),
            description: description.into(),
            background_image: ImageRef { id: cover.into(), alt: "Imagen de fondo".into() },
            buttons: vec![HeroButton {
                text: "Contáctanos".into(),
                action: "#contact".into(),
                variant: "primary".into(),
            }],
        },
        about: About {
            title: "Acerca de Nosotros".into(),
            paragraphs: vec![non_blank(&record.description)
                .unwrap_or("Brindamos servicio de calidad.")
                .into()],
            stats: fallback::default_stats(),
        },
        menu: Menu {
            title: "Nuestros Servicios".into(),
            subtitle: "Lo que ofrecemos".into(),
            items: menu_items_from(&record.services),
        },
        gallery: Gallery {
            title: "Galería".into(),
            subtitle: "Nuestro trabajo".into(),
            images: gallery_images_from(&record.images),
        },
        testimonials: Testimonials {
            title: "Testimonios".into(),
            subtitle: "Lo que dicen nuestros clientes".into(),
            items: vec![],
        },
        contact: Contact {
            title: "Contáctanos".into(),
            subtitle: "Ponte en contacto".into(),
            address: Address {
                street: non_blank(&record.address).unwrap_or_default().into(),
                city: non_blank(&record.location).unwrap_or_default().into(),
                state: "".into(),
                zip: "".into(),
                country: "".into(),
            },
            phone: non_blank(&record.phone).unwrap_or_default().into(),
            email: non_blank(&record.email).unwrap_or_default().into(),
            hours: fallback::default_hours(),
            social: Social { instagram: "".into(), facebook: "".into(), twitter: "".into() },
        },
        navigation: fallback::default_navigation(),
        footer: Footer {
            about_text: non_blank(&record.description)
                .unwrap_or("Proveedor de servicios de calidad")
                .into(),
            copyright_text: fallback::copyright_line(name),
        },
        reservation_form: fallback::default_reservation_form(),
        seo: Seo {
            title: seo_title,
            description: non_blank(&record.description)
                .unwrap_or("Proveedor de servicios profesionales")
                .into(),
            keywords,
        },
    }
}

/// Overlay the record's authoritative fields onto a decoded `siteConfig`
/// document. Name and description always come from the record when present;
/// menu and gallery are replaced only when the record actually supplies
/// services or media.
pub fn merge_site_document(record: &ServiceProviderRecord, mut doc: SiteConfig) -> SiteConfig {
    if let Some(name) = non_blank(&record.business_name) {
        doc.branding.name = name.into();
    }
    if let Some(description) = non_blank(&record.description) {
        doc.branding.description = description.into();
    }
    if !record.services.is_empty() {
        doc.menu.items = menu_items_from(&record.services);
    }
    if !record.images.is_empty() {
        doc.gallery.images = gallery_images_from(&record.images);
    }
    doc
}

/// Record → view model. A present but undecodable `siteConfig` counts as
/// absent: the page must render either way.
pub fn build_site_config(record: &ServiceProviderRecord) -> SiteConfig {
    match &record.site_config {
        Some(raw) => match serde_json::from_value::<SiteConfig>(raw.clone()) {
            Ok(doc) => merge_site_document(record, doc),
            Err(e) => {
                warn!(provider_id = %record.id, error = %e, "siteConfig document is malformed; synthesizing defaults");
                synthesize_site_config(record)
            }
        },
        None => synthesize_site_config(record),
    }
}

/// Fetches, caches and defaults the site configuration. The cache holds
/// resolved view models keyed by provider id; entries expire after the
/// configured TTL and failures are never cached.
pub struct ConfigResolver {
    upstream: Option<Arc<UpstreamClient>>,
    cache: Cache<String, Arc<SiteConfig>>,
}

impl ConfigResolver {
    pub fn new(upstream: Option<Arc<UpstreamClient>>, ttl: Duration) -> Self {
        Self {
            upstream,
            cache: Cache::builder().max_capacity(16).time_to_live(ttl).build(),
        }
    }

    /// Always yields a complete configuration. Unconfigured upstream means
    /// zero network calls; any fetch or decode failure degrades to the
    /// static fallback.
    pub async fn resolve(&self) -> Arc<SiteConfig> {
        let Some(client) = self.upstream.clone() else {
            debug!("upstream not configured; serving fallback site config");
            return Arc::new(fallback::fallback_config());
        };

        let key = client.provider_id().to_string();
        let fetch = async move {
            let record = client.fetch_provider().await?;
            Ok::<_, ServiceError>(Arc::new(build_site_config(&record)))
        };
        match self.cache.try_get_with(key, fetch).await {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(error = %e, "failed to resolve site config; serving fallback");
                Arc::new(fallback::fallback_config())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn record(site_config: Option<serde_json::Value>) -> ServiceProviderRecord {
        serde_json::from_value(json!({
            "id": "prov-1",
            "businessName": "Bistro Test",
            "type": "restaurant",
            "description": null,
            "siteConfig": site_config,
            "images": [],
            "services": [{
                "id": "svc-1",
                "name": "Dinner Tasting",
                "priceAmount": 80,
                "currency": "$",
                "isActive": true
            }]
        }))
        .expect("record")
    }

    #[test]
    fn null_site_config_synthesizes_menu_from_services() {
        let cfg = build_site_config(&record(None));
        assert_eq!(cfg.branding.name, "Bistro Test");
        assert_eq!(cfg.menu.items.len(), 1);
        let item = &cfg.menu.items[0];
        assert_eq!(item.name, "Dinner Tasting");
        assert_eq!(item.category, "Servicio");
        assert_eq!(item.price, "$80");
    }

    #[test]
    fn inactive_offerings_never_surface() {
        let mut rec = record(None);
        rec.services[0].is_active = Some(false);
        let cfg = build_site_config(&rec);
        assert!(cfg.menu.items.is_empty());
    }

    #[test]
    fn offering_without_active_flag_is_excluded() {
        let mut rec = record(None);
        rec.services[0].is_active = None;
        let cfg = build_site_config(&rec);
        assert!(cfg.menu.items.is_empty());
    }

    #[test]
    fn document_menu_kept_when_record_has_no_services() {
        let mut doc = fallback::fallback_config();
        doc.menu.items.push(MenuItem {
            id: "doc-item".into(),
            name: "Tarta de la casa".into(),
            category: "Postre".into(),
            description: "".into(),
            price: "$12".into(),
        });
        let mut rec = record(Some(serde_json::to_value(&doc).unwrap()));
        rec.services.clear();
        let cfg = build_site_config(&rec);
        assert_eq!(cfg.menu.items.len(), 1);
        assert_eq!(cfg.menu.items[0].id, "doc-item");
    }

    #[test]
    fn document_menu_replaced_when_record_has_services() {
        let doc = fallback::fallback_config();
        let rec = record(Some(serde_json::to_value(&doc).unwrap()));
        let cfg = build_site_config(&rec);
        assert_eq!(cfg.menu.items.len(), 1);
        assert_eq!(cfg.menu.items[0].id, "svc-1");
    }

    #[test]
    fn record_name_overrides_document_branding() {
        let mut doc = fallback::fallback_config();
        doc.branding.name = "Stale Name".into();
        let rec = record(Some(serde_json::to_value(&doc).unwrap()));
        let cfg = build_site_config(&rec);
        assert_eq!(cfg.branding.name, "Bistro Test");
        // description absent on the record, document value survives
        assert_eq!(cfg.branding.description, doc.branding.description);
    }

    #[test]
    fn malformed_document_falls_back_to_synthesis() {
        let rec = record(Some(json!({"branding": {"name": "only-a-fragment"}})));
        let cfg = build_site_config(&rec);
        assert_eq!(cfg.branding.name, "Bistro Test");
        assert_eq!(cfg.hero.subtitle, "Servicio Profesional");
    }

    #[test]
    fn media_list_becomes_gallery() {
        let mut rec = record(None);
        rec.images = vec![serde_json::from_value(json!({
            "id": "img-1",
            "url": "https://cdn.example.com/1.jpg",
            "key": "terraza"
        }))
        .unwrap()];
        let cfg = build_site_config(&rec);
        assert_eq!(cfg.gallery.images.len(), 1);
        assert_eq!(cfg.gallery.images[0].id, "https://cdn.example.com/1.jpg");
        assert_eq!(cfg.gallery.images[0].alt, "terraza");
    }

    fn resolver_for(server: &MockServer, ttl_secs: u64) -> ConfigResolver {
        let client = UpstreamClient::new(
            &server.url("/graphql"),
            "prov-1",
            Duration::from_secs(2),
        )
        .expect("client");
        ConfigResolver::new(Some(Arc::new(client)), Duration::from_secs(ttl_secs))
    }

    #[tokio::test]
    async fn unconfigured_resolver_serves_fallback_without_network() {
        let resolver = ConfigResolver::new(None, Duration::from_secs(3600));
        let cfg = resolver.resolve().await;
        assert_eq!(*cfg, fallback::fallback_config());
    }

    #[tokio::test]
    async fn http_error_degrades_to_fallback() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(500);
            })
            .await;
        let cfg = resolver_for(&server, 3600).resolve().await;
        mock.assert_async().await;
        assert_eq!(cfg.branding.name, "Proveedor de Servicios");
    }

    #[tokio::test]
    async fn graphql_errors_payload_degrades_to_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .json_body(json!({"data": null, "errors": [{"message": "boom"}]}));
            })
            .await;
        let cfg = resolver_for(&server, 3600).resolve().await;
        assert_eq!(*cfg, fallback::fallback_config());
    }

    #[tokio::test]
    async fn missing_provider_degrades_to_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({"data": {"serviceProvider": null}}));
            })
            .await;
        let cfg = resolver_for(&server, 3600).resolve().await;
        assert_eq!(*cfg, fallback::fallback_config());
    }

    #[tokio::test]
    async fn resolved_config_is_cached_within_ttl() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({"data": {"serviceProvider": {
                    "id": "prov-1",
                    "businessName": "Bistro Test",
                    "siteConfig": null,
                    "images": [],
                    "services": []
                }}}));
            })
            .await;
        let resolver = resolver_for(&server, 3600);
        let first = resolver.resolve().await;
        let second = resolver.resolve().await;
        assert_eq!(first.branding.name, "Bistro Test");
        assert_eq!(first, second);
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(502);
            })
            .await;
        let resolver = resolver_for(&server, 3600);
        let _ = resolver.resolve().await;
        let _ = resolver.resolve().await;
        mock.assert_hits_async(2).await;
    }
}
