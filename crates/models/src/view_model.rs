//! The render-ready site configuration tree. One instance is produced per
//! resolve and treated as read-only afterwards.
//!
//! Decoding is strict on purpose: a `siteConfig` document missing whole
//! sections fails to decode and the resolver synthesizes a complete document
//! from the provider record instead, so consumers never see a partially
//! populated section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub branding: Branding,
    pub theme: Theme,
    pub hero: Hero,
    pub about: About,
    pub menu: Menu,
    pub gallery: Gallery,
    pub testimonials: Testimonials,
    pub contact: Contact,
    pub navigation: Navigation,
    pub footer: Footer,
    pub reservation_form: ReservationForm,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub logo: Logo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub primary_dark: String,
    pub primary_light: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub background_image: ImageRef,
    pub buttons: Vec<HeroButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroButton {
    pub text: String,
    pub action: String,
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    pub title: String,
    pub subtitle: String,
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonials {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub address: Address,
    pub phone: String,
    pub email: String,
    pub hours: Hours,
    pub social: Social,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hours {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub items: Vec<NavItem>,
    pub reserve_button_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub about_text: String,
    pub copyright_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    pub title: String,
    pub fields: Vec<String>,
    pub submit_button: String,
    pub submitting_button: String,
    pub success_message: String,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_keys() {
        let nav = Navigation {
            items: vec![NavItem { text: "Inicio".into(), link: "#hero".into() }],
            reserve_button_text: "Reservar".into(),
        };
        let json = serde_json::to_value(&nav).expect("serialize");
        assert!(json.get("reserveButtonText").is_some());
        assert!(json.get("reserve_button_text").is_none());
    }

    #[test]
    fn partial_document_fails_decode() {
        // Missing sections must not silently decode into a half-empty tree.
        let doc = serde_json::json!({
            "branding": {
                "name": "X", "tagline": "Y", "description": "Z",
                "logo": {"url": "https://example.com/l.png", "alt": "logo"}
            }
        });
        assert!(serde_json::from_value::<SiteConfig>(doc).is_err());
    }
}
