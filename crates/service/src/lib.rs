//! Service layer between the upstream booking backend and the HTTP surface.
//! - `resolver` turns a provider record into an always-complete site config.
//! - `reservation` validates and forwards reservation requests.
//! - `seo` derives structured data, sitemap and social-preview artifacts.

pub mod errors;
pub mod fallback;
pub mod reservation;
pub mod resolver;
pub mod seo;
pub mod upstream;
