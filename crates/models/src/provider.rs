//! Upstream shapes as returned by the `serviceProvider` and
//! `servicesByProvider` GraphQL queries. Everything except `id` is treated as
//! optional on decode; the resolver supplies defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderRecord {
    pub id: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(rename = "type", default)]
    pub provider_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Opaque site configuration document; decoded lazily by the resolver.
    #[serde(default)]
    pub site_config: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Vec<MediaRef>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: String,
    #[serde(default)]
    pub service_provider_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub price_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub allows_online_payment: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ServiceOffering {
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }

    /// `"$80"` style price tag, `"Consultar"` when no amount is set.
    pub fn price_label(&self) -> String {
        match self.price_amount {
            Some(amount) => {
                let symbol = self
                    .currency
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or("$");
                if amount.fract() == 0.0 {
                    format!("{symbol}{}", amount as i64)
                } else {
                    format!("{symbol}{amount}")
                }
            }
            None => "Consultar".to_string(),
        }
    }
}
