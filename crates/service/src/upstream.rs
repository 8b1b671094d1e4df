//! Thin GraphQL client for the booking backend. One query per call, no
//! retries; callers decide whether a failure is recoverable.

use std::time::Duration;

use models::provider::{ServiceOffering, ServiceProviderRecord};
use models::reservation::{CreateAppointmentInput, Reservation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ServiceError;

const PROVIDER_QUERY: &str = r#"
query GetServiceProviderConfig($serviceProviderId: String!) {
  serviceProvider(id: $serviceProviderId) {
    id
    businessName
    type
    phone
    email
    description
    location
    address
    whatsappNumber
    coverImage
    slug
    siteConfig
    images { id url key createdAt }
    services {
      id
      serviceProviderId
      name
      description
      durationMinutes
      priceAmount
      currency
      allowsOnlinePayment
      isActive
      createdAt
      updatedAt
    }
    isActive
    createdAt
    updatedAt
  }
}
"#;

const SERVICES_QUERY: &str = r#"
query GetServicesByProvider($serviceProviderId: String!) {
  servicesByProvider(serviceProviderId: $serviceProviderId) {
    id
    name
    description
    durationMinutes
    priceAmount
    currency
    allowsOnlinePayment
    isActive
    createdAt
  }
}
"#;

const CREATE_RESERVATION_MUTATION: &str = r#"
mutation CreateAppointment($data: CreateAppointmentInput!) {
  createAppointment(data: $data) {
    id
    serviceProviderId
    serviceId
    customerName
    customerEmail
    customerPhone
    startDatetime
    endDatetime
    status
    paymentStatus
    createdAt
  }
}
"#;

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    #[serde(default = "Option::default")]
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQlError {
    message: String,
}

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
    provider_id: String,
}

impl UpstreamClient {
    pub fn new(endpoint: &str, provider_id: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            provider_id: provider_id.to_string(),
        })
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// POST one GraphQL operation and unwrap the response envelope. A
    /// non-success status, an `errors` payload, or missing `data` all count
    /// as upstream failures.
    async fn post<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T, ServiceError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Upstream(format!("http status {}", status)));
        }

        let envelope: GraphQlResponse<T> = resp
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ServiceError::Upstream(joined));
        }

        envelope
            .data
            .ok_or_else(|| ServiceError::Upstream("empty data payload".into()))
    }

    pub async fn fetch_provider(&self) -> Result<ServiceProviderRecord, ServiceError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Vars<'a> {
            service_provider_id: &'a str,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            service_provider: Option<ServiceProviderRecord>,
        }

        debug!(provider_id = %self.provider_id, "fetching service provider record");
        let data: Data = self
            .post(PROVIDER_QUERY, Vars { service_provider_id: &self.provider_id })
            .await?;
        data.service_provider
            .ok_or_else(|| ServiceError::not_found("service provider"))
    }

    pub async fn fetch_services(&self) -> Result<Vec<ServiceOffering>, ServiceError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Vars<'a> {
            service_provider_id: &'a str,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            #[serde(default)]
            services_by_provider: Vec<ServiceOffering>,
        }

        debug!(provider_id = %self.provider_id, "fetching services by provider");
        let data: Data = self
            .post(SERVICES_QUERY, Vars { service_provider_id: &self.provider_id })
            .await?;
        Ok(data.services_by_provider)
    }

    pub async fn create_reservation(
        &self,
        input: &CreateAppointmentInput,
    ) -> Result<Reservation, ServiceError> {
        #[derive(Serialize)]
        struct Vars<'a> {
            data: &'a CreateAppointmentInput,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            create_appointment: Option<Reservation>,
        }

        debug!(provider_id = %self.provider_id, service_id = %input.service_id, "creating appointment");
        let data: Data = self
            .post(CREATE_RESERVATION_MUTATION, Vars { data: input })
            .await?;
        data.create_appointment
            .ok_or_else(|| ServiceError::Upstream("mutation returned no appointment".into()))
    }
}
