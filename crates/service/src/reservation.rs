//! Validates reservation requests and forwards them as a single
//! `createAppointment` mutation. Unlike the resolver, a missing upstream
//! here is an error: there is no meaningful fallback for a booking.

use std::sync::Arc;

use models::provider::ServiceOffering;
use models::reservation::{format_instant, CreateAppointmentInput, Reservation, ReservationInput};
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::upstream::UpstreamClient;

pub struct ReservationService {
    upstream: Option<Arc<UpstreamClient>>,
}

impl ReservationService {
    pub fn new(upstream: Option<Arc<UpstreamClient>>) -> Self {
        Self { upstream }
    }

    fn client(&self) -> Result<&UpstreamClient, ServiceError> {
        self.upstream.as_deref().ok_or(ServiceError::NotConfigured)
    }

    /// Active offerings for the booking form's selector. Independent of the
    /// config resolver; errors surface to the caller.
    pub async fn list_services(&self) -> Result<Vec<ServiceOffering>, ServiceError> {
        let services = self.client()?.fetch_services().await?;
        Ok(services.into_iter().filter(|s| s.is_active()).collect())
    }

    /// Validate, normalize the start/end window, and issue exactly one
    /// mutation. No retry on failure; the caller keeps its state and may
    /// resubmit.
    pub async fn submit(&self, input: &ReservationInput) -> Result<Reservation, ServiceError> {
        if let Err(fields) = input.validate() {
            warn!(failed_fields = fields.len(), "reservation input rejected");
            return Err(ServiceError::Validation(fields));
        }

        let client = self.client()?;
        let (start, end) = input.canonical_window()?;
        let payload = CreateAppointmentInput {
            service_provider_id: client.provider_id().to_string(),
            service_id: input.service_id.clone(),
            customer_name: input.customer_name.trim().to_string(),
            customer_email: input.customer_email.trim().to_string(),
            customer_phone: input.customer_phone.trim().to_string(),
            start_datetime: format_instant(start),
            end_datetime: format_instant(end),
        };

        let reservation = client.create_reservation(&payload).await?;
        info!(reservation_id = %reservation.id, service_id = %payload.service_id, "appointment created");
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration as ChronoDuration, Local};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn service_for(server: &MockServer) -> ReservationService {
        let client = UpstreamClient::new(&server.url("/graphql"), "prov-1", Duration::from_secs(2))
            .expect("client");
        ReservationService::new(Some(Arc::new(client)))
    }

    fn tomorrow_at(hour: u32, minute: u32) -> String {
        let d = Local::now().date_naive() + ChronoDuration::days(1);
        format!("{:04}-{:02}-{:02}T{:02}:{:02}", d.year(), d.month(), d.day(), hour, minute)
    }

    fn valid_input() -> ReservationInput {
        ReservationInput {
            service_id: "svc-1".into(),
            customer_name: "Juan Pérez".into(),
            customer_email: "juan@example.com".into(),
            customer_phone: "+56 9 1234 5678".into(),
            start_datetime: tomorrow_at(19, 30),
            end_datetime: None,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn invalid_email_blocks_before_any_network_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({"data": {}}));
            })
            .await;
        let svc = service_for(&server);
        let mut input = valid_input();
        input.customer_email = "not-an-email".into();

        let err = svc.submit(&input).await.unwrap_err();
        match err {
            ServiceError::Validation(fields) => {
                assert_eq!(fields[0].field, "customerEmail");
            }
            other => panic!("expected validation error, got {other}"),
        }
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn submit_sends_clamped_window_and_returns_echo() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("createAppointment")
                    .body_contains("\"serviceProviderId\":\"prov-1\"");
                then.status(200).json_body(json!({"data": {"createAppointment": {
                    "id": "res-1",
                    "serviceProviderId": "prov-1",
                    "serviceId": "svc-1",
                    "status": "pending",
                    "paymentStatus": "unpaid"
                }}}));
            })
            .await;
        let svc = service_for(&server);
        let mut input = valid_input();
        // end an hour before start: must be clamped, not rejected
        input.end_datetime = Some(tomorrow_at(18, 30));

        let reservation = svc.submit(&input).await.expect("submit");
        assert_eq!(reservation.id, "res-1");
        assert_eq!(reservation.status.as_deref(), Some("pending"));
        mock.assert_async().await;

        let (start, end) = input.canonical_window().expect("window");
        assert_eq!(start, end);
    }

    #[tokio::test]
    async fn upstream_error_payload_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .json_body(json!({"data": null, "errors": [{"message": "slot taken"}]}));
            })
            .await;
        let svc = service_for(&server);
        let err = svc.submit(&valid_input()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(msg) if msg.contains("slot taken")));
    }

    #[tokio::test]
    async fn missing_configuration_is_an_error_not_fallback() {
        let svc = ReservationService::new(None);
        let err = svc.submit(&valid_input()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured));
    }

    #[tokio::test]
    async fn list_services_filters_inactive() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("servicesByProvider");
                then.status(200).json_body(json!({"data": {"servicesByProvider": [
                    {"id": "svc-1", "name": "Dinner Tasting", "isActive": true},
                    {"id": "svc-2", "name": "Retired Menu", "isActive": false}
                ]}}));
            })
            .await;
        let svc = service_for(&server);
        let services = svc.list_services().await.expect("services");
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, "svc-1");
    }
}
