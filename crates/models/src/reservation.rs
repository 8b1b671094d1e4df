//! Reservation request input, field validation, and the canonical
//! start/end instants sent to the booking backend.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};

/// `datetime-local` inputs arrive without seconds or offset.
const LOCAL_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("phone regex"));

/// User-entered reservation request, prior to validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInput {
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Local wall-clock datetime, `YYYY-MM-DDTHH:MM`.
    pub start_datetime: String,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

impl ReservationInput {
    /// Validate all fields against the form schema. Returns every failed
    /// field so the caller can render errors inline. `now` is the
    /// input-acceptance boundary for the start time; it is not re-checked at
    /// submission.
    pub fn validate_at(&self, now: NaiveDateTime) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.service_id.trim().is_empty() {
            errors.push(FieldError::new("serviceId", "Seleccione un servicio"));
        }
        if self.customer_name.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                "customerName",
                "El nombre debe tener al menos 2 caracteres",
            ));
        }
        if !EMAIL_RE.is_match(self.customer_email.trim()) {
            errors.push(FieldError::new("customerEmail", "Correo electrónico inválido"));
        }
        if !PHONE_RE.is_match(self.customer_phone.trim()) {
            errors.push(FieldError::new("customerPhone", "Teléfono inválido"));
        }
        match parse_local_datetime(&self.start_datetime) {
            Ok(start) if start < now => {
                errors.push(FieldError::new(
                    "startDatetime",
                    "La fecha y hora de inicio no pueden estar en el pasado",
                ));
            }
            Ok(_) => {}
            Err(_) => {
                errors.push(FieldError::new(
                    "startDatetime",
                    "La fecha y hora de inicio son obligatorias",
                ));
            }
        }
        if let Some(end) = &self.end_datetime {
            if !end.trim().is_empty() && parse_local_datetime(end).is_err() {
                errors.push(FieldError::new("endDatetime", "Fecha y hora de fin inválidas"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        self.validate_at(Local::now().naive_local())
    }

    /// Canonical `(start, end)` instants. An end before the start is silently
    /// replaced by the start rather than rejected, mirroring the form's
    /// long-standing behavior.
    pub fn canonical_window(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), ModelError> {
        let start = to_instant(parse_local_datetime(&self.start_datetime)?)?;
        let end = match self.end_datetime.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => {
                let end = to_instant(parse_local_datetime(raw)?)?;
                if end >= start {
                    end
                } else {
                    start
                }
            }
            None => start,
        };
        Ok((start, end))
    }
}

fn parse_local_datetime(raw: &str) -> Result<NaiveDateTime, ModelError> {
    NaiveDateTime::parse_from_str(raw.trim(), LOCAL_DATETIME_FMT)
        .map_err(|e| ModelError::Parse(format!("invalid local datetime {raw:?}: {e}")))
}

/// Resolve a local wall-clock time to a UTC instant. Ambiguous times (DST
/// fold) resolve to the earlier instant; nonexistent times are an error.
fn to_instant(naive: NaiveDateTime) -> Result<DateTime<Utc>, ModelError> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ModelError::Parse(format!("local datetime {naive} does not exist")))
}

/// Format an instant the way the booking backend expects it.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Wire input for the `createAppointment` mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentInput {
    pub service_provider_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub start_datetime: String,
    pub end_datetime: String,
}

/// Created appointment as echoed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(default)]
    pub service_provider_id: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input() -> ReservationInput {
        ReservationInput {
            service_id: "svc-1".into(),
            customer_name: "Juan Pérez".into(),
            customer_email: "juan@example.com".into(),
            customer_phone: "+56 9 1234 5678".into(),
            start_datetime: "2025-06-01T19:30".into(),
            end_datetime: None,
            special_requests: None,
        }
    }

    fn june_first_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate_at(june_first_morning()).is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        let mut i = input();
        i.customer_email = "not-an-email".into();
        let errs = i.validate_at(june_first_morning()).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "customerEmail");
    }

    #[test]
    fn rejects_short_name_and_bad_phone_together() {
        let mut i = input();
        i.customer_name = "J".into();
        i.customer_phone = "call me maybe".into();
        let errs = i.validate_at(june_first_morning()).unwrap_err();
        let fields: Vec<_> = errs.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"customerName"));
        assert!(fields.contains(&"customerPhone"));
    }

    #[test]
    fn rejects_start_in_the_past() {
        let i = input();
        let later = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let errs = i.validate_at(later).unwrap_err();
        assert_eq!(errs[0].field, "startDatetime");
    }

    #[test]
    fn rejects_missing_service() {
        let mut i = input();
        i.service_id = "  ".into();
        let errs = i.validate_at(june_first_morning()).unwrap_err();
        assert_eq!(errs[0].field, "serviceId");
    }

    #[test]
    fn end_before_start_clamps_to_start() {
        let mut i = input();
        i.end_datetime = Some("2025-06-01T18:00".into());
        let (start, end) = i.canonical_window().expect("window");
        assert_eq!(start, end);
    }

    #[test]
    fn end_after_start_is_kept() {
        let mut i = input();
        i.end_datetime = Some("2025-06-01T21:00".into());
        let (start, end) = i.canonical_window().expect("window");
        assert!(end > start);
    }

    #[test]
    fn blank_end_defaults_to_start() {
        let mut i = input();
        i.end_datetime = Some("".into());
        let (start, end) = i.canonical_window().expect("window");
        assert_eq!(start, end);
    }

    #[test]
    fn instant_round_trips_local_wall_clock() {
        let (start, _) = input().canonical_window().expect("window");
        let encoded = format_instant(start);
        let parsed = DateTime::parse_from_rfc3339(&encoded).expect("valid rfc3339");
        let local = parsed.with_timezone(&Local).naive_local();
        assert_eq!(local.format("%Y-%m-%dT%H:%M").to_string(), "2025-06-01T19:30");
    }
}
