use axum::extract::State;
use axum::Json;
use models::provider::ServiceOffering;
use models::reservation::ReservationInput;

use super::AppState;
use crate::errors::ApiError;

/// Active offerings for the booking form's selector. 502 when the upstream
/// is unreachable or unconfigured; the form shows its error placeholder.
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceOffering>>, ApiError> {
    let services = state.reservations.list_services().await?;
    Ok(Json(services))
}

/// Validate and forward one reservation. 400 with per-field messages on
/// validation failure (no upstream call), 502 on mutation failure; the
/// client keeps its form state and may retry.
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(input): Json<ReservationInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reservation = state.reservations.submit(&input).await?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "reservation": reservation,
    })))
}
