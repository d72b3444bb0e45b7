//! HTTP handlers for API endpoints.

use crate::error::StatusError;
use crate::status::{StatusAggregator, StatusReport, StatusRequest};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

/// A command posted by the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ApiCommand {
    /// Refresh the full status report
    GpioStatus(StatusRequest),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

/// A `StatusError` rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub StatusError);

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StatusError::Config(_) => StatusCode::BAD_REQUEST,
            StatusError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("Request failed: {}", self.0);

        let body = ErrorBody {
            error: self.0.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

/// Dispatch a posted command.
pub async fn api_command(
    State(aggregator): State<StatusAggregator>,
    Json(command): Json<ApiCommand>,
) -> Result<Json<StatusReport>, ApiError> {
    match command {
        ApiCommand::GpioStatus(request) => {
            info!("Refresh request received");
            Ok(Json(aggregator.get_status(request).await?))
        }
    }
}

/// Get the current status report, with `?hw=` and `?funcs=` filters.
pub async fn get_status(
    State(aggregator): State<StatusAggregator>,
    Query(request): Query<StatusRequest>,
) -> Result<Json<StatusReport>, ApiError> {
    Ok(Json(aggregator.get_status(request).await?))
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "gpio-status",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let command: ApiCommand = serde_json::from_str(r#"{"command": "gpio_status", "hw": false}"#).unwrap();
        let ApiCommand::GpioStatus(request) = command;
        assert!(!request.hw);
        assert!(request.funcs);

        assert!(serde_json::from_str::<ApiCommand>(r#"{"command": "reboot"}"#).is_err());
    }

    #[test]
    fn test_error_status_codes() {
        let response = ApiError(StatusError::mismatch_error("GPIO3")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError(StatusError::config_error("bad")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
