//! Errors surfaced by the auxiliary endpoints
//!
//! The skill endpoint never uses these: it always answers with an envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::relay::DeliveryError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to send test event to the workflow")]
    EventDeliveryFailed,

    #[error("Workflow returned no response: {0}")]
    WorkflowUnavailable(#[from] DeliveryError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Auxiliary endpoint failed");
        (
            self.status_code(),
            Json(json!({
                "status": "error",
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::EventDeliveryFailed.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Failed to send test event to the workflow");
    }

    #[test]
    fn test_delivery_failure_is_server_error() {
        let err = AppError::from(DeliveryError::Status {
            url: "https://hooks.example.com".to_string(),
            status: 502,
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Workflow returned no response: "));
    }
}
