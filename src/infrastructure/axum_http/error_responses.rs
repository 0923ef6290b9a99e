use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::usecases::{plans::PlanError, subscriptions::SubscriptionError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    fn render(status: StatusCode, message: String, errors: Option<Vec<String>>) -> Response {
        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
            errors,
        });
        (status, body).into_response()
    }
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            PlanError::Validation(errors) => {
                ErrorResponse::render(status, "plan validation failed".to_string(), Some(errors))
            }
            PlanError::Internal(_) => {
                // Don't leak internal error detail to clients.
                ErrorResponse::render(status, "Internal server error".to_string(), None)
            }
            other => ErrorResponse::render(status, other.to_string(), None),
        }
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            SubscriptionError::Internal(_) => {
                ErrorResponse::render(status, "Internal server error".to_string(), None)
            }
            other => ErrorResponse::render(status, other.to_string(), None),
        }
    }
}
