use crate::core::forms::FieldError;
use crate::errors::AppError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateRegistration(_)
            | AppError::RegistrationClosed(_)
            | AppError::FeedbackNotOpen(_) => StatusCode::CONFLICT,
            AppError::Unauthorized | AppError::PortalLocked => StatusCode::UNAUTHORIZED,
            AppError::MalformedPayload(_)
            | AppError::Json(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidSession(_)
            | AppError::InvalidEventType(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidConductor(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {self}");
            ErrorBody {
                error: "Internal server error".to_string(),
                fields: Vec::new(),
            }
        } else {
            let fields = match &self {
                AppError::Validation(fields) => fields.clone(),
                _ => Vec::new(),
            };
            ErrorBody {
                error: self.to_string(),
                fields,
            }
        };

        (status, Json(body)).into_response()
    }
}
