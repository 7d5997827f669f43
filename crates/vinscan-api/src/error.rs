//! Mapping domain errors onto HTTP error responses

use axum::{http::StatusCode, response::Json};
use tracing::{error, warn};
use vinscan_core::types::ErrorResponse;
use vinscan_forms::FormError;
use vinscan_forms::scanner::DECODE_OPERATION;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Handler result carrying a JSON body
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Build an error response
pub fn api_error(status: StatusCode, message: impl Into<String>, code: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message, code)))
}

/// 400 for a query parameter that does not parse, 500 for anything else
pub fn core_error(err: &vinscan_core::Error) -> ApiError {
    match err {
        vinscan_core::Error::InvalidQuery { parameter, value } => {
            warn!(parameter = %parameter, value = %value, "Invalid query parameter");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_details(
                    err.to_string(),
                    "INVALID_PARAMETERS",
                    serde_json::json!({ "parameter": parameter, "value": value }),
                )),
            )
        }
        vinscan_core::Error::Export { format, .. } => {
            error!(format = %format, error = %err, "Export failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "EXPORT_FAILED",
            )
        }
        other if other.is_client_error() => {
            api_error(StatusCode::BAD_REQUEST, other.to_string(), "INVALID_PARAMETERS")
        }
        other => {
            error!(error = %other, "Request failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                other.to_string(),
                "INTERNAL_ERROR",
            )
        }
    }
}

/// Status and code for a form or scanner failure
pub fn form_error(err: &FormError) -> ApiError {
    let (status, code) = match err {
        FormError::MissingField { .. } | FormError::InvalidField { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED")
        }
        FormError::InvalidVinLength { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_VIN"),
        FormError::PermissionDenied => (StatusCode::FORBIDDEN, "CAMERA_PERMISSION_DENIED"),
        FormError::DeviceUnavailable { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, "CAMERA_UNAVAILABLE")
        }
        FormError::Delivery { .. } => (StatusCode::BAD_GATEWAY, "SUBMISSION_FAILED"),
        FormError::Decoder { .. } => (StatusCode::BAD_GATEWAY, "DECODE_FAILED"),
        FormError::Timeout { operation, .. } if operation == DECODE_OPERATION => {
            (StatusCode::GATEWAY_TIMEOUT, "DECODE_FAILED")
        }
        FormError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "SUBMISSION_FAILED"),
        FormError::ReadOnly { .. }
        | FormError::AlreadyInFlight { .. }
        | FormError::NotReady { .. } => (StatusCode::CONFLICT, "INVALID_STATE"),
        FormError::Cancelled { .. } | FormError::Task { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    if err.is_user_error() {
        warn!(error = %err, code, "Form rejected");
    } else {
        error!(error = %err, code, "Form operation failed");
    }
    api_error(status, err.to_string(), code)
}
