use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::scan::errors::ScanError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};

impl IntoErrorResponse for ScanError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            ScanError::EmptyImage => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "scan.empty_image",
            ),
            ScanError::MissingStoreContext => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "scan.missing_store_context",
            ),
            ScanError::ProcessingFailed => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "ProcessingError",
                "scan.processing_failed",
            ),
        }
    }
}
