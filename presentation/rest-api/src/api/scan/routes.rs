use std::sync::Arc;

use poem::http::StatusCode;
use poem_openapi::{OpenApi, payload::Json};

use business::domain::logger::Logger;
use business::domain::scan::use_cases::process_scan::{ProcessScanParams, ProcessScanUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};
use crate::api::scan::dto::{ScanResultResponse, ScanUploadRequest};
use crate::api::tags::ApiTags;

pub struct ScanApi {
    process_scan_use_case: Arc<dyn ProcessScanUseCase>,
    logger: Arc<dyn Logger>,
}

impl ScanApi {
    pub fn new(process_scan_use_case: Arc<dyn ProcessScanUseCase>, logger: Arc<dyn Logger>) -> Self {
        Self {
            process_scan_use_case,
            logger,
        }
    }
}

/// Price tag OCR API
#[OpenApi]
impl ScanApi {
    /// Process a price tag or receipt photo
    ///
    /// Recognizes code/price pairs, guesses the retailer, and refreshes the
    /// stored prices of the given store context. The uploaded image is not kept.
    #[oai(path = "/files/uploadOcrImage", method = "post", tag = "ApiTags::Scans")]
    async fn process_scan(&self, form: ScanUploadRequest) -> ProcessScanResponse {
        let (image, file_name) = match form.file {
            Some(upload) => {
                let file_name = upload.file_name().map(str::to_string);
                match upload.into_vec().await {
                    Ok(bytes) => (bytes, file_name),
                    Err(e) => {
                        self.logger
                            .error(&format!("Error reading uploaded scan: {}", e));
                        let (_, json) = error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "InternalError",
                            "scan.upload_unreadable",
                        );
                        return ProcessScanResponse::InternalError(json);
                    }
                }
            }
            None => (Vec::new(), None),
        };

        let params = ProcessScanParams {
            image,
            store_context_id: form.comcity.unwrap_or_default(),
            file_name,
        };

        match self.process_scan_use_case.execute(params).await {
            Ok(result) => ProcessScanResponse::Ok(Json(result.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status {
                    StatusCode::BAD_REQUEST => ProcessScanResponse::BadRequest(json),
                    StatusCode::UNPROCESSABLE_ENTITY => {
                        ProcessScanResponse::UnprocessableEntity(json)
                    }
                    _ => ProcessScanResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ProcessScanResponse {
    #[oai(status = 200)]
    Ok(Json<ScanResultResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::domain::scan::errors::ScanError;
    use business::domain::scan::model::{
        PipelineResult, ReconciliationOutcome, ReconciliationReport, RetailerGuess,
        ValidatedReading,
    };
    use mockall::mock;
    use poem::test::{TestClient, TestForm, TestFormField};
    use poem_openapi::OpenApiService;
    use serde_json::json;

    mock! {
        pub ProcessScan {}

        #[async_trait]
        impl ProcessScanUseCase for ProcessScan {
            async fn execute(&self, params: ProcessScanParams) -> Result<PipelineResult, ScanError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn client(use_case: MockProcessScan) -> TestClient<OpenApiService<ScanApi, ()>> {
        let api = ScanApi::new(Arc::new(use_case), mock_logger());
        TestClient::new(OpenApiService::new(api, "Price Scan API", "test"))
    }

    fn upload(comcity: &str) -> TestForm {
        TestForm::new()
            .field(
                TestFormField::bytes(vec![0xFF, 0xD8, 0xFF])
                    .name("file")
                    .filename("ticket.jpg")
                    .content_type("image/jpeg"),
            )
            .text("comcity", comcity)
    }

    #[tokio::test]
    async fn should_return_scan_result() {
        let mut use_case = MockProcessScan::new();
        use_case
            .expect_execute()
            .withf(|params: &ProcessScanParams| {
                params.image == vec![0xFF, 0xD8, 0xFF]
                    && params.store_context_id == "comcity-1"
                    && params.file_name.as_deref() == Some("ticket.jpg")
            })
            .times(1)
            .returning(|_| {
                Ok(PipelineResult {
                    retailer_guess: RetailerGuess::Known("Jumbo".to_string()),
                    readings: vec![ValidatedReading {
                        code: "7891910000197".to_string(),
                        normalized_price: 4990,
                    }],
                    recognized_text: "7891910000197 4990".to_string(),
                    reconciliation: vec![ReconciliationReport {
                        code: "7891910000197".to_string(),
                        outcome: ReconciliationOutcome::SkippedNoExistingRecord,
                    }],
                })
            });

        let response = client(use_case)
            .post("/files/uploadOcrImage")
            .multipart(upload("comcity-1"))
            .send()
            .await;

        response.assert_status_is_ok();
        response
            .assert_json(json!({
                "retailer": "Jumbo",
                "readings": [{ "code": "7891910000197", "price": 4990 }],
                "text": "7891910000197 4990",
                "reconciliation": [
                    { "code": "7891910000197", "outcome": "skipped_no_existing_record" }
                ]
            }))
            .await;
    }

    #[tokio::test]
    async fn should_return_bad_request_without_store_context() {
        let mut use_case = MockProcessScan::new();
        use_case
            .expect_execute()
            .returning(|_| Err(ScanError::MissingStoreContext));

        let response = client(use_case)
            .post("/files/uploadOcrImage")
            .multipart(upload(""))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response
            .assert_json(json!({
                "name": "ValidationError",
                "message": "scan.missing_store_context"
            }))
            .await;
    }

    #[tokio::test]
    async fn should_pass_empty_image_when_file_is_missing() {
        let mut use_case = MockProcessScan::new();
        use_case
            .expect_execute()
            .withf(|params: &ProcessScanParams| params.image.is_empty())
            .returning(|_| Err(ScanError::EmptyImage));

        let response = client(use_case)
            .post("/files/uploadOcrImage")
            .multipart(TestForm::new().text("comcity", "comcity-1"))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_unprocessable_entity_when_processing_fails() {
        let mut use_case = MockProcessScan::new();
        use_case
            .expect_execute()
            .returning(|_| Err(ScanError::ProcessingFailed));

        let response = client(use_case)
            .post("/files/uploadOcrImage")
            .multipart(upload("comcity-1"))
            .send()
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        response
            .assert_json(json!({
                "name": "ProcessingError",
                "message": "scan.processing_failed"
            }))
            .await;
    }
}
