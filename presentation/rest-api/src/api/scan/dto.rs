use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};

use business::domain::scan::model::{
    PipelineResult, ReconciliationOutcome, ReconciliationReport, ValidatedReading,
};

/// Multipart upload of a price tag or receipt photo.
#[derive(Debug, Multipart)]
pub struct ScanUploadRequest {
    /// Image file (JPEG, PNG, ...)
    pub file: Option<Upload>,
    /// Store context (company in city) the photo was taken at
    pub comcity: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct ReadingResponse {
    /// Product code printed next to the price
    pub code: String,
    /// Normalized whole-number price
    pub price: u32,
}

impl From<ValidatedReading> for ReadingResponse {
    fn from(reading: ValidatedReading) -> Self {
        Self {
            code: reading.code,
            price: reading.normalized_price,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ReconciliationResponse {
    /// Product code of the reading
    pub code: String,
    /// One of `updated`, `skipped_no_existing_record`, `failed`
    pub outcome: String,
    /// Failure reason, only present for `failed`
    #[oai(skip_serializing_if_is_none)]
    pub reason: Option<String>,
}

impl From<ReconciliationReport> for ReconciliationResponse {
    fn from(report: ReconciliationReport) -> Self {
        let outcome = report.outcome.to_string();
        let reason = match report.outcome {
            ReconciliationOutcome::Failed(reason) => Some(reason),
            _ => None,
        };
        Self {
            code: report.code,
            outcome,
            reason,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ScanResultResponse {
    /// Retailer the codes belong to, or "Unknown"
    pub retailer: String,
    /// Readings that passed validation
    pub readings: Vec<ReadingResponse>,
    /// Raw recognized text
    pub text: String,
    /// What happened to each reading's stored price
    pub reconciliation: Vec<ReconciliationResponse>,
}

impl From<PipelineResult> for ScanResultResponse {
    fn from(result: PipelineResult) -> Self {
        Self {
            retailer: result.retailer_guess.to_string(),
            readings: result.readings.into_iter().map(Into::into).collect(),
            text: result.recognized_text,
            reconciliation: result.reconciliation.into_iter().map(Into::into).collect(),
        }
    }
}
