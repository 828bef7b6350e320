use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::scan::catalog::RetailerCatalog;
use crate::domain::scan::errors::ScanError;
use crate::domain::scan::extractor;
use crate::domain::scan::model::{PipelineResult, RawScan, RecognizedText};
use crate::domain::scan::recognizer::TextRecognizer;
use crate::domain::scan::resolver;
use crate::domain::scan::services::{ImagePreprocessor, ScanStorage};
use crate::domain::scan::use_cases::process_scan::{ProcessScanParams, ProcessScanUseCase};
use crate::domain::scan::use_cases::reconcile::{
    ReconcileReadingsParams, ReconcileReadingsUseCase,
};
use crate::domain::scan::validator;
use crate::domain::shared::value_objects::StoreContextId;

#[derive(Clone)]
pub struct ProcessScanUseCaseImpl {
    pub storage: Arc<dyn ScanStorage>,
    pub preprocessor: Arc<dyn ImagePreprocessor>,
    pub recognizer: Arc<TextRecognizer>,
    pub catalog: Arc<RetailerCatalog>,
    pub reconciler: Arc<dyn ReconcileReadingsUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ProcessScanUseCase for ProcessScanUseCaseImpl {
    async fn execute(&self, params: ProcessScanParams) -> Result<PipelineResult, ScanError> {
        if params.image.is_empty() {
            return Err(ScanError::EmptyImage);
        }
        let store_context_id =
            StoreContextId::parse(params.store_context_id).ok_or(ScanError::MissingStoreContext)?;

        self.logger.info(&format!(
            "Processing scan of {} bytes for store context {}",
            params.image.len(),
            store_context_id
        ));

        let scan = RawScan {
            bytes: params.image,
            store_context_id,
            extension: params
                .file_name
                .as_deref()
                .and_then(|name| name.rsplit_once('.'))
                .map(|(_, ext)| ext.to_ascii_lowercase()),
        };

        // Detached so that a dropped request still cleans up the stored scan.
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.run(scan).await })
            .await
            .map_err(|e| {
                self.logger
                    .error(&format!("Scan pipeline task aborted: {}", e));
                ScanError::ProcessingFailed
            })?
    }
}

impl ProcessScanUseCaseImpl {
    /// Stores the scan, runs the pipeline, then deletes the stored copy
    /// exactly once regardless of the outcome.
    async fn run(&self, scan: RawScan) -> Result<PipelineResult, ScanError> {
        let location = self.storage.save(&scan).await.map_err(|e| {
            self.logger
                .error(&format!("Failed to store scan: {}", e));
            ScanError::ProcessingFailed
        })?;
        self.logger.debug(&format!("Scan stored at {}", location));

        let result = self.process(scan).await;

        match self.storage.delete(&location).await {
            Ok(()) => self.logger.debug(&format!("Scan {} deleted", location)),
            Err(e) => self
                .logger
                .warn(&format!("Error deleting scan {}: {}", location, e)),
        }

        result
    }

    async fn process(&self, scan: RawScan) -> Result<PipelineResult, ScanError> {
        let RawScan {
            bytes,
            store_context_id,
            ..
        } = scan;

        let preprocessor = self.preprocessor.clone();
        let recognizer = self.recognizer.clone();
        let raw_text = tokio::task::spawn_blocking(move || {
            let image = preprocessor.normalize(&bytes);
            recognizer.recognize(&image)
        })
        .await
        .map_err(|e| {
            self.logger
                .error(&format!("Recognition task aborted: {}", e));
            ScanError::ProcessingFailed
        })?
        .map_err(|e| {
            self.logger.error(&format!("Error recognizing scan: {}", e));
            ScanError::ProcessingFailed
        })?;

        let text = RecognizedText::from_raw(raw_text);
        let candidates = extractor::extract(&text);
        let readings = validator::validate_all(&candidates, &self.catalog);
        let retailer_guess = resolver::resolve(&readings, &self.catalog);

        self.logger.info(&format!(
            "Scan recognized: {} lines, {} candidates, {} valid readings, retailer {}",
            text.lines().len(),
            candidates.len(),
            readings.len(),
            retailer_guess
        ));

        let reconciliation = if readings.is_empty() {
            Vec::new()
        } else {
            self.reconciler
                .execute(ReconcileReadingsParams {
                    store_context_id,
                    readings: readings.clone(),
                })
                .await
        };

        Ok(PipelineResult {
            retailer_guess,
            readings,
            recognized_text: text.into_raw(),
            reconciliation,
        })
    }
}
