/// Errors surfaced by the scan use case.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan.empty_image")]
    EmptyImage,
    #[error("scan.missing_store_context")]
    MissingStoreContext,
    #[error("scan.processing_failed")]
    ProcessingFailed,
}

/// Failures of the OCR engine lifecycle. Any of these aborts the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecognitionError {
    #[error("recognition.engine_init_failed")]
    EngineInit(String),
    #[error("recognition.configure_failed")]
    Configure(String),
    #[error("recognition.invalid_image")]
    InvalidImage,
    #[error("recognition.recognize_failed")]
    Recognize(String),
}

/// Temporary scan storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage.save_failed")]
    Save(#[source] std::io::Error),
    #[error("storage.delete_failed")]
    Delete(#[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog.invalid_format")]
    InvalidFormat(#[from] serde_json::Error),
    #[error("catalog.empty_retailer_name")]
    EmptyRetailerName,
    #[error("catalog.duplicated_retailer")]
    DuplicatedRetailer(String),
}
