use async_trait::async_trait;

use super::errors::{RecognitionError, StorageError};
use super::model::{ImageDataUri, RawScan};

/// Service port for turning uploaded bytes into an OCR-ready image.
///
/// Implementations must not fail: any step that cannot be applied is skipped
/// and the input passes through unchanged.
pub trait ImagePreprocessor: Send + Sync {
    fn normalize(&self, bytes: &[u8]) -> ImageDataUri;
}

/// One OCR engine instance. Lives for exactly one recognition.
pub trait OcrEngine {
    /// Restricts the symbols the engine may emit.
    fn configure(&mut self, whitelist: &str) -> Result<(), RecognitionError>;
    fn recognize(&mut self, image: &ImageDataUri) -> Result<String, RecognitionError>;
    /// Frees native resources. Called once, on every exit path.
    fn release(&mut self);
}

/// Creates engine instances for a recognition language.
pub trait OcrEngineFactory: Send + Sync {
    fn create(&self, language: &str) -> Result<Box<dyn OcrEngine>, RecognitionError>;
}

/// Where a stored scan lives until it is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLocation(String);

impl ScanLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScanLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Service port for the temporary copy of an uploaded scan.
#[async_trait]
pub trait ScanStorage: Send + Sync {
    async fn save(&self, scan: &RawScan) -> Result<ScanLocation, StorageError>;
    async fn delete(&self, location: &ScanLocation) -> Result<(), StorageError>;
}
