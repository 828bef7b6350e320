use std::env;

use business::application::scan::reconcile::DEFAULT_MAX_CONCURRENCY;

/// OCR pipeline configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language model
    pub language: String,
    /// Directory holding the tessdata files, system default when unset
    pub tessdata_path: Option<String>,
    /// Where uploads are kept while they are processed
    pub upload_dir: String,
    /// Readings reconciled at once per scan
    pub max_concurrency: usize,
}

impl OcrConfig {
    /// Load OCR configuration from environment variables
    ///
    /// Environment variables:
    /// - OCR_LANGUAGE: Tesseract language (default: "spa")
    /// - TESSDATA_PATH: tessdata directory (optional)
    /// - SCAN_UPLOAD_DIR: temporary upload directory (default: "./static/ocr-images")
    /// - RECONCILE_MAX_CONCURRENCY: concurrent reconciliations (default: 4, minimum 1)
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("OCR_LANGUAGE").ok(),
            env::var("TESSDATA_PATH").ok(),
            env::var("SCAN_UPLOAD_DIR").ok(),
            env::var("RECONCILE_MAX_CONCURRENCY").ok(),
        )
    }

    fn from_values(
        language: Option<String>,
        tessdata_path: Option<String>,
        upload_dir: Option<String>,
        max_concurrency: Option<String>,
    ) -> Self {
        Self {
            language: language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "spa".to_string()),
            tessdata_path: tessdata_path.filter(|p| !p.trim().is_empty()),
            upload_dir: upload_dir
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "./static/ocr-images".to_string()),
            max_concurrency: max_concurrency
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_CONCURRENCY)
                .max(1),
        }
    }
}
