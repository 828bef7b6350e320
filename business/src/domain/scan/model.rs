use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::errors::RecognitionError;
use crate::domain::shared::value_objects::StoreContextId;

/// Lower bound (inclusive) of a plausible shelf price.
pub const MIN_PRICE: u32 = 100;
/// Upper bound (exclusive) of a plausible shelf price.
pub const MAX_PRICE: u32 = 50_000;

/// Sentinel reported when no retailer could be attributed.
pub const UNKNOWN_RETAILER: &str = "Unknown";

const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Uploaded image bytes plus the store context they were photographed in.
#[derive(Debug, Clone)]
pub struct RawScan {
    pub bytes: Vec<u8>,
    pub store_context_id: StoreContextId,
    /// Extension of the uploaded file name, if the client sent one.
    pub extension: Option<String>,
}

/// Base64 data URI handed from the preprocessor to the OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDataUri(String);

impl ImageDataUri {
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{}", JPEG_DATA_URI_PREFIX, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the payload back into raw image bytes.
    /// Accepts both a full data URI and a bare base64 payload.
    pub fn decode(&self) -> Result<Vec<u8>, RecognitionError> {
        let payload = self
            .0
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(&self.0);
        let clean: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD
            .decode(clean)
            .map_err(|_| RecognitionError::InvalidImage)
    }
}

impl From<String> for ImageDataUri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// OCR output split into trimmed, non-empty lines. The raw text is kept
/// verbatim for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText {
    raw: String,
    lines: Vec<String>,
}

impl RecognizedText {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lines = raw
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { raw, lines }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}

/// Syntactic (code, price) pair lifted from one line of recognized text.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReading {
    pub code: String,
    pub raw_price: String,
}

/// A candidate whose code is catalog-known and whose price was normalized
/// into `[MIN_PRICE, MAX_PRICE)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReading {
    pub code: String,
    pub normalized_price: u32,
}

/// Result of reconciling one validated reading against the price store.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciliationOutcome {
    Updated,
    SkippedNoExistingRecord,
    Failed(String),
}

impl std::fmt::Display for ReconciliationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconciliationOutcome::Updated => write!(f, "updated"),
            ReconciliationOutcome::SkippedNoExistingRecord => {
                write!(f, "skipped_no_existing_record")
            }
            ReconciliationOutcome::Failed(_) => write!(f, "failed"),
        }
    }
}

/// Outcome paired with the reading it belongs to. Reports come back in no
/// particular order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationReport {
    pub code: String,
    pub outcome: ReconciliationOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetailerGuess {
    Known(String),
    Unknown,
}

impl std::fmt::Display for RetailerGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetailerGuess::Known(name) => write!(f, "{}", name),
            RetailerGuess::Unknown => write!(f, "{}", UNKNOWN_RETAILER),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub retailer_guess: RetailerGuess,
    pub readings: Vec<ValidatedReading>,
    pub recognized_text: String,
    pub reconciliation: Vec<ReconciliationReport>,
}
