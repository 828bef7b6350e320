use std::sync::Arc;

use super::errors::RecognitionError;
use super::model::ImageDataUri;
use super::services::{OcrEngine, OcrEngineFactory};
use crate::domain::logger::Logger;

/// Price tags and receipts in scope only carry numeric codes and prices.
pub const DIGIT_WHITELIST: &str = "0123456789";

/// Lifecycle of one recognition session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecognizerState {
    Idle,
    Configured,
    Recognizing,
    Released,
}

/// Runs one OCR recognition per call on a fresh engine instance.
///
/// The engine is released before `recognize` returns, whether it succeeded,
/// failed, or unwound.
pub struct TextRecognizer {
    factory: Arc<dyn OcrEngineFactory>,
    language: String,
    logger: Arc<dyn Logger>,
}

impl TextRecognizer {
    pub fn new(
        factory: Arc<dyn OcrEngineFactory>,
        language: impl Into<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            factory,
            language: language.into(),
            logger,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Blocking: call from a blocking-friendly context.
    pub fn recognize(&self, image: &ImageDataUri) -> Result<String, RecognitionError> {
        let engine = self.factory.create(&self.language)?;
        let mut session = EngineSession::new(engine, self.logger.clone());

        session.configure(DIGIT_WHITELIST)?;
        session.recognize(image)
    }
}

/// Owns an engine for the duration of one call and releases it on drop.
struct EngineSession {
    engine: Box<dyn OcrEngine>,
    state: RecognizerState,
    logger: Arc<dyn Logger>,
}

impl EngineSession {
    fn new(engine: Box<dyn OcrEngine>, logger: Arc<dyn Logger>) -> Self {
        Self {
            engine,
            state: RecognizerState::Idle,
            logger,
        }
    }

    fn configure(&mut self, whitelist: &str) -> Result<(), RecognitionError> {
        self.engine.configure(whitelist)?;
        self.transition(RecognizerState::Configured);
        Ok(())
    }

    fn recognize(&mut self, image: &ImageDataUri) -> Result<String, RecognitionError> {
        self.transition(RecognizerState::Recognizing);
        self.engine.recognize(image)
    }

    fn transition(&mut self, next: RecognizerState) {
        self.logger
            .debug(&format!("OCR engine {:?} -> {:?}", self.state, next));
        self.state = next;
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        if self.state != RecognizerState::Released {
            self.engine.release();
            self.transition(RecognizerState::Released);
        }
    }
}
