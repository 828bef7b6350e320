use leptess::{LepTess, Variable};

use business::domain::scan::errors::RecognitionError;
use business::domain::scan::model::ImageDataUri;
use business::domain::scan::services::{OcrEngine, OcrEngineFactory};

/// Tesseract instance for a single recognition. `None` once released.
pub struct OcrEngineTesseract {
    tess: Option<LepTess>,
}

impl OcrEngineTesseract {
    fn engine(&mut self) -> Option<&mut LepTess> {
        self.tess.as_mut()
    }
}

impl OcrEngine for OcrEngineTesseract {
    fn configure(&mut self, whitelist: &str) -> Result<(), RecognitionError> {
        let tess = self
            .engine()
            .ok_or_else(|| RecognitionError::Configure("engine released".to_string()))?;
        tess.set_variable(Variable::TesseditCharWhitelist, whitelist)
            .map_err(|e| RecognitionError::Configure(e.to_string()))
    }

    fn recognize(&mut self, image: &ImageDataUri) -> Result<String, RecognitionError> {
        let bytes = image.decode()?;
        let tess = self
            .engine()
            .ok_or_else(|| RecognitionError::Recognize("engine released".to_string()))?;
        tess.set_image_from_mem(&bytes)
            .map_err(|e| RecognitionError::Recognize(e.to_string()))?;
        tess.get_utf8_text()
            .map_err(|e| RecognitionError::Recognize(e.to_string()))
    }

    fn release(&mut self) {
        self.tess.take();
    }
}

/// Creates Tesseract engines, optionally from a custom tessdata directory.
pub struct OcrEngineFactoryTesseract {
    tessdata_path: Option<String>,
}

impl OcrEngineFactoryTesseract {
    pub fn new(tessdata_path: Option<String>) -> Self {
        Self { tessdata_path }
    }
}

impl OcrEngineFactory for OcrEngineFactoryTesseract {
    fn create(&self, language: &str) -> Result<Box<dyn OcrEngine>, RecognitionError> {
        let tess = LepTess::new(self.tessdata_path.as_deref(), language)
            .map_err(|e| RecognitionError::EngineInit(e.to_string()))?;
        Ok(Box::new(OcrEngineTesseract { tess: Some(tess) }))
    }
}
