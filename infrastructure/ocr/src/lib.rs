mod preprocessor;
mod tesseract;

pub use preprocessor::ImagePreprocessorRaster;
pub use tesseract::{OcrEngineFactoryTesseract, OcrEngineTesseract};
