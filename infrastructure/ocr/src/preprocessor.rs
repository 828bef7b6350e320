use std::io::Cursor;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::metadata::Orientation;
use image::{DynamicImage, GrayImage, ImageDecoder, ImageFormat, ImageReader, Luma, Rgba, RgbaImage};

use business::domain::logger::Logger;
use business::domain::scan::model::ImageDataUri;
use business::domain::scan::services::ImagePreprocessor;

/// Scans narrower or shorter than this are upscaled before recognition.
const MIN_SIDE: u32 = 100;
/// Side of the square canvas small scans are fitted onto.
const UPSCALE_SIDE: u32 = 300;
/// Luma at or above this becomes white, everything else black.
const BINARIZE_THRESHOLD: u8 = 128;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Normalizes scans with the `image` crate: upscale small scans, fix the EXIF
/// orientation, binarize, and re-encode as JPEG.
///
/// Any failure hands the original bytes to the recognizer unchanged.
pub struct ImagePreprocessorRaster {
    logger: Arc<dyn Logger>,
}

impl ImagePreprocessorRaster {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    fn try_normalize(&self, bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
        let mut decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = decoder.orientation().unwrap_or_else(|e| {
            self.logger
                .warn(&format!("Could not read scan orientation: {}", e));
            Orientation::NoTransforms
        });
        let mut image = DynamicImage::from_decoder(decoder)?;

        if image.width() < MIN_SIDE || image.height() < MIN_SIDE {
            self.logger.debug(&format!(
                "Upscaling small scan {}x{} to {}x{}",
                image.width(),
                image.height(),
                UPSCALE_SIDE,
                UPSCALE_SIDE
            ));
            image = upscale_to_canvas(&image, UPSCALE_SIDE);
        }

        image.apply_orientation(orientation);

        let binary = DynamicImage::ImageLuma8(binarize(&image, BINARIZE_THRESHOLD));
        let mut encoded = Vec::new();
        binary.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)?;
        Ok(encoded)
    }
}

impl ImagePreprocessor for ImagePreprocessorRaster {
    fn normalize(&self, bytes: &[u8]) -> ImageDataUri {
        match self.try_normalize(bytes) {
            Ok(normalized) => ImageDataUri::from_jpeg_bytes(&normalized),
            Err(e) => {
                self.logger.warn(&format!(
                    "Scan preprocessing failed, using original image: {}",
                    e
                ));
                ImageDataUri::from_jpeg_bytes(bytes)
            }
        }
    }
}

/// Fits the image inside a `side`×`side` white canvas, centered, keeping the
/// aspect ratio.
fn upscale_to_canvas(image: &DynamicImage, side: u32) -> DynamicImage {
    let resized = image.resize(side, side, FilterType::Lanczos3).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(side, side, WHITE);
    let x = (side - resized.width()) / 2;
    let y = (side - resized.height()) / 2;
    imageops::overlay(&mut canvas, &resized, i64::from(x), i64::from(y));
    DynamicImage::ImageRgba8(canvas)
}

/// Reduces the image to pure black and white.
fn binarize(image: &DynamicImage, threshold: u8) -> GrayImage {
    let mut gray = image.to_luma8();
    for pixel in gray.pixels_mut() {
        let value = if pixel[0] >= threshold { 255 } else { 0 };
        *pixel = Luma([value]);
    }
    gray
}
