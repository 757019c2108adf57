//! Image preprocessor
//!
//! Produces the canonical upload artifact: fit inside 1024×1024 preserving
//! aspect ratio (never upscaling), re-encoded as JPEG at quality 80.
//! Providers reject or slow down on large uploads, so this runs client-side.

use std::io::Cursor;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::ProcessingError;
use crate::models::image::{JPEG_QUALITY, MAX_DIMENSION};
use crate::models::{ProcessedImage, ValidatedImage};

/// Preprocessing stage of the pipeline
///
/// Implementations must not mutate the input.
#[async_trait]
pub trait ImageProcessor: Send + Sync {
    async fn preprocess(&self, image: &ValidatedImage) -> Result<ProcessedImage, ProcessingError>;
}

/// Default `image`-crate based preprocessor
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    max_dimension: u32,
    quality: u8,
}

impl ImagePreprocessor {
    pub fn new() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            quality: JPEG_QUALITY,
        }
    }

    /// Synchronous preprocessing (CPU-bound)
    pub fn preprocess_blocking(&self, bytes: &[u8]) -> Result<ProcessedImage, ProcessingError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| ProcessingError::FormatConversionFailed(e.to_string()))?;

        let resized = resize_to_fit(decoded, self.max_dimension)?;

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ProcessingError::CompressionFailed(e.to_string()))?;
        let jpeg = buffer.into_inner();

        tracing::debug!(
            width = rgb.width(),
            height = rgb.height(),
            jpeg_bytes = jpeg.len(),
            "Image preprocessed"
        );

        Ok(ProcessedImage {
            bytes: jpeg,
            width: rgb.width(),
            height: rgb.height(),
            quality: self.quality,
        })
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProcessor for ImagePreprocessor {
    async fn preprocess(&self, image: &ValidatedImage) -> Result<ProcessedImage, ProcessingError> {
        // Decoding and resizing are CPU-heavy; keep them off the async workers
        let bytes = image.bytes.clone();
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.preprocess_blocking(&bytes))
            .await
            .map_err(|e| ProcessingError::UnknownProcessingError(e.to_string()))?
    }
}

/// Scale down so neither side exceeds `max_dimension`
fn resize_to_fit(img: DynamicImage, max_dimension: u32) -> Result<DynamicImage, ProcessingError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(ProcessingError::ResizeFailed(format!(
            "zero-sized image {}x{}",
            width, height
        )));
    }

    if width <= max_dimension && height <= max_dimension {
        return Ok(img);
    }

    // `resize` keeps the aspect ratio and fits within the bounds
    let resized = img.resize(max_dimension, max_dimension, FilterType::Lanczos3);
    if resized.width() == 0 || resized.height() == 0 {
        return Err(ProcessingError::ResizeFailed(format!(
            "{}x{} collapsed to {}x{}",
            width,
            height,
            resized.width(),
            resized.height()
        )));
    }

    Ok(resized)
}
