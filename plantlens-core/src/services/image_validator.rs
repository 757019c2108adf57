//! Image validator
//!
//! Checks a candidate image is accessible, within the upload size limit, of
//! an `image/*` content type, and actually decodable. Cheap checks run first:
//! fetch → size → type → decode. Fetching itself is bounded: a file or body
//! larger than the limit is rejected without being read into memory.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use image::ImageReader;
use plantlens_common::config::DEFAULT_TIMEOUT_SECS;
use tokio::io::AsyncReadExt;

use crate::error::ValidationError;
use crate::models::image::MAX_IMAGE_BYTES;
use crate::models::{ImageRef, ValidatedImage};

/// Image validator
///
/// Read-only: never writes to or moves the referenced image.
pub struct ImageValidator {
    http_client: reqwest::Client,
    max_bytes: u64,
    timeout: Duration,
}

impl ImageValidator {
    pub fn new() -> Result<Self, ValidationError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// `timeout` bounds each remote image fetch
    pub fn with_timeout(timeout: Duration) -> Result<Self, ValidationError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ValidationError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            max_bytes: MAX_IMAGE_BYTES,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validate the image behind `image_ref`
    pub async fn validate(&self, image_ref: &ImageRef) -> Result<ValidatedImage, ValidationError> {
        tracing::debug!(image = %image_ref, "Validating image");

        let (bytes, declared_type) = self.fetch(image_ref).await?;
        self.validate_bytes(bytes, declared_type)
    }

    /// Run size, type and decode checks on already-fetched bytes
    ///
    /// `declared_type` is the transport's content type (e.g. HTTP header);
    /// when absent the type is sniffed from magic bytes.
    pub fn validate_bytes(
        &self,
        bytes: Vec<u8>,
        declared_type: Option<String>,
    ) -> Result<ValidatedImage, ValidationError> {
        let byte_size = bytes.len() as u64;
        self.check_size(byte_size)?;

        let mime_type = declared_type
            .map(|t| normalize_content_type(&t))
            .unwrap_or_else(|| sniff_mime(&bytes));
        if !mime_type.starts_with("image/") {
            tracing::warn!(mime_type = %mime_type, "Rejected non-image content");
            return Err(ValidationError::InvalidType(mime_type));
        }

        let (width, height) = decode_dimensions(&bytes)?;

        tracing::debug!(byte_size, mime_type = %mime_type, width, height, "Image validated");

        Ok(ValidatedImage {
            bytes,
            byte_size,
            mime_type,
            width,
            height,
            decodable: true,
        })
    }

    fn check_size(&self, byte_size: u64) -> Result<(), ValidationError> {
        if byte_size > self.max_bytes {
            tracing::warn!(byte_size, limit = self.max_bytes, "Image exceeds size limit");
            return Err(ValidationError::SizeExceeded {
                actual: byte_size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    async fn fetch(
        &self,
        image_ref: &ImageRef,
    ) -> Result<(Vec<u8>, Option<String>), ValidationError> {
        match image_ref {
            ImageRef::Path(path) => Ok((self.read_file(path).await?, None)),
            ImageRef::Url(url) => self.download(url).await,
        }
    }

    /// Size from metadata first, then a read capped one byte past the limit
    ///
    /// The cap covers files whose metadata under-reports (pipes, devices).
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, ValidationError> {
        let io_error = |e: std::io::Error| {
            ValidationError::NetworkError(format!("{}: {}", path.display(), e))
        };

        let file = tokio::fs::File::open(path).await.map_err(io_error)?;
        let metadata = file.metadata().await.map_err(io_error)?;
        self.check_size(metadata.len())?;

        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.take(self.max_bytes + 1)
            .read_to_end(&mut bytes)
            .await
            .map_err(io_error)?;
        self.check_size(bytes.len() as u64)?;

        Ok(bytes)
    }

    /// Download with `Content-Length` rejection and a streaming cap
    ///
    /// When the body overruns the limit, `actual` is the byte count read
    /// before stopping, a lower bound on the true size.
    async fn download(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ValidationError> {
        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ValidationError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ValidationError::NetworkError(format!(
                "HTTP {} fetching {}",
                status.as_u16(),
                url
            )));
        }

        if let Some(length) = response.content_length() {
            self.check_size(length)?;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ValidationError::NetworkError(e.to_string()))?
        {
            bytes.extend_from_slice(&chunk);
            self.check_size(bytes.len() as u64)?;
        }

        Ok((bytes, content_type))
    }
}

/// Strip parameters (`; charset=...`) and lowercase
fn normalize_content_type(raw: &str) -> String {
    raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}

fn sniff_mime(bytes: &[u8]) -> String {
    infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Decode fully; the declared type alone is not trusted
fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), ValidationError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ValidationError::FileCorrupt(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| ValidationError::FileCorrupt(e.to_string()))?;

    Ok((img.width(), img.height()))
}
