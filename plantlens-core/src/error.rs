//! Error types for plantlens-core
//!
//! Each pipeline stage has its own tagged error enum so callers can branch
//! exhaustively on the failure kind. `PipelineError` is the union surfaced by
//! a full identification attempt.

use thiserror::Error;

/// Image validation failures (bad input, not transient)
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Image is larger than the upload limit
    #[error("Image size {actual} bytes exceeds limit of {limit} bytes")]
    SizeExceeded { actual: u64, limit: u64 },

    /// Content type is not `image/*`
    #[error("Invalid content type: {0}")]
    InvalidType(String),

    /// Bytes could not be decoded as an image
    #[error("Image could not be decoded: {0}")]
    FileCorrupt(String),

    /// Bytes could not be fetched or opened
    #[error("Failed to access image: {0}")]
    NetworkError(String),
}

/// Image preprocessing failures, tagged by stage
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Resize failed: {0}")]
    ResizeFailed(String),

    #[error("JPEG compression failed: {0}")]
    CompressionFailed(String),

    #[error("Format conversion failed: {0}")]
    FormatConversionFailed(String),

    #[error("Unknown processing error: {0}")]
    UnknownProcessingError(String),
}

/// Identification provider failures
#[derive(Debug, Error)]
pub enum IdentifyError {
    /// Transport failure, timeout, or non-success HTTP status
    #[error("Provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// Provider returned zero suggestions
    #[error("No plant matches found")]
    NoMatch,

    /// Response body or top suggestion missing required fields
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl IdentifyError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        IdentifyError::Provider {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}

/// Favorites persistence failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying backend read/write failed
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Stored blob is not valid JSON of the expected shape
    #[error("Corrupt data under key {key}: {message}")]
    Corrupt { key: String, message: String },

    /// Value could not be encoded
    #[error("Serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// What the caller should offer the user after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Bad input: retake or pick another image
    ChooseAnotherImage,
    /// Possibly transient: re-run the whole pipeline
    RetryPipeline,
}

/// Failure of one identification attempt
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Identify(#[from] IdentifyError),
}

impl PipelineError {
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            PipelineError::Validation(_) | PipelineError::Processing(_) => {
                RecoveryAction::ChooseAnotherImage
            }
            PipelineError::Identify(_) => RecoveryAction::RetryPipeline,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::Validation(e) => match e {
                ValidationError::SizeExceeded { .. } => {
                    "Image size exceeds 5MB limit. Please choose a smaller image."
                }
                ValidationError::InvalidType(_) => {
                    "Invalid file type. Please select an image file (JPEG, PNG, etc.)."
                }
                ValidationError::FileCorrupt(_) => {
                    "The image file appears to be corrupted. Please try another image."
                }
                ValidationError::NetworkError(_) => {
                    "Failed to access the image. Please check your connection and try again."
                }
            },
            PipelineError::Processing(e) => match e {
                ProcessingError::ResizeFailed(_) => {
                    "Failed to resize the image. Please try another image."
                }
                ProcessingError::CompressionFailed(_) => {
                    "Failed to compress the image. Please try another image."
                }
                ProcessingError::FormatConversionFailed(_) => {
                    "Failed to convert image format. Please try another image."
                }
                ProcessingError::UnknownProcessingError(_) => {
                    "An unexpected error occurred while processing the image."
                }
            },
            PipelineError::Identify(e) => match e {
                IdentifyError::Provider { .. } => {
                    "Could not reach the identification service. Please try again."
                }
                IdentifyError::NoMatch => {
                    "No plant matches found. Try a clearer photo of the leaves or flowers."
                }
                IdentifyError::MalformedResponse(_) => {
                    "The identification service returned an unexpected response. Please try again."
                }
            },
        }
    }
}
