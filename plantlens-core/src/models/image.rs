//! Image artifacts
//!
//! `ImageRef` → `ValidatedImage` → `ProcessedImage`. Each attempt owns its own
//! artifacts; nothing here is shared between attempts.

use std::fmt;
use std::path::{Path, PathBuf};

/// Upload size limit (5 MiB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Longest edge of a processed image
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality of a processed image (0.8 on a 0-1 scale)
pub const JPEG_QUALITY: u8 = 80;

pub const JPEG_MIME: &str = "image/jpeg";

/// Locator for source image bytes
///
/// The core never owns or modifies the referenced bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Local file path (also produced from `file://` URIs)
    Path(PathBuf),
    /// Remote `http://` or `https://` URL
    Url(String),
}

impl ImageRef {
    /// Parse a path or URI as handed over by a camera/picker surface
    pub fn parse(locator: &str) -> Self {
        if let Some(rest) = locator.strip_prefix("file://") {
            ImageRef::Path(PathBuf::from(rest))
        } else if locator.starts_with("http://") || locator.starts_with("https://") {
            ImageRef::Url(locator.to_string())
        } else {
            ImageRef::Path(PathBuf::from(locator))
        }
    }
}

impl From<&Path> for ImageRef {
    fn from(path: &Path) -> Self {
        ImageRef::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        ImageRef::Path(path)
    }
}

impl From<&str> for ImageRef {
    fn from(locator: &str) -> Self {
        ImageRef::parse(locator)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Path(path) => write!(f, "{}", path.display()),
            ImageRef::Url(url) => f.write_str(url),
        }
    }
}

/// Image that passed size, type and decode checks
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub byte_size: u64,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub decodable: bool,
}

/// Canonical upload artifact: JPEG, longest edge ≤ 1024
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl ProcessedImage {
    pub fn mime_type(&self) -> &'static str {
        JPEG_MIME
    }

    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}
