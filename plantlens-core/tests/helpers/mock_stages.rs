//! Stand-in pipeline stages

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use plantlens_core::error::{IdentifyError, ProcessingError};
use plantlens_core::models::{IdentificationResult, ProcessedImage, ValidatedImage};
use plantlens_core::services::{IdentificationProvider, ImagePreprocessor, ImageProcessor};

/// Real preprocessor that counts invocations
#[derive(Default)]
pub struct CountingProcessor {
    calls: AtomicUsize,
    inner: ImagePreprocessor,
}

impl CountingProcessor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProcessor for CountingProcessor {
    async fn preprocess(&self, image: &ValidatedImage) -> Result<ProcessedImage, ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.preprocess(image).await
    }
}

/// Provider returning a canned result, recording what it was sent
pub struct FixedProvider {
    result: IdentificationResult,
    calls: AtomicUsize,
    last_max_dimension: AtomicUsize,
}

impl FixedProvider {
    pub fn new(result: IdentificationResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            last_max_dimension: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_max_dimension(&self) -> u32 {
        self.last_max_dimension.load(Ordering::SeqCst) as u32
    }
}

#[async_trait]
impl IdentificationProvider for FixedProvider {
    fn provider_id(&self) -> &'static str {
        "fixed"
    }

    async fn identify(&self, image: &ProcessedImage) -> Result<IdentificationResult, IdentifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_max_dimension
            .store(image.max_dimension() as usize, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}
