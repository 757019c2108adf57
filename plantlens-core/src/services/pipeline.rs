//! Identification pipeline
//!
//! validate → preprocess → identify → confidence gate, stopping at the first
//! failure. Each run owns its intermediate artifacts, so concurrent runs
//! share nothing mutable. The pipeline never writes favorites: saving is a
//! separate, explicit caller action, which keeps abandoned runs side-effect
//! free.

use std::sync::Arc;

use plantlens_common::config::TomlConfig;

use crate::error::PipelineError;
use crate::models::ImageRef;
use crate::services::confidence_gate::{ConfidenceGate, GateDecision};
use crate::services::identification_client::{IdentificationProvider, PlantIdClient};
use crate::services::image_preprocessor::{ImagePreprocessor, ImageProcessor};
use crate::services::image_validator::ImageValidator;

pub struct IdentificationPipeline {
    validator: ImageValidator,
    processor: Arc<dyn ImageProcessor>,
    provider: Arc<dyn IdentificationProvider>,
    gate: ConfidenceGate,
}

impl IdentificationPipeline {
    pub fn new(
        validator: ImageValidator,
        processor: Arc<dyn ImageProcessor>,
        provider: Arc<dyn IdentificationProvider>,
    ) -> Self {
        Self {
            validator,
            processor,
            provider,
            gate: ConfidenceGate::new(),
        }
    }

    /// Default stages with the plant.id client built from configuration
    pub fn from_config(config: &TomlConfig) -> plantlens_common::Result<Self> {
        let api_key = plantlens_common::config::resolve_api_key(config)?;

        let timeout = plantlens_common::time::secs_to_duration(config.provider.timeout_secs);
        let validator = ImageValidator::with_timeout(timeout)
            .map_err(|e| plantlens_common::Error::Internal(e.to_string()))?;
        let client = PlantIdClient::from_config(&config.provider, api_key)
            .map_err(|e| plantlens_common::Error::Internal(e.to_string()))?;

        Ok(Self::new(
            validator,
            Arc::new(ImagePreprocessor::new()),
            Arc::new(client),
        ))
    }

    /// Run one identification attempt
    ///
    /// A low-confidence result is not an error; it comes back as
    /// `GateDecision::LowConfidenceChoice` for the caller to resolve.
    pub async fn run(&self, image_ref: &ImageRef) -> Result<GateDecision, PipelineError> {
        tracing::info!(image = %image_ref, provider = self.provider.provider_id(), "Identification started");

        let validated = self.validator.validate(image_ref).await.map_err(|e| {
            tracing::warn!(error = %e, "Image validation failed");
            PipelineError::from(e)
        })?;

        let processed = self.processor.preprocess(&validated).await.map_err(|e| {
            tracing::warn!(error = %e, "Image preprocessing failed");
            PipelineError::from(e)
        })?;
        drop(validated);

        let result = self.provider.identify(&processed).await.map_err(|e| {
            tracing::warn!(error = %e, "Identification failed");
            PipelineError::from(e)
        })?;
        drop(processed);

        let decision = self.gate.decide(result);
        tracing::info!(
            scientific_name = %decision.result().scientific_name,
            confidence = decision.result().confidence,
            decision = decision.decision().as_str(),
            "Identification finished"
        );

        Ok(decision)
    }
}
