//! Plant identification API client
//!
//! Sends a preprocessed image to a remote recognition provider and maps the
//! top-ranked suggestion into an `IdentificationResult`.
//! One request per call; retrying is the caller's decision.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::IdentifyError;
use crate::models::{CareInfo, IdentificationResult, ProcessedImage};

const USER_AGENT: &str = "PlantLens/0.1.0";

/// Detail fields requested for each suggestion
pub const PLANT_DETAILS: &[&str] = &[
    "common_names",
    "description",
    "taxonomy",
    "url",
    "care_instructions",
    "growing_zones",
    "sunlight",
    "water_needs",
    "soil_type",
    "growth_rate",
    "mature_height",
    "mature_width",
];

/// A remote plant recognition service
#[async_trait]
pub trait IdentificationProvider: Send + Sync {
    /// Provider identifier for logs (e.g. "plant.id")
    fn provider_id(&self) -> &'static str;

    async fn identify(&self, image: &ProcessedImage) -> Result<IdentificationResult, IdentifyError>;
}

/// Identification request body
#[derive(Debug, Clone, Serialize)]
pub struct IdentifyRequest<'a> {
    pub images: Vec<String>,
    pub plant_details: &'a [&'a str],
}

/// Identification response
#[derive(Debug, Clone, Deserialize)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// One ranked suggestion; required fields are checked after parsing
#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    pub plant_name: Option<String>,
    pub probability: Option<f64>,
    #[serde(default)]
    pub plant_details: Option<PlantDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantDetails {
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub common_names: Option<Vec<String>>,
    pub description: Option<Description>,
    pub taxonomy: Option<Taxonomy>,
    pub url: Option<String>,
    pub care_instructions: Option<String>,
    pub sunlight: Option<String>,
    pub water_needs: Option<String>,
    pub soil_type: Option<String>,
    pub growth_rate: Option<String>,
    pub mature_height: Option<String>,
    pub mature_width: Option<String>,
    #[serde(default)]
    pub growing_zones: Option<Vec<String>>,
}

/// Providers return the description either inline or wrapped
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Wrapped { value: String },
}

impl Description {
    fn into_text(self) -> String {
        match self {
            Description::Text(text) => text,
            Description::Wrapped { value } => value,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Taxonomy {
    pub scientific_name: Option<String>,
}

/// HTTP client for a plant.id-style identification endpoint
pub struct PlantIdClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl PlantIdClient {
    /// `timeout` bounds the whole request; expiry surfaces as a provider error
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IdentifyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(IdentifyError::transport)?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Build client from resolved configuration
    pub fn from_config(
        provider: &plantlens_common::config::ProviderConfig,
        api_key: String,
    ) -> Result<Self, IdentifyError> {
        Self::new(
            provider.identify_url.clone(),
            api_key,
            plantlens_common::time::secs_to_duration(provider.timeout_secs),
        )
    }

    /// Normalize the top-ranked suggestion
    ///
    /// The provider ranks suggestions most probable first. Only the first is
    /// considered; a malformed first suggestion is an error even if later
    /// ones are complete.
    pub fn best_result(response: IdentifyResponse) -> Result<IdentificationResult, IdentifyError> {
        let top = response
            .suggestions
            .into_iter()
            .next()
            .ok_or(IdentifyError::NoMatch)?;

        let name = top
            .plant_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| IdentifyError::MalformedResponse("top suggestion has no plant_name".into()))?;

        let confidence = top.probability.ok_or_else(|| {
            IdentifyError::MalformedResponse("top suggestion has no probability".into())
        })?;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(IdentifyError::MalformedResponse(format!(
                "probability {} outside [0, 1]",
                confidence
            )));
        }

        let details = top.plant_details.unwrap_or_default();
        let scientific_name = details
            .scientific_name
            .or_else(|| details.taxonomy.and_then(|t| t.scientific_name))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| name.clone());

        Ok(IdentificationResult {
            name,
            scientific_name,
            common_names: details.common_names.unwrap_or_default(),
            description: details
                .description
                .map(Description::into_text)
                .unwrap_or_default(),
            confidence,
            wiki_url: details.url.unwrap_or_default(),
            care: CareInfo {
                sunlight: details.sunlight,
                water_needs: details.water_needs,
                soil_type: details.soil_type,
                growth_rate: details.growth_rate,
                mature_height: details.mature_height,
                mature_width: details.mature_width,
                instructions: details.care_instructions,
            },
            growing_zones: details.growing_zones.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl IdentificationProvider for PlantIdClient {
    fn provider_id(&self) -> &'static str {
        "plant.id"
    }

    async fn identify(&self, image: &ProcessedImage) -> Result<IdentificationResult, IdentifyError> {
        let request = IdentifyRequest {
            images: vec![STANDARD.encode(&image.bytes)],
            plant_details: PLANT_DETAILS,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            image_bytes = image.bytes.len(),
            "Querying identification provider"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(IdentifyError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Identification provider returned error");
            return Err(IdentifyError::Provider {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status.as_u16(), error_text),
            });
        }

        let body = response.text().await.map_err(IdentifyError::transport)?;
        let parsed: IdentifyResponse = serde_json::from_str(&body)
            .map_err(|e| IdentifyError::MalformedResponse(e.to_string()))?;

        let suggestions = parsed.suggestions.len();
        let result = Self::best_result(parsed)?;

        tracing::info!(
            scientific_name = %result.scientific_name,
            confidence = result.confidence,
            suggestions,
            "Identification successful"
        );

        Ok(result)
    }
}
