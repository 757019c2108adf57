//! Plant encyclopedia API client
//!
//! Read-only pass-through facade: free-text search with optional category
//! filter, lookup by id, and category listing.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{CareInfo, PlantRecord};

const USER_AGENT: &str = "PlantLens/0.1.0";

/// Encyclopedia client errors
#[derive(Debug, Error)]
pub enum EncyclopediaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    plant_details: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<SearchFilter<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct SearchFilter<'a> {
    plant_type: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    plants: Vec<ApiPlant>,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<String>,
}

/// Provider plant record (snake_case wire format)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlant {
    #[serde(default)]
    pub id: serde_json::Value,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub common_names: Option<Vec<String>>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub plant_type: Option<String>,
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

impl From<ApiPlant> for PlantRecord {
    fn from(plant: ApiPlant) -> Self {
        // Ids arrive as numbers or strings depending on endpoint
        let id = match plant.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };

        PlantRecord {
            id,
            name: plant.common_name.unwrap_or_default(),
            scientific_name: plant.scientific_name.unwrap_or_default(),
            common_names: plant.common_names.unwrap_or_default(),
            description: plant.description.unwrap_or_default(),
            image_url: plant.image_url,
            category: plant.plant_type,
            wiki_url: plant.url.unwrap_or_default(),
            care: CareInfo {
                sunlight: plant.sunlight,
                water_needs: plant.water_needs,
                soil_type: plant.soil_type,
                growth_rate: plant.growth_rate,
                mature_height: plant.mature_height,
                mature_width: plant.mature_width,
                instructions: plant.care_instructions,
            },
            growing_zones: plant.growing_zones.unwrap_or_default(),
        }
    }
}

const SEARCH_DETAILS: &[&str] = &[
    "common_names",
    "description",
    "taxonomy",
    "url",
    "image_url",
    "care_instructions",
    "growing_zones",
    "sunlight",
    "water_needs",
    "soil_type",
    "growth_rate",
    "mature_height",
    "mature_width",
];

/// Encyclopedia API client
pub struct EncyclopediaClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EncyclopediaClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, EncyclopediaError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EncyclopediaError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Free-text search, optionally restricted to one category
    pub async fn search(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<Vec<PlantRecord>, EncyclopediaError> {
        let request = SearchRequest {
            query,
            plant_details: SEARCH_DETAILS,
            filter: category.map(|plant_type| SearchFilter { plant_type }),
        };

        tracing::debug!(query, category = ?category, "Searching plant encyclopedia");

        let response = self
            .http_client
            .post(format!("{}/plants/search", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EncyclopediaError::Network(e.to_string()))?;

        let body: SearchResponse = Self::parse(response).await?;
        Ok(body.plants.into_iter().map(PlantRecord::from).collect())
    }

    /// Fetch one plant by provider id
    pub async fn plant_by_id(&self, id: &str) -> Result<PlantRecord, EncyclopediaError> {
        let url = self.plant_url(id)?;
        let response = self
            .http_client
            .get(url)
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| EncyclopediaError::Network(e.to_string()))?;

        let plant: ApiPlant = Self::parse(response).await?;
        Ok(plant.into())
    }

    /// List available plant categories
    pub async fn categories(&self) -> Result<Vec<String>, EncyclopediaError> {
        let response = self
            .http_client
            .get(format!("{}/plants/categories", self.base_url))
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| EncyclopediaError::Network(e.to_string()))?;

        let body: CategoriesResponse = Self::parse(response).await?;
        Ok(body.categories)
    }

    /// `{base}/plants/{id}` with `id` percent-encoded as one path segment
    fn plant_url(&self, id: &str) -> Result<reqwest::Url, EncyclopediaError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| EncyclopediaError::Network(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| EncyclopediaError::Network(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["plants", id]);
        Ok(url)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, EncyclopediaError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EncyclopediaError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| EncyclopediaError::Parse(e.to_string()))
    }
}
