//! Plant records
//!
//! JSON field names are camelCase to match the persisted favorites shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Care attributes; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareInfo {
    #[serde(default)]
    pub sunlight: Option<String>,
    #[serde(default)]
    pub water_needs: Option<String>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub growth_rate: Option<String>,
    #[serde(default)]
    pub mature_height: Option<String>,
    #[serde(default)]
    pub mature_width: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Normalized top suggestion from an identification provider
///
/// `scientific_name` is the identity used for favorites dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub common_names: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Provider probability in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub wiki_url: String,
    #[serde(default)]
    pub care: CareInfo,
    #[serde(default)]
    pub growing_zones: Vec<String>,
}

impl IdentificationResult {
    /// Minimal result with empty optional fields
    pub fn new(name: impl Into<String>, scientific_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            scientific_name: scientific_name.into(),
            common_names: Vec::new(),
            description: String::new(),
            confidence,
            wiki_url: String::new(),
            care: CareInfo::default(),
            growing_zones: Vec::new(),
        }
    }
}

/// A saved favorite: the result plus when it was saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub plant: IdentificationResult,
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn scientific_name(&self) -> &str {
        &self.plant.scientific_name
    }
}

/// Encyclopedia entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub common_names: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub wiki_url: String,
    #[serde(default)]
    pub care: CareInfo,
    #[serde(default)]
    pub growing_zones: Vec<String>,
}
