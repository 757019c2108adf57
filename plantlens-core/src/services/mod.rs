//! Business logic services
//!
//! Leaves first: validator, preprocessor, identification client, confidence
//! gate, favorites store. The pipeline wires the first four together.

pub mod confidence_gate;
pub mod encyclopedia_client;
pub mod favorites_store;
pub mod identification_client;
pub mod image_preprocessor;
pub mod image_validator;
pub mod pipeline;

pub use confidence_gate::{ConfidenceGate, Decision, GateDecision, LowConfidence};
pub use encyclopedia_client::{EncyclopediaClient, EncyclopediaError};
pub use favorites_store::FavoritesStore;
pub use identification_client::{IdentificationProvider, PlantIdClient};
pub use image_preprocessor::{ImagePreprocessor, ImageProcessor};
pub use image_validator::ImageValidator;
pub use pipeline::IdentificationPipeline;
