//! Data models for plantlens-core
//!
//! - Image artifacts flowing through one identification attempt
//! - Identification results, favorites, and encyclopedia records

pub mod image;
pub mod plant;

pub use image::{ImageRef, ProcessedImage, ValidatedImage};
pub use plant::{CareInfo, FavoriteEntry, IdentificationResult, PlantRecord};
