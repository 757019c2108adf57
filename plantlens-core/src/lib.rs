//! plantlens-core library
//!
//! Photo → plant identification pipeline and favorites persistence:
//! image validation, preprocessing, remote identification, confidence
//! gating, and a deduplicated favorites store with popularity counts.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use crate::error::{
    IdentifyError, PipelineError, ProcessingError, RecoveryAction, StorageError, ValidationError,
};
pub use crate::models::{FavoriteEntry, IdentificationResult, ImageRef};
pub use crate::services::{FavoritesStore, GateDecision, IdentificationPipeline};
