//! # PlantLens Common Library
//!
//! Shared code for the PlantLens crates including:
//! - Common error type
//! - TOML configuration loading and resolution
//! - Tracing initialization
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod logging;
pub mod time;

pub use error::{Error, Result};
