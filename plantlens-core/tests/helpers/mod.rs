//! Test Helper Utilities
//!
//! Shared utilities for testing plantlens-core

#![allow(dead_code)]

pub mod image_generator;
pub mod log_capture;
pub mod mock_stages;
pub mod storage_utils;

pub use image_generator::{jpeg_bytes, padded_jpeg, png_bytes, write_temp_file};
pub use log_capture::{capture_logs, LogCapture};
pub use mock_stages::{CountingProcessor, FixedProvider};
pub use storage_utils::{create_test_sqlite, FailingBackend};
