//! Configuration module for course-dl.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, DownloadConfig, MANIFEST_FILE_NAME};
pub use validation::{validate_config, validate_course_id};
