//! Course module for the course model and manifest parsing.

pub mod item;
pub mod manifest;

pub use item::Course;
pub use manifest::{load_manifest, parse_line, parse_manifest};
