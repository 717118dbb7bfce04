//! Filesystem module.
//!
//! Provides:
//! - Lifecycle root layout and cookie store paths
//! - Moving course directories between lifecycle roots

pub mod moves;
pub mod paths;

pub use moves::{move_course, MoveResult};
pub use paths::{cookie_file, ensure_dir, prepare_cookie_file, CourseDirs, CourseState};
