//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// The four directories a course can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseState {
    InProgress,
    Finished,
    Failed,
    Canceled,
}

impl CourseState {
    /// Get the folder name for this state.
    pub fn folder_name(&self) -> &'static str {
        match self {
            CourseState::InProgress => "_inprogress",
            CourseState::Finished => "_finished",
            CourseState::Failed => "_failed",
            CourseState::Canceled => "_canceled",
        }
    }

    pub const ALL: [CourseState; 4] = [
        CourseState::InProgress,
        CourseState::Finished,
        CourseState::Failed,
        CourseState::Canceled,
    ];
}

/// Lifecycle roots below `<root>/courses`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDirs {
    base: PathBuf,
}

impl CourseDirs {
    /// Lifecycle roots for a root directory.
    pub fn new(root: &Path) -> Self {
        Self {
            base: root.join("courses"),
        }
    }

    /// The `courses` directory itself.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Root directory of a lifecycle state.
    pub fn root(&self, state: CourseState) -> PathBuf {
        self.base.join(state.folder_name())
    }

    /// Directory of a course in a lifecycle state.
    pub fn course(&self, state: CourseState, course_id: &str) -> PathBuf {
        self.root(state).join(course_id)
    }

    /// States whose root currently holds a directory for the course.
    pub fn locate(&self, course_id: &str) -> Vec<CourseState> {
        CourseState::ALL
            .into_iter()
            .filter(|state| self.course(*state, course_id).is_dir())
            .collect()
    }
}

/// Get the cookie file path for a root directory.
pub fn cookie_file(root: &Path) -> PathBuf {
    root.join("cookies").join("cookies.txt")
}

/// Make sure the cookie directory exists and drop cookies of a previous run.
pub fn prepare_cookie_file(root: &Path) -> Result<PathBuf> {
    let path = cookie_file(root);
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }

    match std::fs::remove_file(&path) {
        Ok(()) => tracing::debug!("Removed stale cookie file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    Ok(path)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
