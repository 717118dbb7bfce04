//! Moving course directories between lifecycle roots.

use std::io;
use std::path::PathBuf;

use tokio::fs;

use crate::error::Result;
use crate::fs::paths::{CourseDirs, CourseState};

/// Result of moving a course directory out of the in-progress root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Moved(PathBuf),
    /// The directory was still in use and stays in the in-progress root.
    LeftInPlace,
}

/// Move an in-progress course directory to the root of `target`.
///
/// Stale copies of the course in any terminal root, the destination
/// included, are removed first so the course ends up in exactly one root.
/// Once moved, the in-progress root is removed if nothing else is left in it.
pub async fn move_course(
    dirs: &CourseDirs,
    course_id: &str,
    target: CourseState,
) -> Result<MoveResult> {
    let source = dirs.course(CourseState::InProgress, course_id);
    let destination = dirs.course(target, course_id);

    fs::create_dir_all(dirs.root(target)).await?;

    let moved = async {
        for state in CourseState::ALL {
            if state == CourseState::InProgress {
                continue;
            }
            let stale = dirs.course(state, course_id);
            if fs::try_exists(&stale).await? {
                tracing::debug!("Removing stale {}", stale.display());
                fs::remove_dir_all(&stale).await?;
            }
        }
        fs::rename(&source, &destination).await
    }
    .await;

    match moved {
        Ok(()) => {}
        Err(e) if is_contention(&e) => {
            tracing::warn!(
                "Directory {} still in use, leaving it in place: {}",
                source.display(),
                e
            );
            return Ok(MoveResult::LeftInPlace);
        }
        Err(e) => return Err(e.into()),
    }

    remove_if_empty(dirs.root(CourseState::InProgress)).await;
    Ok(MoveResult::Moved(destination))
}

/// Remove a directory only when it is empty.
async fn remove_if_empty(path: PathBuf) {
    match fs::remove_dir(&path).await {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) => tracing::debug!("Keeping {}: {}", path.display(), e),
    }
}

/// Whether an error means another process still holds the directory.
fn is_contention(err: &io::Error) -> bool {
    #[cfg(windows)]
    {
        // ERROR_SHARING_VIOLATION
        if err.raw_os_error() == Some(32) {
            return true;
        }
    }

    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::ResourceBusy
    )
}
