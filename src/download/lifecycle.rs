//! Course lifecycle controller.
//!
//! A course directory is created in `_inprogress`, filled by the downloader
//! and then moved to `_finished`, `_failed` or `_canceled` depending on the
//! outcome. Courses already present in `_finished` are skipped.

use crate::config::Config;
use crate::course::Course;
use crate::download::options::{DownloadRequest, DownloadSettings, PlaylistSelection};
use crate::download::outcome::{CourseOutcome, DownloadOutcome, FailureReason};
use crate::download::runner::Downloader;
use crate::error::Result;
use crate::fs::{move_course, CourseDirs, CourseState, MoveResult};
use crate::output::{print_info, print_warning, CourseLog};

/// Drives a single course through its lifecycle.
pub struct CourseLifecycle<'a> {
    pub downloader: &'a dyn Downloader,
    pub config: &'a Config,
    pub settings: &'a DownloadSettings,
    pub dirs: &'a CourseDirs,
}

impl CourseLifecycle<'_> {
    /// Download a course unless it is already finished, and route its
    /// directory according to the outcome.
    pub async fn run(&self, course: &Course) -> Result<CourseOutcome> {
        let course_id = course.id.as_str();
        let url = self.config.course_url(course_id)?;

        if self.dirs.course(CourseState::Finished, course_id).exists() {
            print_info(&format!("Course {} already downloaded", course_id));
            return Ok(CourseOutcome::AlreadyFinished);
        }

        let course_dir = self.dirs.course(CourseState::InProgress, course_id);
        tokio::fs::create_dir_all(&course_dir).await?;
        let mut log = CourseLog::create(&course_dir, course_id).await?;

        let selection = course.selection();
        if selection != PlaylistSelection::Full {
            log.note(&format!("Downloading {}", selection)).await;
        }

        let request = DownloadRequest {
            settings: self.settings,
            course_id,
            url: url.clone(),
            working_dir: course_dir,
            selection,
        };

        tracing::info!("Downloading {} from {}", course_id, url);
        let outcome = self.downloader.download(&request, &mut log).await?;

        let target = match &outcome {
            DownloadOutcome::Completed => {
                log.note(&format!(
                    "The course '{}' was downloaded successfully.",
                    course_id
                ))
                .await;
                CourseState::Finished
            }
            DownloadOutcome::Failed(FailureReason::ContentUnavailable(reason)) => {
                log.note(&format!(
                    "The course '{}' may not be a part of your current licence.",
                    course_id
                ))
                .await;
                log.note(&format!("Reason: {}", reason)).await;
                log.note(&format!("Visit {} for more information.\n", url))
                    .await;
                CourseState::Failed
            }
            DownloadOutcome::Failed(FailureReason::DownloadError(reason)) => {
                log.note("Something went wrong.").await;
                log.note(&format!(
                    "The download request for '{}' was forced to terminate.",
                    course_id
                ))
                .await;
                log.note(&format!("Reason: {}", reason)).await;
                log.note(&format!("Double check that {}", url)).await;
                log.note("exists or that your subscription is valid for accessing its content.\n")
                    .await;
                CourseState::Failed
            }
            DownloadOutcome::Canceled => {
                log.note(&format!(
                    "\n\nThe download stream for '{}' was canceled by user.",
                    course_id
                ))
                .await;
                CourseState::Canceled
            }
        };

        log.note(&format!(
            "Moving content to {}",
            self.dirs.course(target, course_id).display()
        ))
        .await;
        // The log file lives inside the directory being moved.
        drop(log);

        if move_course(self.dirs, course_id, target).await? == MoveResult::LeftInPlace {
            print_warning(&format!(
                "Directory of '{}' ({}) still in use, leaving it in {}",
                course_id,
                url,
                self.dirs.root(CourseState::InProgress).display()
            ));
        }

        Ok(outcome.into())
    }
}
