//! Batch statistics.

use crate::course::Course;
use crate::download::outcome::CourseOutcome;

/// Statistics across all courses of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub finished: usize,
    pub already_finished: usize,
    pub failed: Vec<String>,
    pub canceled: Option<String>,
    pub not_attempted: usize,
}

impl BatchSummary {
    /// Record the outcome of a course.
    pub fn record(&mut self, course: &Course, outcome: &CourseOutcome) {
        match outcome {
            CourseOutcome::AlreadyFinished => self.already_finished += 1,
            CourseOutcome::Finished => self.finished += 1,
            CourseOutcome::Failed(_) => self.failed.push(course.id.clone()),
            CourseOutcome::Canceled => self.canceled = Some(course.id.clone()),
        }
    }

    /// Whether the user stopped the batch.
    pub fn was_canceled(&self) -> bool {
        self.canceled.is_some()
    }

    /// Number of courses that went through the lifecycle controller.
    pub fn processed(&self) -> usize {
        self.finished
            + self.already_finished
            + self.failed.len()
            + usize::from(self.canceled.is_some())
    }
}
