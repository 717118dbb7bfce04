//! Sequential download of every course in the manifest.

use crate::course::Course;
use crate::download::lifecycle::CourseLifecycle;
use crate::download::state::BatchSummary;
use crate::error::Result;
use crate::output::{print_info, print_warning};

/// Download the courses one after another.
///
/// Failed courses do not stop the batch; a user cancellation does, and the
/// remaining courses are counted as not attempted.
pub async fn download_courses(
    lifecycle: &CourseLifecycle<'_>,
    courses: &[Course],
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, course) in courses.iter().enumerate() {
        print_info(&format!(
            "Processing course {} ({}/{})",
            course,
            index + 1,
            courses.len()
        ));

        let outcome = lifecycle.run(course).await?;
        summary.record(course, &outcome);

        if outcome.continue_batch() {
            print_info("Moving to next course playlist\n");
        } else {
            summary.not_attempted = courses.len() - index - 1;
            print_warning("Terminating requests.\n");
            break;
        }
    }

    Ok(summary)
}
