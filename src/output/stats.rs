//! Statistics reporting.

use console::style;

use crate::download::BatchSummary;

/// Print statistics for the whole batch.
pub fn print_batch_summary(summary: &BatchSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Batch Statistics:").bold());
    println!("  Courses processed: {}", summary.processed());
    println!("  Finished:          {}", style(summary.finished).green());
    println!("  Already finished:  {}", summary.already_finished);
    if !summary.failed.is_empty() {
        println!(
            "  Failed:            {} ({})",
            style(summary.failed.len()).red(),
            summary.failed.join(", ")
        );
    }
    if let Some(course) = &summary.canceled {
        println!("  Canceled:          {}", style(course).yellow());
        println!("  Not attempted:     {}", summary.not_attempted);
    }
    println!("{}", style("═".repeat(50)).dim());
}
