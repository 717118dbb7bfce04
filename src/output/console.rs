//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     course-dl                                         ║
║     Bulk course video downloader driving yt-dlp       ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    username: &str,
    course_count: usize,
    subtitles: bool,
    root_dir: &str,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Username: {}", username);
    println!("  Courses: {}", course_count);
    println!(
        "  Subtitles: {}",
        if subtitles { "on" } else { "off" }
    );
    println!("  Directory: {}", root_dir);
    println!();
}
