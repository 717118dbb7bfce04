//! Course list (manifest) parsing.
//!
//! One course per line. A token made only of digits is a playlist index, any
//! other token is the course identifier:
//!
//! ```text
//! python-fundamentals
//! docker-deep-dive 12
//! kubernetes-getting-started 3 8
//! 1 4 9 rust-intro
//! ```

use std::fs;
use std::path::Path;

use crate::config::validate_course_id;
use crate::course::item::Course;
use crate::error::{Error, Result};

/// Load every course listed in the manifest, in file order.
pub fn load_manifest(path: &Path) -> Result<Vec<Course>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ManifestNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    let courses = parse_manifest(&content)?;
    tracing::debug!(
        "Loaded {} course(s) from {}",
        courses.len(),
        path.display()
    );
    Ok(courses)
}

/// Parse manifest content, skipping blank lines.
pub fn parse_manifest(content: &str) -> Result<Vec<Course>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(line, index + 1))
        .collect()
}

/// Parse a single non-blank manifest line.
pub fn parse_line(line: &str, line_number: usize) -> Result<Course> {
    let invalid = |message: String| Error::ManifestLine {
        line: line_number,
        message,
    };

    let mut course_id: Option<&str> = None;
    let mut indices = Vec::new();

    for token in line.split_whitespace() {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            let index = token
                .parse::<u32>()
                .map_err(|_| invalid(format!("playlist index '{}' is out of range", token)))?;
            indices.push(index);
        } else if let Some(existing) = course_id {
            return Err(invalid(format!(
                "expected one course identifier, found '{}' and '{}'",
                existing, token
            )));
        } else {
            course_id = Some(token);
        }
    }

    let course_id = course_id.ok_or_else(|| {
        invalid("playlist indices given without a course identifier".to_string())
    })?;
    validate_course_id(course_id).map_err(invalid)?;

    Ok(Course::new(course_id, indices).at_line(line_number))
}
