//! Course representation.

use std::fmt;

use crate::download::PlaylistSelection;

/// A course listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Platform course slug.
    pub id: String,

    /// 1-based playlist indices, sorted ascending.
    pub playlist_indices: Vec<u32>,

    /// Line of the manifest the course was read from (1-based).
    pub line: usize,
}

impl Course {
    /// Create a course, sorting the playlist indices.
    pub fn new(id: impl Into<String>, mut playlist_indices: Vec<u32>) -> Self {
        playlist_indices.sort_unstable();
        Self {
            id: id.into(),
            playlist_indices,
            line: 0,
        }
    }

    /// Set the manifest line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Get the playlist selection implied by the indices.
    pub fn selection(&self) -> PlaylistSelection {
        PlaylistSelection::from_indices(&self.playlist_indices)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
