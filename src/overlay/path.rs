use super::error::FileSystemError;
use std::fmt;
use std::path::PathBuf;

/// A validated overlay path.
///
/// Stored as its elements so that ordering follows the tree: a directory sorts
/// before everything beneath it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayPath {
    segments: Vec<String>,
}

impl OverlayPath {
    /// The root directory (`.`).
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse and validate a slash-separated relative path.
    pub fn parse(raw: &str) -> Result<Self, FileSystemError> {
        let invalid = |reason| FileSystemError::InvalidPath {
            path: raw.to_string(),
            reason,
        };
        if raw == "." {
            return Ok(Self::root());
        }
        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }
        if raw.starts_with('/') {
            return Err(invalid("absolute paths escape the overlay root"));
        }
        if raw.contains('\\') {
            return Err(invalid("paths must use '/' as the only separator"));
        }
        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" => return Err(invalid("path contains an empty element")),
                "." => return Err(invalid("path contains a '.' element")),
                ".." => return Err(invalid("'..' escapes the overlay root")),
                s => segments.push(s.to_string()),
            }
        }
        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The containing directory; `None` for the root.
    pub fn parent(&self) -> Option<OverlayPath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The last element; `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Every proper ancestor except the root, outermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = OverlayPath> + '_ {
        (1..self.segments.len()).map(move |n| Self {
            segments: self.segments[..n].to_vec(),
        })
    }

    /// The path relative to a host directory, for persisting.
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for OverlayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        f.write_str(&self.segments.join("/"))
    }
}
