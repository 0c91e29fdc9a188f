use std::fmt;

/// Overlay staging error
///
/// Returned by [`Overlay`](super::Overlay) operations. The overlay never
/// touches real storage, so every variant describes a problem with the
/// staged path itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    /// The path does not follow the overlay path grammar
    ///
    /// Paths are relative, slash-separated and free of empty, `.` and `..`
    /// elements. The lone `.` names the root.
    InvalidPath {
        /// The rejected path as given
        path: String,
        /// Which rule was violated
        reason: &'static str,
    },
    /// The parent directory of a file has not been staged
    NotFound {
        /// The missing directory
        path: String,
    },
    /// A path prefix is staged as a file
    NotADirectory {
        /// The offending prefix
        path: String,
    },
    /// A file write targets a staged directory
    IsADirectory {
        /// The directory path
        path: String,
    },
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::InvalidPath { path, reason } => {
                write!(f, "invalid overlay path '{}': {}", path, reason)
            }
            FileSystemError::NotFound { path } => {
                write!(f, "overlay directory '{}' does not exist", path)
            }
            FileSystemError::NotADirectory { path } => {
                write!(f, "overlay path '{}' is a file, not a directory", path)
            }
            FileSystemError::IsADirectory { path } => {
                write!(f, "overlay path '{}' is a directory", path)
            }
        }
    }
}

impl std::error::Error for FileSystemError {}
