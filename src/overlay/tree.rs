use super::error::FileSystemError;
use super::path::OverlayPath;
use std::collections::BTreeMap;
use tracing::debug;

/// A staged entry of the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A directory and its permission bits
    Dir { mode: u32 },
    /// File contents and permission bits
    File { contents: Vec<u8>, mode: u32 },
}

impl Entry {
    pub fn mode(&self) -> u32 {
        match self {
            Entry::Dir { mode } | Entry::File { mode, .. } => *mode,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Dir { .. })
    }
}

/// In-memory staging tree for one generation call.
///
/// The root (`.`) always exists and is not stored as an entry. Entries are
/// kept in tree order, so iteration is deterministic and every directory is
/// visited before its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    entries: BTreeMap<OverlayPath, Entry>,
}

impl Overlay {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `path` and all missing ancestors as directories with `mode`.
    ///
    /// Idempotent: directories that already exist keep their mode.
    pub fn ensure_directory(&mut self, path: &str, mode: u32) -> Result<(), FileSystemError> {
        let path = OverlayPath::parse(path)?;
        if path.is_root() {
            return Ok(());
        }
        for dir in path.ancestors().chain(std::iter::once(path.clone())) {
            match self.entries.get(&dir) {
                Some(Entry::Dir { .. }) => {}
                Some(Entry::File { .. }) => {
                    return Err(FileSystemError::NotADirectory {
                        path: dir.to_string(),
                    });
                }
                None => {
                    debug!(path = %dir, mode = %format!("{mode:o}"), "staging directory");
                    self.entries.insert(dir, Entry::Dir { mode });
                }
            }
        }
        Ok(())
    }

    /// Stage `contents` at `path` with `mode`.
    ///
    /// The parent directory must already be staged. Writing the same path
    /// twice keeps the later contents and mode.
    pub fn write_file(
        &mut self,
        path: &str,
        contents: impl Into<Vec<u8>>,
        mode: u32,
    ) -> Result<(), FileSystemError> {
        let path = OverlayPath::parse(path)?;
        let Some(parent) = path.parent() else {
            return Err(FileSystemError::IsADirectory {
                path: path.to_string(),
            });
        };
        if !parent.is_root() {
            match self.entries.get(&parent) {
                Some(Entry::Dir { .. }) => {}
                Some(Entry::File { .. }) => {
                    return Err(FileSystemError::NotADirectory {
                        path: parent.to_string(),
                    });
                }
                None => {
                    return Err(FileSystemError::NotFound {
                        path: parent.to_string(),
                    });
                }
            }
        }
        if let Some(Entry::Dir { .. }) = self.entries.get(&path) {
            return Err(FileSystemError::IsADirectory {
                path: path.to_string(),
            });
        }
        let contents = contents.into();
        debug!(path = %path, bytes = contents.len(), "staging file");
        if let Some(previous) = self.entries.insert(path.clone(), Entry::File { contents, mode }) {
            debug!(
                path = %path,
                previous_mode = %format!("{:o}", previous.mode()),
                "replaced staged file"
            );
        }
        Ok(())
    }

    /// The entry at `path`, if staged. Malformed paths are never staged.
    pub fn entry(&self, path: &str) -> Option<&Entry> {
        let path = OverlayPath::parse(path).ok()?;
        self.entries.get(&path)
    }

    /// Contents of the file at `path`.
    pub fn read_file(&self, path: &str) -> Option<&[u8]> {
        match self.entry(path)? {
            Entry::File { contents, .. } => Some(contents.as_slice()),
            Entry::Dir { .. } => None,
        }
    }

    /// Permission bits of the entry at `path`.
    pub fn mode(&self, path: &str) -> Option<u32> {
        self.entry(path).map(Entry::mode)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        path == "." || self.entry(path).is_some_and(Entry::is_dir)
    }

    /// Direct children of the directory at `path`, in name order.
    pub fn read_dir(&self, path: &str) -> Result<Vec<&OverlayPath>, FileSystemError> {
        let dir = OverlayPath::parse(path)?;
        if !dir.is_root() {
            match self.entries.get(&dir) {
                Some(Entry::Dir { .. }) => {}
                Some(Entry::File { .. }) => {
                    return Err(FileSystemError::NotADirectory {
                        path: dir.to_string(),
                    });
                }
                None => {
                    return Err(FileSystemError::NotFound {
                        path: dir.to_string(),
                    });
                }
            }
        }
        Ok(self
            .entries
            .keys()
            .filter(|p| p.parent().as_ref() == Some(&dir))
            .collect())
    }

    /// All entries in tree order.
    pub fn iter(&self) -> impl Iterator<Item = (&OverlayPath, &Entry)> {
        self.entries.iter()
    }

    /// Staged files with their contents and mode.
    pub fn files(&self) -> impl Iterator<Item = (&OverlayPath, &[u8], u32)> {
        self.entries.iter().filter_map(|(path, entry)| match entry {
            Entry::File { contents, mode } => Some((path, contents.as_slice(), *mode)),
            Entry::Dir { .. } => None,
        })
    }

    /// Staged directories with their mode.
    pub fn directories(&self) -> impl Iterator<Item = (&OverlayPath, u32)> {
        self.entries.iter().filter_map(|(path, entry)| match entry {
            Entry::Dir { mode } => Some((path, *mode)),
            Entry::File { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
