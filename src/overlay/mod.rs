//! # Overlay Module
//!
//! An in-memory staging filesystem. A generation call creates an empty
//! [`Overlay`], stages directories and files into it, and hands it back to the
//! caller by value. Nothing here touches real storage; applying the overlay to
//! disk, diffing it, or discarding it (dry run) is up to the caller.
//!
//! ## Paths
//!
//! Overlay paths follow the `io/fs` valid-path rules:
//!
//! - slash-separated and relative (`.fluentci/sdk/client.gen.ts`)
//! - no empty, `.` or `..` elements, no trailing slash, no backslashes
//! - the lone `.` names the root, which always exists
//!
//! Anything else is rejected with [`FileSystemError::InvalidPath`].
//!
//! ## Example
//!
//! ```rust
//! use sdkgen::overlay::Overlay;
//!
//! let mut overlay = Overlay::new();
//! overlay.ensure_directory("sdk/gen", 0o755).unwrap();
//! overlay.write_file("sdk/gen/client.ts", "export {};\n", 0o600).unwrap();
//!
//! assert!(overlay.is_dir("sdk"));
//! assert_eq!(overlay.mode("sdk/gen/client.ts"), Some(0o600));
//! ```

mod error;
mod path;
mod tree;


pub use error::FileSystemError;
pub use path::OverlayPath;
pub use tree::{Entry, Overlay};
