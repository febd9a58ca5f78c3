//! Error types surfaced to callers.
//!
//! "Nothing found" is never an error: detection and search return `None` for that. Only
//! configuration problems and unreadable user-supplied catalogs end up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with an explicitly configured sigil directory.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// The override exists but is a file (or another non-directory entry).
  #[error("configured sigil path is not a directory: {}", .path.display())]
  NotADirectory {
    /// Override path after `~` expansion.
    path: PathBuf,
  },
  /// The override could not be inspected, e.g. because of missing permissions.
  #[error("failed to inspect configured sigil path {}: {source}", .path.display())]
  Inaccessible {
    /// Override path after `~` expansion.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
}

/// Errors that can occur while loading a ritual catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
  /// Failed to read the catalog file.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: io::Error,
  },
  /// Failed to parse the catalog JSON.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}
