//! Plain data passed between detection, search and the catalog.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A directory considered during auto-detection together with its image count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDirectory {
  /// Directory path as visited during the scan.
  pub path: PathBuf,
  /// Number of image files directly inside the directory.
  pub image_count: usize,
}

/// One of the names in the ritual catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RitualEntry {
  /// Logical name, also used to look up the sigil image.
  pub name: String,
  /// Short description of what the entity grants.
  #[serde(default)]
  pub description: String,
  /// Word of power pronounced when invoking the entity.
  #[serde(default)]
  pub power_word: String,
}
