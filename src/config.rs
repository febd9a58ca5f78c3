//! Optional JSON configuration for detection and lookup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::asset_paths::{
    DEFAULT_IMAGE_EXTENSIONS, DEFAULT_MIN_IMAGE_COUNT, DEFAULT_SIGIL_DIR_NAME, DetectionSettings,
    ImageExtensions,
};

/// File name searched for in the start directory.
pub const DEFAULT_CONFIG_FILE: &str = "sigils.config.json";

/// Discoverable configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Explicit sigil directory. Takes priority over auto-detection when it exists.
    pub asset_dir: Option<String>,
    /// Folder preferred directly under the start directory.
    pub sigil_dir_name: String,
    /// Minimum image count for directories found by the recursive scan.
    pub min_image_count: usize,
    /// Extensions treated as images, with or without the leading dot.
    pub image_extensions: Vec<String>,
    /// Optional depth cap for the recursive detection scan.
    pub max_depth: Option<usize>,
    /// Optional JSON catalog replacing the embedded one.
    pub catalog_file: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            asset_dir: None,
            sigil_dir_name: DEFAULT_SIGIL_DIR_NAME.into(),
            min_image_count: DEFAULT_MIN_IMAGE_COUNT,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_depth: None,
            catalog_file: None,
        }
    }
}

impl ResolverConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing or malformed file yields the defaults so lookups keep working.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring malformed configuration");
                None
            }
        }
    }

    /// Detection tunables derived from this configuration.
    pub fn detection_settings(&self) -> DetectionSettings {
        let sigil_dir_name = match self.sigil_dir_name.trim() {
            "" => DEFAULT_SIGIL_DIR_NAME.to_string(),
            name => name.to_string(),
        };

        DetectionSettings {
            sigil_dir_name,
            min_image_count: self.min_image_count,
            max_depth: self.max_depth,
            extensions: ImageExtensions::new(&self.image_extensions),
        }
    }

    /// Configured override directory, if any.
    pub fn override_dir(&self) -> Option<PathBuf> {
        self.asset_dir
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Path to a custom catalog, relative paths anchored at `base_dir`.
    pub fn catalog_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.catalog_file
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| base_dir.join(value))
    }
}
