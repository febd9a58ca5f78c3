//! Caller-facing handle that owns the active sigil directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::asset_paths::{DetectionSettings, find_asset, resolve_asset_dir};
use crate::catalog::Catalog;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::models::RitualEntry;

/// A catalog entry paired with the image resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RitualMatch<'a> {
  /// Catalog entry that matched the requested name.
  pub entry: &'a RitualEntry,
  /// Image found for the entry name, if any.
  pub image: Option<PathBuf>,
}

/// Holds the active sigil directory and answers lookups against it.
///
/// Creating the library does not touch the disk. Call [`SigilLibrary::asset_directory`] or
/// [`SigilLibrary::set_override`] to resolve a directory; until then every lookup returns
/// `None`. Results are never cached, so each [`SigilLibrary::find`] walks the directory again.
#[derive(Debug, Clone)]
pub struct SigilLibrary {
  start_dir: PathBuf,
  override_dir: Option<PathBuf>,
  settings: DetectionSettings,
  catalog: Catalog,
  asset_dir: Option<PathBuf>,
}

impl SigilLibrary {
  /// Create a library that detects directories below `start_dir`.
  pub fn new(start_dir: impl Into<PathBuf>, config: &ResolverConfig) -> Self {
    Self {
      start_dir: start_dir.into(),
      override_dir: config.override_dir(),
      settings: config.detection_settings(),
      catalog: Catalog::embedded().clone(),
      asset_dir: None,
    }
  }

  /// Create a library rooted at the process working directory.
  pub fn from_current_dir(config: &ResolverConfig) -> io::Result<Self> {
    Ok(Self::new(std::env::current_dir()?, config))
  }

  /// Replace the embedded catalog.
  pub fn with_catalog(mut self, catalog: Catalog) -> Self {
    self.catalog = catalog;
    self
  }

  /// Resolve the sigil directory again and make it the active one.
  ///
  /// The configured override is honoured first. On error the active directory is cleared.
  pub fn asset_directory(&mut self) -> Result<Option<&Path>, ResolveError> {
    match resolve_asset_dir(self.override_dir.as_deref(), &self.start_dir, &self.settings) {
      Ok(dir) => {
        self.asset_dir = dir;
        Ok(self.asset_dir.as_deref())
      }
      Err(err) => {
        self.asset_dir = None;
        Err(err)
      }
    }
  }

  /// Point the library at a user-chosen directory.
  ///
  /// A path to a file is rejected and leaves the current state untouched. A path that does not
  /// exist is remembered but auto-detection decides the active directory.
  pub fn set_override(&mut self, dir: impl Into<PathBuf>) -> Result<Option<&Path>, ResolveError> {
    let dir = dir.into();
    let resolved = resolve_asset_dir(Some(dir.as_path()), &self.start_dir, &self.settings)?;
    info!(
      requested = %dir.display(),
      active = ?resolved,
      "sigil directory override applied"
    );
    self.override_dir = Some(dir);
    self.asset_dir = resolved;
    Ok(self.asset_dir.as_deref())
  }

  /// Forget any override; the next [`SigilLibrary::asset_directory`] call auto-detects.
  pub fn clear_override(&mut self) {
    self.override_dir = None;
  }

  /// The active directory as last resolved, without touching the disk.
  pub fn current_directory(&self) -> Option<&Path> {
    self.asset_dir.as_deref()
  }

  /// Find the image for a logical name in the active directory.
  pub fn find(&self, logical_name: &str) -> Option<PathBuf> {
    find_asset(logical_name, self.asset_dir.as_deref(), &self.settings.extensions)
  }

  /// The catalog used by [`SigilLibrary::find_ritual`].
  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  /// Look a name up in the catalog and resolve the image for its canonical spelling.
  pub fn find_ritual(&self, name: &str) -> Option<RitualMatch<'_>> {
    let entry = self.catalog.get(name)?;
    Some(RitualMatch {
      entry,
      image: self.find(&entry.name),
    })
  }
}
