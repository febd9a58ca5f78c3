//! The immutable catalog of ritual names, descriptions and words of power.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::asset_paths::normalize_key;
use crate::error::CatalogError;
use crate::models::RitualEntry;

const EMBEDDED_CATALOG: &str = include_str!("../data/marduk_names.json");

/// Ordered list of ritual entries.
///
/// Order is the authored order of the source JSON. Lookups accept any spelling that
/// normalises to the same key, so `"Asaru"` finds `ASARU`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  entries: Vec<RitualEntry>,
}

impl Catalog {
  /// The fifty names of Marduk bundled with the crate.
  pub fn embedded() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
      Catalog::from_json(EMBEDDED_CATALOG).expect("invalid embedded ritual catalog")
    })
  }

  /// Parse a catalog from a JSON array of entries.
  ///
  /// Entries with a blank name are skipped and later duplicates of a name are ignored.
  pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
    let raw: Vec<RitualEntry> = serde_json::from_str(content)?;
    Ok(Self::from(raw))
  }

  /// Load a catalog from a JSON file.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    Self::from_json(&content).map_err(|source| CatalogError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// All entries in authored order.
  pub fn entries(&self) -> &[RitualEntry] {
    &self.entries
  }

  /// Look up an entry by name, exact first, then by normalised key.
  pub fn get(&self, name: &str) -> Option<&RitualEntry> {
    if let Some(entry) = self.entries.iter().find(|entry| entry.name == name) {
      return Some(entry);
    }

    let key = normalize_key(name);
    if key.is_empty() {
      return None;
    }
    self
      .entries
      .iter()
      .find(|entry| normalize_key(&entry.name) == key)
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the catalog has no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl From<Vec<RitualEntry>> for Catalog {
  fn from(raw: Vec<RitualEntry>) -> Self {
    let mut seen = BTreeSet::new();
    let entries = raw
      .into_iter()
      .map(|mut entry| {
        entry.name = entry.name.trim().to_string();
        entry
      })
      .filter(|entry| !entry.name.is_empty() && seen.insert(entry.name.clone()))
      .collect();

    Self { entries }
  }
}
