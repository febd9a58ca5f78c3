//! Heuristics for deciding which directory on disk holds the sigil images.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::asset_paths::extensions::ImageExtensions;
use crate::error::ResolveError;
use crate::models::CandidateDirectory;

/// Name of the folder preferred directly under the start directory.
pub const DEFAULT_SIGIL_DIR_NAME: &str = "sigilos";

/// Minimum number of images a nested directory needs to be considered a candidate.
pub const DEFAULT_MIN_IMAGE_COUNT: usize = 5;

/// Tunables for auto-detection.
#[derive(Debug, Clone)]
pub struct DetectionSettings {
    /// Folder name checked first directly under the start directory.
    pub sigil_dir_name: String,
    /// Minimum image count for directories found by the recursive scan.
    pub min_image_count: usize,
    /// Optional depth cap for the recursive scan; `None` walks the full subtree.
    pub max_depth: Option<usize>,
    /// Extensions counted as images.
    pub extensions: ImageExtensions,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            sigil_dir_name: DEFAULT_SIGIL_DIR_NAME.into(),
            min_image_count: DEFAULT_MIN_IMAGE_COUNT,
            max_depth: None,
            extensions: ImageExtensions::default(),
        }
    }
}

/// Count the image files directly inside `dir`. Subdirectories are not descended into.
pub fn count_images(dir: &Path, extensions: &ImageExtensions) -> io::Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && extensions.matches(&path) {
            count += 1;
        }
    }
    Ok(count)
}

fn count_images_or_zero(dir: &Path, extensions: &ImageExtensions) -> usize {
    match count_images(dir, extensions) {
        Ok(count) => count,
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "could not count images, treating as empty");
            0
        }
    }
}

/// Scan every directory below `start_dir` and return those holding enough images.
///
/// The result is ordered by image count, highest first. Directories with the same count keep
/// the order in which they were visited, which is depth first with siblings sorted by name.
/// `start_dir` itself is never a candidate.
pub fn collect_candidates(start_dir: &Path, settings: &DetectionSettings) -> Vec<CandidateDirectory> {
    let mut walker = WalkDir::new(start_dir).min_depth(1).sort_by_file_name();
    if let Some(depth) = settings.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry during detection");
                continue;
            }
        };

        if !entry.path().is_dir() {
            continue;
        }

        let image_count = count_images_or_zero(entry.path(), &settings.extensions);
        if image_count >= settings.min_image_count {
            candidates.push(CandidateDirectory {
                path: entry.into_path(),
                image_count,
            });
        }
    }

    // Stable sort: ties stay in traversal order.
    candidates.sort_by(|a, b| b.image_count.cmp(&a.image_count));
    candidates
}

/// Pick the sigil directory under `start_dir` without any explicit configuration.
///
/// A `sigilos` folder (see [`DetectionSettings::sigil_dir_name`]) directly under `start_dir`
/// wins as soon as it holds a single image. Otherwise the nested directory with the most
/// images is chosen, provided it reaches [`DetectionSettings::min_image_count`].
pub fn auto_detect_dir(start_dir: &Path, settings: &DetectionSettings) -> Option<PathBuf> {
    let preferred = start_dir.join(&settings.sigil_dir_name);
    if preferred.is_dir() && count_images_or_zero(&preferred, &settings.extensions) >= 1 {
        debug!(dir = %preferred.display(), "using preferred sigil directory");
        return Some(preferred);
    }

    let best = collect_candidates(start_dir, settings).into_iter().next()?;
    info!(
        dir = %best.path.display(),
        images = best.image_count,
        "detected sigil directory"
    );
    Some(best.path)
}

/// Resolve the sigil directory, honouring an explicit override before auto-detection.
///
/// An override that exists but is not a directory is a configuration error. An override that
/// does not exist is ignored and auto-detection runs instead. `Ok(None)` means nothing
/// suitable was found.
pub fn resolve_asset_dir(
    override_dir: Option<&Path>,
    start_dir: &Path,
    settings: &DetectionSettings,
) -> Result<Option<PathBuf>, ResolveError> {
    if let Some(raw) = override_dir {
        let path = expand_override(raw, start_dir);
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_dir() => {
                let resolved = fs::canonicalize(&path).unwrap_or(path);
                debug!(dir = %resolved.display(), "using configured sigil directory");
                return Ok(Some(resolved));
            }
            Ok(_) => return Err(ResolveError::NotADirectory { path }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "configured sigil directory does not exist, falling back to auto-detection"
                );
            }
            Err(source) => return Err(ResolveError::Inaccessible { path, source }),
        }
    }

    Ok(auto_detect_dir(start_dir, settings))
}

/// Expand a leading `~` and anchor relative overrides at `start_dir`.
fn expand_override(raw: &Path, start_dir: &Path) -> PathBuf {
    let expanded = match (raw.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home,
        (Ok(rest), Some(home)) => home.join(rest),
        _ => raw.to_path_buf(),
    };

    if expanded.is_absolute() {
        expanded
    } else {
        start_dir.join(expanded)
    }
}
