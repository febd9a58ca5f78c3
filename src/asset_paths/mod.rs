//! Locating the sigil directory and resolving ritual names to image files.
//!
//! Detection, name normalisation, extension filtering and the tree search live in separate
//! submodules so each can be tested on its own. [`crate::SigilLibrary`] composes them for
//! callers that want to hold a single active directory.

mod detect;
mod extensions;
mod normalize;
mod search;

pub use detect::{
    DEFAULT_MIN_IMAGE_COUNT, DEFAULT_SIGIL_DIR_NAME, DetectionSettings, auto_detect_dir,
    collect_candidates, count_images, resolve_asset_dir,
};
pub use extensions::{DEFAULT_IMAGE_EXTENSIONS, ImageExtensions};
pub use normalize::normalize_key;
pub use search::find_asset;
