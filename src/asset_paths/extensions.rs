use std::ffi::OsStr;
use std::path::Path;

/// Extensions treated as images when the configuration does not list its own.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Ordered set of file extensions recognised as sigil images.
///
/// Extensions are stored lower-case without the leading dot and compared case-insensitively,
/// so `seal.PNG` and `seal.png` are both accepted. The order is kept because the exact-name
/// fallback in [`crate::asset_paths::find_asset`] tries extensions one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageExtensions {
    extensions: Vec<String>,
}

impl ImageExtensions {
    /// Build a set from raw values such as `".PNG"` or `"jpg"`.
    ///
    /// Blank entries and duplicates are dropped. An empty result falls back to
    /// [`DEFAULT_IMAGE_EXTENSIONS`].
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = Vec::new();
        for value in values {
            let cleaned = value
                .as_ref()
                .trim()
                .trim_start_matches('.')
                .to_ascii_lowercase();
            if !cleaned.is_empty() && !extensions.contains(&cleaned) {
                extensions.push(cleaned);
            }
        }

        if extensions.is_empty() {
            return Self::default();
        }

        Self { extensions }
    }

    /// Returns `true` when the final extension of `path` is a recognised image extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    /// Iterate over the extensions, without leading dots, in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ImageExtensions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_extensions_ignoring_case() {
        let extensions = ImageExtensions::default();
        assert!(extensions.matches(Path::new("sigils/marduk.png")));
        assert!(extensions.matches(Path::new("sigils/marduk.JPG")));
        assert!(extensions.matches(Path::new("sigils/marduk.JpEg")));
    }

    #[test]
    fn rejects_other_files() {
        let extensions = ImageExtensions::default();
        assert!(!extensions.matches(Path::new("notes.txt")));
        assert!(!extensions.matches(Path::new("archive.png.zip")));
        assert!(!extensions.matches(Path::new("png")));
        assert!(!extensions.matches(Path::new(".png")));
    }

    #[test]
    fn cleans_configured_values() {
        let extensions = ImageExtensions::new([".GIF", " webp ", "gif", ""]);
        assert_eq!(extensions.iter().collect::<Vec<_>>(), vec!["gif", "webp"]);
        assert!(extensions.matches(Path::new("seal.Gif")));
        assert!(!extensions.matches(Path::new("seal.png")));
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let extensions = ImageExtensions::new(Vec::<String>::new());
        assert_eq!(extensions, ImageExtensions::default());
    }
}
