//! Locate the image file belonging to a ritual name.

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::asset_paths::extensions::ImageExtensions;
use crate::asset_paths::normalize::normalize_key;

/// Find the first image under `base_dir` whose normalised file name starts with the
/// normalised `logical_name`.
///
/// The tree is walked depth first; inside each directory the files are checked before any
/// subdirectory, and both groups are visited in file-name order, so the result is stable for
/// an unchanged tree. When nothing matches, `base_dir/{logical_name}.{ext}` is tried for every
/// extension; that fallback only applies to names that are a single plain path component, so
/// names such as `../x` or `/etc/x` never reach outside `base_dir`. A missing or stale
/// `base_dir` simply yields `None`.
pub fn find_asset(
    logical_name: &str,
    base_dir: Option<&Path>,
    extensions: &ImageExtensions,
) -> Option<PathBuf> {
    let base_dir = base_dir.filter(|dir| dir.is_dir())?;
    let key = normalize_key(logical_name);

    search_tree(&key, base_dir, extensions)
        .or_else(|| exact_match(logical_name, base_dir, extensions))
}

fn search_tree(key: &str, base_dir: &Path, extensions: &ImageExtensions) -> Option<PathBuf> {
    let walker = WalkDir::new(base_dir).sort_by(files_before_directories);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry during search");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !extensions.matches(path) {
            continue;
        }

        if normalize_key(&entry.file_name().to_string_lossy()).starts_with(key) {
            return Some(entry.into_path());
        }
    }

    None
}

fn files_before_directories(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn exact_match(logical_name: &str, base_dir: &Path, extensions: &ImageExtensions) -> Option<PathBuf> {
    let mut components = Path::new(logical_name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return None;
    }

    extensions
        .iter()
        .map(|ext| base_dir.join(format!("{logical_name}.{ext}")))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"image").unwrap();
    }

    #[test]
    fn matches_normalised_prefix_with_uppercase_extension() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("marduk_sello.PNG");
        touch(&file);

        let found = find_asset("Marduk", Some(temp.path()), &ImageExtensions::default());
        assert_eq!(found, Some(file));
    }

    #[test]
    fn matches_names_with_accents_and_spaces() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("nested/Asarú Alim.jpg");
        touch(&file);

        let found = find_asset("ASARUALIM", Some(temp.path()), &ImageExtensions::default());
        assert_eq!(found, Some(file));
    }

    #[test]
    fn unknown_name_returns_none() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("marduk.png"));

        assert_eq!(
            find_asset("Unknown", Some(temp.path()), &ImageExtensions::default()),
            None
        );
    }

    #[test]
    fn ignores_non_image_files() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("tutu.txt"));
        touch(&temp.path().join("tutu.gif"));

        assert_eq!(
            find_asset("TUTU", Some(temp.path()), &ImageExtensions::default()),
            None
        );
    }

    #[test]
    fn missing_or_stale_base_directory_returns_none() {
        let temp = tempdir().unwrap();
        let stale = temp.path().join("removed");

        assert_eq!(find_asset("Marduk", None, &ImageExtensions::default()), None);
        assert_eq!(
            find_asset("Marduk", Some(stale.as_path()), &ImageExtensions::default()),
            None
        );

        let file = temp.path().join("file.png");
        touch(&file);
        assert_eq!(
            find_asset("file", Some(file.as_path()), &ImageExtensions::default()),
            None
        );
    }

    #[test]
    fn files_are_checked_before_subdirectories() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("a/zisi.png"));
        let top = root.join("zisi_top.png");
        touch(&top);

        let found = find_asset("Zisi", Some(root), &ImageExtensions::default());
        assert_eq!(found, Some(top));
    }

    #[test]
    fn first_match_in_name_order_wins() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("b/gil_2.png"));
        touch(&root.join("a/gil_9.png"));
        touch(&root.join("a/gilma.png"));

        let extensions = ImageExtensions::default();
        let found = find_asset("GIL", Some(root), &extensions);
        assert_eq!(found, Some(root.join("a/gil_9.png")));
        assert_eq!(find_asset("GIL", Some(root), &extensions), found);
    }

    #[test]
    fn matches_after_full_case_folding() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let street = root.join("strasse.png");
        let ka = root.join("क_sello.png");
        touch(&street);
        touch(&ka);

        let extensions = ImageExtensions::default();
        assert_eq!(find_asset("Straße", Some(root), &extensions), Some(street));
        assert_eq!(find_asset("कि", Some(root), &extensions), Some(ka));
    }

    #[cfg(unix)]
    #[test]
    fn skips_unreadable_subdirectories() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = temp.path();
        let locked = root.join("a_locked");
        touch(&locked.join("marduk.png"));
        let readable = root.join("b/marduk_sello.png");
        touch(&readable);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let locked_is_readable = fs::read_dir(&locked).is_ok();
        let found = find_asset("Marduk", Some(root), &ImageExtensions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not restrict a privileged user.
        if locked_is_readable {
            return;
        }
        assert_eq!(found, Some(readable));
    }

    #[test]
    fn exact_match_stays_inside_base_directory() {
        let temp = tempdir().unwrap();
        let base = temp.path().join("base");
        fs::create_dir_all(&base).unwrap();
        touch(&temp.path().join("outside.png"));
        touch(&base.join("inside.png"));

        let extensions = ImageExtensions::default();
        assert_eq!(exact_match("../outside", &base, &extensions), None);
        let absolute = temp.path().join("outside");
        assert_eq!(exact_match(&absolute.to_string_lossy(), &base, &extensions), None);
        assert_eq!(exact_match("inside", &base, &extensions), Some(base.join("inside.png")));
    }

    #[test]
    fn exact_match_tries_extensions_in_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("Zahrim.jpeg"));
        touch(&root.join("Zahrim.jpg"));

        let found = exact_match("Zahrim", root, &ImageExtensions::default());
        assert_eq!(found, Some(root.join("Zahrim.jpg")));
        assert_eq!(exact_match("Zahgurim", root, &ImageExtensions::default()), None);
    }
}
