//! Path and file-extension helpers shared by the store and the pipeline.
//!
//! Extensions are handled in two spellings: *bare* (`png`, lowercase, no dot),
//! which is what the pipeline threads through its state, and *dotted*
//! (`.png`), which is what ends up in file names.

use std::path::{Component, Path};

/// Extensions the store can encode.
const SAVE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Lowercase extension of `path` without the leading dot, or `""`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pf_core::paths::extension_of;
///
/// assert_eq!(extension_of(Path::new("/data/cat.JPG")), "jpg");
/// assert_eq!(extension_of(Path::new("no_extension")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Lowercase `ext` and strip any leading dot.
pub fn bare_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Lowercase `ext` and make sure it starts with a dot. Empty stays empty.
///
/// # Examples
///
/// ```
/// use pf_core::paths::dotted_extension;
///
/// assert_eq!(dotted_extension("png"), ".png");
/// assert_eq!(dotted_extension(".JPG"), ".jpg");
/// assert_eq!(dotted_extension(""), "");
/// ```
pub fn dotted_extension(ext: &str) -> String {
    let bare = bare_extension(ext);
    if bare.is_empty() {
        bare
    } else {
        format!(".{bare}")
    }
}

/// Whether the store can encode images with this extension.
pub fn is_saveable_extension(ext: &str) -> bool {
    SAVE_EXTENSIONS.contains(&bare_extension(ext).as_str())
}

/// Whether `name` is a single plain file name (no separators, no `..`).
///
/// Names coming from clients are joined onto the storage directory, so
/// anything else would let a request escape it.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("cat.png")), "png");
        assert_eq!(extension_of(Path::new("cat.JPEG")), "jpeg");
        assert_eq!(extension_of(Path::new("/path/to/cat.jpg")), "jpg");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), "gz");
        assert_eq!(extension_of(Path::new(".hidden")), "");
        assert_eq!(extension_of(Path::new("no_extension")), "");
    }

    #[test]
    fn test_bare_extension() {
        assert_eq!(bare_extension(".PNG"), "png");
        assert_eq!(bare_extension("jpg"), "jpg");
        assert_eq!(bare_extension(""), "");
    }

    #[test]
    fn test_is_saveable_extension() {
        assert!(is_saveable_extension("jpg"));
        assert!(is_saveable_extension(".jpeg"));
        assert!(is_saveable_extension("PNG"));

        assert!(!is_saveable_extension("gif"));
        assert!(!is_saveable_extension("webp"));
        assert!(!is_saveable_extension(""));
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("img_20240101120000.png"));
        assert!(is_plain_file_name("no_extension"));

        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name("../etc/passwd"));
        assert!(!is_plain_file_name("sub/cat.png"));
        assert!(!is_plain_file_name("/abs/cat.png"));
        assert!(!is_plain_file_name(".."));
    }
}
