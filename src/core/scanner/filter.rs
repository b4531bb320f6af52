//! Raw file classification.

use super::RawFile;
use std::collections::HashSet;
use std::path::Path;

/// Raw extensions recognized when none are configured
pub const DEFAULT_RAW_EXTENSIONS: &[&str] = &["raf", "dng"];

/// Lowercase an extension and drop any leading dots (`.RAF` -> `raf`)
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// The true extension of `path`, lowercased. `None` for dotfiles like `.raf`.
pub(crate) fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Decides whether a file is a camera raw file
#[derive(Debug, Clone)]
pub struct RawFilter {
    extensions: HashSet<String>,
}

impl RawFilter {
    /// Create a filter with the default raw extensions
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_RAW_EXTENSIONS.iter().copied())
    }

    /// Create a filter with a custom allow-list
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Check the file's final extension against the allow-list.
    ///
    /// Only the component after the last `.` counts, so `test.RAF.comask`
    /// is not raw.
    pub fn is_raw(&self, path: &Path) -> bool {
        extension_lower(path)
            .map(|ext| self.extensions.contains(&ext))
            .unwrap_or(false)
    }

    /// Classify `path`, keeping its extension when it is raw
    pub fn classify(&self, path: &Path) -> Option<RawFile> {
        extension_lower(path)
            .filter(|ext| self.extensions.contains(ext))
            .map(|extension| RawFile {
                path: path.to_path_buf(),
                extension,
            })
    }

    pub fn extensions(&self) -> &HashSet<String> {
        &self.extensions
    }
}

impl Default for RawFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raf_is_raw_in_any_case() {
        let filter = RawFilter::new();
        assert!(filter.is_raw(Path::new("test.raf")));
        assert!(filter.is_raw(Path::new("test.RAF")));
        assert!(filter.is_raw(Path::new("/photos/2019/DSCF0001.Raf")));
    }

    #[test]
    fn raw_token_mid_name_is_not_raw() {
        let filter = RawFilter::new();
        assert!(!filter.is_raw(Path::new("test.RAF.comask")));
        assert!(!filter.is_raw(Path::new(
            "/Volumes/Raw Media/2019/01/Walk About - DSC24939.RAF.comask"
        )));
        assert!(!filter.is_raw(Path::new("raf_notes.txt")));
    }

    #[test]
    fn previews_are_not_raw() {
        let filter = RawFilter::new();
        assert!(!filter.is_raw(Path::new("test.JPG")));
        assert!(!filter.is_raw(Path::new("test.jpeg")));
    }

    #[test]
    fn dotfile_named_like_extension_is_not_raw() {
        let filter = RawFilter::new();
        assert!(!filter.is_raw(Path::new(".raf")));
        assert!(!filter.is_raw(Path::new("no_extension")));
    }

    #[test]
    fn custom_allow_list_is_normalized() {
        let filter = RawFilter::with_extensions([".DMG", "raf"]);
        assert!(filter.is_raw(Path::new("test.dmg")));
        assert!(filter.is_raw(Path::new("test.raf")));
        assert!(!filter.is_raw(Path::new("test.dng")));
    }

    #[test]
    fn classify_keeps_lowercased_extension() {
        let filter = RawFilter::new();
        let raw = filter.classify(Path::new("/photos/DSCF0001.RAF")).unwrap();
        assert_eq!(raw.extension, "raf");
        assert_eq!(raw.path, Path::new("/photos/DSCF0001.RAF"));
        assert!(filter.classify(Path::new("/photos/DSCF0001.JPG")).is_none());
    }

    #[test]
    fn normalize_strips_dots_and_case() {
        assert_eq!(normalize_extension(".JPG"), "jpg");
        assert_eq!(normalize_extension("Jpeg"), "jpeg");
        assert_eq!(normalize_extension(" raf "), "raf");
    }
}
