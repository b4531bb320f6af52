//! Numbered duplicate raw detection (`IMG_01-1.RAF` next to `IMG_01.RAF`).
//!
//! Import tools append `-<n>` when a file name is already taken. These copies
//! are reported only; nothing here deletes them.

use super::filter::RawFilter;
use super::listing::DirListing;
use super::DuplicateRaw;
use regex::Regex;
use std::path::Path;

/// Finds numbered copies of a raw file in the same directory
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    raw_filter: RawFilter,
}

impl DuplicateDetector {
    pub fn new(raw_filter: RawFilter) -> Self {
        Self { raw_filter }
    }

    /// Pattern for `<stem>-<digits>.<ext>`; the extension is checked separately
    pub fn pattern_for(stem: &str) -> Regex {
        // An escaped literal followed by fixed syntax always compiles
        Regex::new(&format!(r"^{}-[0-9]+\.[^.]+$", regex::escape(stem)))
            .expect("escaped stem forms a valid pattern")
    }

    /// Check a single file name against a raw stem
    pub fn is_duplicate_name(&self, stem: &str, name: &str) -> bool {
        Self::pattern_for(stem).is_match(name) && self.raw_filter.is_raw(Path::new(name))
    }

    /// Every numbered duplicate of `raw` in its directory listing
    pub fn find(&self, raw: &Path, listing: &DirListing) -> Vec<DuplicateRaw> {
        let Some(stem) = raw.file_stem().and_then(|s| s.to_str()) else {
            return Vec::new();
        };

        let pattern = Self::pattern_for(stem);

        listing
            .entries()
            .iter()
            .filter(|sibling| pattern.is_match(&sibling.name))
            .filter(|sibling| self.raw_filter.is_raw(&sibling.path))
            .map(|sibling| DuplicateRaw {
                raw: raw.to_path_buf(),
                duplicate: sibling.path.clone(),
                size_bytes: sibling.size_bytes,
            })
            .collect()
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new(RawFilter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn numbered_copy_is_a_duplicate() {
        let detector = DuplicateDetector::default();
        assert!(detector.is_duplicate_name("IMG_01", "IMG_01-1.RAF"));
        assert!(detector.is_duplicate_name("IMG_01", "IMG_01-12.raf"));
    }

    #[test]
    fn missing_separator_is_not_a_duplicate() {
        let detector = DuplicateDetector::default();
        assert!(!detector.is_duplicate_name("IMG_01", "IMG_011.RAF"));
    }

    #[test]
    fn non_digit_suffix_is_not_a_duplicate() {
        let detector = DuplicateDetector::default();
        assert!(!detector.is_duplicate_name("IMG_01", "IMG_01-edit.RAF"));
        assert!(!detector.is_duplicate_name("IMG_01", "IMG_01-.RAF"));
    }

    #[test]
    fn numbered_preview_is_not_a_duplicate_raw() {
        let detector = DuplicateDetector::default();
        assert!(!detector.is_duplicate_name("IMG_01", "IMG_01-1.JPG"));
    }

    #[test]
    fn stem_with_regex_metacharacters_is_literal() {
        let detector = DuplicateDetector::default();
        assert!(detector.is_duplicate_name("Walk (1).x", "Walk (1).x-2.RAF"));
        assert!(!detector.is_duplicate_name("Walk (1).x", "Walk (1)yx-2.RAF"));
    }

    #[test]
    fn find_reports_numbered_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let raw = temp_dir.path().join("DSCF0001.RAF");
        File::create(&raw).unwrap();
        File::create(temp_dir.path().join("DSCF0001-1.RAF")).unwrap();
        File::create(temp_dir.path().join("DSCF00011.RAF")).unwrap();
        File::create(temp_dir.path().join("DSCF0001-1.JPG")).unwrap();

        let listing = DirListing::read(temp_dir.path(), false).unwrap();
        let duplicates = DuplicateDetector::default().find(&raw, &listing);

        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].duplicate.ends_with("DSCF0001-1.RAF"));
        assert_eq!(duplicates[0].raw, raw);
    }
}
