//! Sidecar matching: previews that share a raw file's exact stem.

use super::filter::{extension_lower, normalize_extension};
use super::listing::DirListing;
use super::SidecarMatch;
use std::collections::HashSet;
use std::path::Path;

/// Preview extensions recognized when none are configured
pub const DEFAULT_PREVIEW_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Result of matching one raw file against its directory
#[derive(Debug, Default)]
pub struct SidecarLookup {
    /// Sidecars that should be accounted and removed
    pub included: Vec<SidecarMatch>,
    /// Hidden sidecars left out because hidden files are excluded
    pub hidden_skipped: Vec<SidecarMatch>,
}

/// Finds preview files belonging to a raw file
#[derive(Debug, Clone)]
pub struct SidecarMatcher {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl SidecarMatcher {
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_PREVIEW_EXTENSIONS.iter().copied())
    }

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
            include_hidden: false,
        }
    }

    /// Include hidden sidecars (names starting with `.`)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Match `raw` against every regular file in its directory listing.
    ///
    /// Matching is exact-stem: `Foo - 1.raf` matches `Foo - 1.jpg` but never
    /// `Foo - 112.jpg`.
    pub fn find(&self, raw: &Path, listing: &DirListing) -> SidecarLookup {
        let mut lookup = SidecarLookup::default();

        let Some(stem) = raw.file_stem().and_then(|s| s.to_str()) else {
            return lookup;
        };

        for sibling in listing.entries() {
            if sibling.path == raw {
                continue;
            }

            let Some(hidden) = self.classify(stem, &sibling.name) else {
                continue;
            };

            let found = SidecarMatch {
                path: sibling.path.clone(),
                raw: raw.to_path_buf(),
                size_bytes: sibling.size_bytes,
                hidden,
            };

            if hidden && !self.include_hidden {
                lookup.hidden_skipped.push(found);
            } else {
                lookup.included.push(found);
            }
        }

        lookup
    }

    /// `Some(hidden)` when `name` is a sidecar of `stem`, `None` otherwise.
    ///
    /// Hidden companions such as `._IMG_01.JPG` match after their marker is
    /// stripped. The hidden setting plays no part here.
    pub fn classify(&self, stem: &str, name: &str) -> Option<bool> {
        let hidden = name.starts_with('.');

        if self.is_exact_match(stem, name) {
            return Some(hidden);
        }

        if hidden {
            // `._X.jpg` may be the companion of `X` or the dotfile of `_X`
            let unmarked = [name.strip_prefix("._"), name.strip_prefix('.')];
            if unmarked
                .into_iter()
                .flatten()
                .any(|candidate| self.is_exact_match(stem, candidate))
            {
                return Some(true);
            }
        }

        None
    }

    fn is_exact_match(&self, stem: &str, name: &str) -> bool {
        let candidate = Path::new(name);
        let stem_matches = candidate
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s == stem)
            .unwrap_or(false);

        stem_matches
            && extension_lower(candidate)
                .map(|ext| self.extensions.contains(&ext))
                .unwrap_or(false)
    }

    pub fn extensions(&self) -> &HashSet<String> {
        &self.extensions
    }
}

impl Default for SidecarMatcher {
    fn default() -> Self {
        Self::new()
    }
}
