//! Release tag normalization and order-preserving deduplication.

use std::collections::HashSet;
use std::fmt;

/// Prefix used by projects that namespace release tags (e.g. `version/2024.1.0`).
const VERSION_NAMESPACE_PREFIX: &str = "version/";

/// A normalized version identifier derived from a raw release tag.
///
/// Constructed only through [`VersionTag::from_raw`] (or [`VersionTag::new`] for
/// already-normalized strings), so the inner string is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    /// Normalizes a raw release tag.
    ///
    /// Surrounding whitespace is trimmed, then a literal `version/` prefix is
    /// stripped, then a single leading `v`. Returns `None` when nothing is left.
    ///
    /// ```
    /// use release_probe_core::release::VersionTag;
    ///
    /// assert_eq!(VersionTag::from_raw("v1.2.3").unwrap().as_str(), "1.2.3");
    /// assert_eq!(VersionTag::from_raw("version/2024.1.0").unwrap().as_str(), "2024.1.0");
    /// assert!(VersionTag::from_raw("v").is_none());
    /// ```
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        let normalized = normalize_tag(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized.to_string()))
        }
    }

    /// Wraps an already-normalized version string. Returns `None` for empty input.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Option<Self> {
        let version = version.into();
        if version.is_empty() {
            None
        } else {
            Some(Self(version))
        }
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strips `version/` then one leading `v`, after trimming whitespace.
#[must_use]
pub fn normalize_tag(raw: &str) -> &str {
    let tag = raw.trim();
    let tag = tag.strip_prefix(VERSION_NAMESPACE_PREFIX).unwrap_or(tag);
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Ordered set of versions: first occurrence wins, later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct VersionList {
    versions: Vec<VersionTag>,
    seen: HashSet<String>,
}

impl VersionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag` unless an equal tag is already present.
    ///
    /// Returns `true` when the tag was new.
    pub fn push(&mut self, tag: VersionTag) -> bool {
        if self.seen.contains(tag.as_str()) {
            return false;
        }
        self.seen.insert(tag.as_str().to_string());
        self.versions.push(tag);
        true
    }

    /// Normalizes `raw` and appends it. Empty and duplicate tags are skipped.
    pub fn push_raw(&mut self, raw: &str) -> bool {
        VersionTag::from_raw(raw).is_some_and(|tag| self.push(tag))
    }

    /// Number of distinct versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the list holds no versions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterates versions in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, VersionTag> {
        self.versions.iter()
    }

    /// Returns the versions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[VersionTag] {
        &self.versions
    }
}

impl<'a> IntoIterator for &'a VersionList {
    type Item = &'a VersionTag;
    type IntoIter = std::slice::Iter<'a, VersionTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for VersionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for raw in iter {
            list.push_raw(raw.as_ref());
        }
        list
    }
}
