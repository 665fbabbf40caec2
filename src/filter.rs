//! Glob filtering of file names.
//!
//! The pattern is matched against the file *name* only, never the full path,
//! and `*` does not cross a `/`. Directories are never filtered.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::TreeError;

/// Compiled file-name filter.
///
/// `""`, `"*"` and `"*.*"` all match every file; the last is the Windows
/// spelling of "everything" and is accepted for the same reason.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    case_insensitive: bool,
    /// `None` matches everything.
    matcher: Option<GlobMatcher>,
}

impl NameFilter {
    /// Compile `pattern`.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidPattern`] if the glob does not parse.
    pub fn new(pattern: impl Into<String>, case_insensitive: bool) -> Result<Self, TreeError> {
        let pattern = pattern.into();

        let matcher = if matches_everything(&pattern) {
            None
        } else {
            let glob = GlobBuilder::new(&pattern)
                .case_insensitive(case_insensitive)
                .literal_separator(true)
                .build()
                .map_err(|source| TreeError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            Some(glob.compile_matcher())
        };

        Ok(Self {
            pattern,
            case_insensitive,
            matcher,
        })
    }

    /// A filter that accepts every file name.
    pub fn any() -> Self {
        Self {
            pattern: "*".to_string(),
            case_insensitive: false,
            matcher: None,
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.matcher {
            Some(m) => m.is_match(name),
            None => true,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::any()
    }
}

fn matches_everything(pattern: &str) -> bool {
    matches!(pattern, "" | "*" | "*.*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_all() {
        let filter = NameFilter::default();
        assert!(filter.is_match("file.txt"));
        assert!(filter.is_match("Makefile"));
        assert!(filter.is_match(".hidden"));
    }

    #[test]
    fn test_windows_star_dot_star_matches_extensionless() {
        let filter = NameFilter::new("*.*", false).unwrap();
        assert!(filter.is_match("README"));
        assert!(filter.is_match("a.b.c"));
    }

    #[test]
    fn test_extension_pattern() {
        let filter = NameFilter::new("*.txt", false).unwrap();
        assert!(filter.is_match("a.txt"));
        assert!(filter.is_match("c.txt"));
        assert!(!filter.is_match("b.log"));
        assert!(!filter.is_match("A.TXT"));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = NameFilter::new("*.txt", true).unwrap();
        assert!(filter.is_match("A.TXT"));
        assert!(filter.is_case_insensitive());
    }

    #[test]
    fn test_braces_and_classes() {
        let filter = NameFilter::new("img[0-9].{png,jpg}", false).unwrap();
        assert!(filter.is_match("img1.png"));
        assert!(filter.is_match("img7.jpg"));
        assert!(!filter.is_match("imgx.png"));
        assert!(!filter.is_match("img1.gif"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NameFilter::new("[unclosed", false).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPattern { .. }));
        assert!(!err.is_recoverable());
    }
}
