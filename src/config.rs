use crate::error::TreeError;
use crate::filter::NameFilter;

/// Settings every node consults while enumerating.
///
/// Immutable once built. Nodes share it through an `Arc`, so swapping in a
/// new config (see [`RootSet::set_config`](crate::RootSet::set_config)) only
/// reaches nodes built afterwards; existing nodes keep the filter they were
/// created with.
#[derive(Debug, Clone, Default)]
pub struct TraversalConfig {
    filter: NameFilter,
}

impl TraversalConfig {
    /// Case-sensitive config filtering files by `pattern`.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidPattern`] if the glob does not parse.
    pub fn new(pattern: impl Into<String>) -> Result<Self, TreeError> {
        Ok(Self {
            filter: NameFilter::new(pattern, false)?,
        })
    }

    pub fn with_filter(filter: NameFilter) -> Self {
        Self { filter }
    }

    /// The glob applied to file names. Directories are never filtered.
    pub fn name_pattern(&self) -> &str {
        self.filter.pattern()
    }

    pub fn filter(&self) -> &NameFilter {
        &self.filter
    }
}
