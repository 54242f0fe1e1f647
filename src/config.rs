//! Configuration for link generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::compiler::DuplicateNames;
use crate::constants::DEFAULT_BASE_URI;

/// Configuration for a [`FastLinks`](crate::FastLinks) instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Absolute URI links are rendered below.
    ///
    /// Validated when the facade is built; one trailing `/` is dropped.
    /// Default: `http://localhost`
    pub base_uri: String,

    /// Which binding wins when path-variable names collide.
    ///
    /// Default: [`DuplicateNames::LastWins`]
    pub duplicate_names: DuplicateNames,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            duplicate_names: DuplicateNames::default(),
        }
    }
}

impl LinkConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Sets the duplicate path-variable name policy.
    #[must_use]
    pub const fn with_duplicate_names(mut self, policy: DuplicateNames) -> Self {
        self.duplicate_names = policy;
        self
    }
}
