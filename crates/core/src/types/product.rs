//! Product identity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product's display name, which doubles as its identity.
///
/// The storefront has no separate SKU: two cart rows refer to the same
/// product exactly when their names agree after whitespace trimming. The
/// original string is preserved for storage and display; comparisons always
/// go through the normalized form.
///
/// Derived equality compares the stored strings verbatim; use
/// [`ProductName::matches`] for identity checks.
///
/// ## Examples
///
/// ```
/// use copper_mango_core::ProductName;
///
/// let stored = ProductName::new("  Wireless Mouse ");
/// assert_eq!(stored.as_str(), "  Wireless Mouse ");
/// assert_eq!(stored.normalized(), "Wireless Mouse");
/// assert!(stored.matches("Wireless Mouse"));
/// assert!(!stored.matches("Wireless"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    /// Create a `ProductName` from a raw string, preserving it verbatim.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create a `ProductName` with the normalization rule already applied.
    ///
    /// Write paths that store the cleaned form use this constructor.
    #[must_use]
    pub fn trimmed(name: &str) -> Self {
        Self(name.trim().to_owned())
    }

    /// Returns the original name, untouched.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the normalized (whitespace-trimmed) form used for identity.
    ///
    /// This is the single normalization rule shared by every comparison
    /// path; merge and removal must not reimplement it.
    #[must_use]
    pub fn normalized(&self) -> &str {
        self.0.trim()
    }

    /// Whether `other` names the same product, comparing both sides in
    /// normalized form.
    ///
    /// Equality is exact after trimming - no case folding, no substring or
    /// prefix matching.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.normalized() == other.trim()
    }

    /// Consumes the `ProductName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for ProductName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
