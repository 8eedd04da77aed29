//! Category identifiers and the per-pass page snapshot

use serde::{Deserialize, Serialize};

/// Opaque category identifier with value equality.
///
/// Categories arrive from half a dozen places (URL segments, data
/// attributes, admin settings) as strings or numbers; everything is
/// normalized to a trimmed string so `"170"` from a URL equals `170`
/// from the settings form. An absent category is `Option::None` at the
/// call site, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(String);

impl CategoryId {
    /// Normalize a raw value into a category id.
    ///
    /// Returns `None` for values that cannot name a category: empty or
    /// whitespace-only strings. `"0"` is accepted here — rejecting the
    /// zero sentinel is the settings resolver's job, because only
    /// configured categories use `0` to mean "disabled".
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The normalized string form.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Ephemeral snapshot of the current page, rebuilt from the live document
/// on every detection call.
///
/// Never cache one of these across navigations: the whole point of the
/// snapshot is that a stale decision computed from it is discarded and
/// re-derived on the next pass.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Location path, e.g. `/c/announcements/170`
    pub path: String,
    /// Location hash fragment, without the leading `#`
    pub hash: String,
    /// Raw query string, without the leading `?`
    pub query: String,
    /// Value of the first `data-category-id` attribute in the document
    pub category_attr: Option<String>,
    /// Class list of the root container, space separated
    pub root_classes: String,
    /// Content of the category metadata tag
    pub category_meta: Option<String>,
}

impl PageContext {
    /// Snapshot with only a location path, for routed pages.
    #[must_use]
    pub fn with_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_trims() {
        let id = CategoryId::new("  170 ").unwrap();
        assert_eq!(id.as_str(), "170");
    }

    #[test]
    fn category_id_rejects_empty() {
        assert!(CategoryId::new("").is_none());
        assert!(CategoryId::new("   ").is_none());
    }

    #[test]
    fn category_id_keeps_zero() {
        // Detection-side zero is a real value; only settings treat it
        // as the disabled sentinel.
        assert_eq!(CategoryId::new("0").unwrap().as_str(), "0");
    }

    #[test]
    fn category_id_value_equality() {
        assert_eq!(CategoryId::new("170"), CategoryId::new(" 170"));
        assert_eq!(CategoryId::from(170u64), CategoryId::new("170").unwrap());
    }
}
