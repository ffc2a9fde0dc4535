//! Product list filter

use serde::{Deserialize, Serialize};

/// Optional criteria for listing products
///
/// Both criteria are optional; `None` means "do not filter on this column".
/// When both are set a product must match both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub active: Option<bool>,
}

impl ProductFilter {
    /// Creates a filter on category only
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            active: None,
        }
    }

    /// Restricts the filter to active or inactive products
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Returns true if no criterion is set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.active.is_none()
    }

    /// Evaluates the filter against in-memory fields
    ///
    /// Mirrors `(category IS NULL OR category = ?) AND (active IS NULL OR active = ?)`:
    /// a stored NULL never matches a set criterion.
    pub fn matches(&self, category: Option<&str>, active: Option<bool>) -> bool {
        let category_ok = match &self.category {
            Some(wanted) => category == Some(wanted.as_str()),
            None => true,
        };
        let active_ok = match self.active {
            Some(wanted) => active == Some(wanted),
            None => true,
        };
        category_ok && active_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::default();

        assert!(filter.is_empty());
        assert!(filter.matches(None, None));
        assert!(filter.matches(Some("tools"), Some(false)));
    }

    #[test]
    fn test_both_criteria_must_hold() {
        let filter = ProductFilter::by_category("tools").with_active(true);

        assert!(filter.matches(Some("tools"), Some(true)));
        assert!(!filter.matches(Some("tools"), Some(false)));
        assert!(!filter.matches(Some("garden"), Some(true)));
        assert!(!filter.matches(None, Some(true)));
    }
}
