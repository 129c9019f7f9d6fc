//! Category filtering for the plans listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Product;

/// Category tabs shown on the plans page, in display order.
pub const CATEGORY_TABS: &[(&str, &str)] = &[
    ("all", "All Plans"),
    ("gaming", "Gaming"),
    ("family", "Family"),
    ("business", "Business"),
    ("student", "Student"),
    ("travel", "Travel"),
];

/// Which products a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category matches, ignoring case.
    Category(String),
}

impl CategoryFilter {
    /// Create a filter for one category.
    pub fn category(name: impl Into<String>) -> Self {
        CategoryFilter::Category(name.into())
    }

    /// Check whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => product.category.eq_ignore_ascii_case(name),
        }
    }

    /// Display label, using the tab name when the category has one.
    pub fn label(&self) -> String {
        let id = match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(name) => name.as_str(),
        };
        CATEGORY_TABS
            .iter()
            .find(|(tab, _)| tab.eq_ignore_ascii_case(id))
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Category(s.to_lowercase()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(name) => write!(f, "{}", name),
        }
    }
}

/// A category tab with the number of products it would show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Tab id (also the filter string).
    pub id: &'static str,
    /// Tab label.
    pub name: &'static str,
    /// Products in the tab.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Gaming".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::category("gaming")
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(CategoryFilter::All.label(), "All Plans");
        assert_eq!(CategoryFilter::category("travel").label(), "Travel");
        assert_eq!(CategoryFilter::category("accessories").label(), "accessories");
    }
}
