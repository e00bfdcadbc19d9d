//! Product categories and category filters.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a string does not name a known [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

/// The fixed set of product categories sold by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cleanser,
    Serum,
    Moisturizer,
    Mask,
}

impl Category {
    /// Every category, in tab display order.
    pub const ALL: [Self; 4] = [Self::Cleanser, Self::Serum, Self::Moisturizer, Self::Mask];

    /// The lowercase token used in catalog data and category tabs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cleanser => "cleanser",
            Self::Serum => "serum",
            Self::Moisturizer => "moisturizer",
            Self::Mask => "mask",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match against [`Category::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A category tab selection.
///
/// Parsing never fails: the sentinel `"all"` selects everything, an exact
/// category token selects that category, and anything else is kept as
/// [`CategoryFilter::Unmatched`], which matches no product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    Unmatched(String),
}

impl CategoryFilter {
    /// The sentinel that selects every category.
    pub const ALL_SENTINEL: &'static str = "all";

    /// Parse a tab value.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == Self::ALL_SENTINEL {
            return Self::All;
        }
        s.parse::<Category>()
            .map_or_else(|_| Self::Unmatched(s.to_owned()), Self::Only)
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == category,
            Self::Unmatched(_) => false,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_SENTINEL),
            Self::Only(category) => write!(f, "{category}"),
            Self::Unmatched(raw) => f.write_str(raw),
        }
    }
}
