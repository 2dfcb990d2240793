//! Product categories and merchandising badges.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string names no known category or badge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown badge: {0}")]
    UnknownBadge(String),
}

/// The fixed set of jewelry categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Necklaces,
    Earrings,
    Rings,
    Bracelets,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Necklaces, Self::Earrings, Self::Rings, Self::Bracelets];

    /// Machine name, as stored in the database and used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Necklaces => "necklaces",
            Self::Earrings => "earrings",
            Self::Rings => "rings",
            Self::Bracelets => "bracelets",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Necklaces => "Necklaces",
            Self::Earrings => "Earrings",
            Self::Rings => "Rings",
            Self::Bracelets => "Bracelets",
        }
    }

    /// Parse a comma-separated list, ignoring blanks and unknown names.
    ///
    /// ```
    /// use aurelia_core::Category;
    ///
    /// let cats = Category::parse_list("rings, Earrings,,tiaras");
    /// assert_eq!(cats, vec![Category::Rings, Category::Earrings]);
    /// ```
    #[must_use]
    pub fn parse_list(s: &str) -> Vec<Self> {
        let mut out = Vec::new();
        for cat in s.split(',').filter_map(|part| part.parse::<Self>().ok()) {
            if !out.contains(&cat) {
                out.push(cat);
            }
        }
        out
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryError::UnknownCategory(trimmed.to_owned()))
    }
}

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    New,
    Limited,
    Bestseller,
}

impl Badge {
    /// Display text, also the stored form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Limited => "Limited",
            Self::Bestseller => "Bestseller",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Badge {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "limited" => Ok(Self::Limited),
            "bestseller" => Ok(Self::Bestseller),
            other => Err(CategoryError::UnknownBadge(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("RINGS".parse::<Category>().unwrap(), Category::Rings);
        assert_eq!(" necklaces ".parse::<Category>().unwrap(), Category::Necklaces);
        assert!("tiaras".parse::<Category>().is_err());
    }

    #[test]
    fn test_parse_list_dedups() {
        assert_eq!(
            Category::parse_list("rings,rings,bracelets"),
            vec![Category::Rings, Category::Bracelets]
        );
        assert!(Category::parse_list("").is_empty());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Earrings).unwrap();
        assert_eq!(json, "\"earrings\"");
    }

    #[test]
    fn test_badge_parse() {
        assert_eq!("bestseller".parse::<Badge>().unwrap(), Badge::Bestseller);
        assert_eq!("New".parse::<Badge>().unwrap(), Badge::New);
        assert!("sale".parse::<Badge>().is_err());
    }
}
