use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{ANSI_BLUE, ANSI_GRAY, ANSI_MAGENTA, ANSI_YELLOW};

/// The closed set of expense categories.
///
/// Each variant carries a fixed storage key, a display label and a badge
/// colour; see [`Category::key`], [`Category::label`] and [`Category::color`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Food,
    Living,
    FixedCost,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Living,
        Category::FixedCost,
        Category::Miscellaneous,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Living => "living",
            Category::FixedCost => "fixed-cost",
            Category::Miscellaneous => "miscellaneous",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Living => "Living",
            Category::FixedCost => "Fixed cost",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Food => ANSI_YELLOW,
            Category::Living => ANSI_BLUE,
            Category::FixedCost => ANSI_MAGENTA,
            Category::Miscellaneous => ANSI_GRAY,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Accepts either the storage key or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_labels() {
        assert_eq!("food".parse::<Category>(), Ok(Category::Food));
        assert_eq!("Fixed-Cost".parse::<Category>(), Ok(Category::FixedCost));
        assert_eq!("fixed cost".parse::<Category>(), Ok(Category::FixedCost));
        assert_eq!(" living ".parse::<Category>(), Ok(Category::Living));
    }

    #[test]
    fn rejects_empty_and_unknown() {
        assert_eq!("".parse::<Category>(), Err(ValidationError::MissingCategory));
        assert_eq!(
            "travel".parse::<Category>(),
            Err(ValidationError::UnknownCategory("travel".into()))
        );
    }

    #[test]
    fn serializes_as_kebab_case_key() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }
}
