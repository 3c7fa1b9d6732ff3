//! Closed expense category set with a forward-compatible `Other` bucket.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

/// Expense categories as presented to the user.
///
/// Persisted data may contain strings outside this set (older releases,
/// manual edits); those fold into [`Category::Other`] instead of failing the
/// whole snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDining,
    Transportation,
    Shopping,
    Entertainment,
    BillsAndUtilities,
    Healthcare,
    Travel,
    Education,
    Groceries,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Travel,
        Category::Education,
        Category::Groceries,
        Category::Other,
    ];

    /// Returns the canonical display name, as stored on disk and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Travel => "Travel",
            Self::Education => "Education",
            Self::Groceries => "Groceries",
            Self::Other => "Other",
        }
    }

    /// Parses a category name leniently.
    ///
    /// Matching is trimmed, case-insensitive and NFKC-normalized so that
    /// visually equivalent spellings land in the same bucket. Anything that
    /// still fails to match folds into [`Category::Other`].
    pub fn parse(name: &str) -> Category {
        let norm = normalize(name);
        Category::ALL
            .into_iter()
            .find(|category| normalize(category.as_str()) == norm)
            .unwrap_or(Category::Other)
    }
}

fn normalize(name: &str) -> String {
    name.trim().nfkc().collect::<String>().to_lowercase()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Category::parse(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_canonical_names() {
        assert_eq!(Category::parse("Food & Dining"), Category::FoodAndDining);
        assert_eq!(Category::parse("Travel"), Category::Travel);
        assert_eq!(Category::parse("Other"), Category::Other);
    }

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!(Category::parse("  groceries "), Category::Groceries);
        assert_eq!(Category::parse("BILLS & UTILITIES"), Category::BillsAndUtilities);
    }

    #[test]
    fn unknown_names_fold_into_other() {
        assert_eq!(Category::parse("Cryptocurrency"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
    }

    #[test]
    fn serde_round_trips_display_names() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::FoodAndDining);
    }

    #[test]
    fn serde_tolerates_unknown_strings() {
        let parsed: Category = serde_json::from_str("\"Stocks\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }
}
