use chrono::{DateTime, SubsecRound, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Project,
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Merge identity of a quote: exact, case-sensitive (text, category).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// A quote stamped with the current time, at the millisecond precision
    /// `updatedAt` is written with.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self::at(text, category, Utc::now().trunc_subsecs(3))
    }

    pub fn at(text: impl Into<String>, category: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            updated_at: Some(at),
        }
    }

    pub fn undated(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            updated_at: None,
        }
    }

    pub fn key(&self) -> QuoteKey {
        QuoteKey {
            text: self.text.clone(),
            category: self.category.clone(),
        }
    }

    /// Strictly-later comparison used by merge. A missing timestamp is the
    /// earliest possible instant, so an undated quote is never newer.
    pub fn is_newer_than(&self, other: &Quote) -> bool {
        match (self.updated_at, other.updated_at) {
            (Some(mine), Some(theirs)) => mine > theirs,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// The active category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => quote.category == *name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::parse(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static DEFAULT_QUOTES: Lazy<Vec<Quote>> = Lazy::new(|| {
    [
        (
            "The only way to do great work is to love what you do.",
            "Inspiration",
        ),
        (
            "Strive not to be a success, but rather to be of value.",
            "Motivation",
        ),
        ("The mind is everything. What you think you become.", "Mindset"),
        (
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        (
            "The future belongs to those who believe in the beauty of their dreams.",
            "Dreams",
        ),
        (
            "The best way to predict the future is to create it.",
            "Innovation",
        ),
        (
            "Success is not final, failure is not fatal: it is the courage to continue that counts.",
            "Resilience",
        ),
    ]
    .into_iter()
    .map(|(text, category)| Quote::undated(text, category))
    .collect()
});

/// The built-in set used to seed an empty store.
pub fn default_quotes() -> Vec<Quote> {
    DEFAULT_QUOTES.clone()
}

/// ISO-8601 handling for `updatedAt`.
///
/// Reads RFC 3339, naive date-times (taken as UTC) and bare dates (midnight
/// UTC). Writes `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn newer_requires_strictly_later_timestamp() {
        let old = Quote::at("a", "b", at(2020, 1, 1));
        let new = Quote::at("a", "b", at(2021, 1, 1));
        assert!(new.is_newer_than(&old));
        assert!(!old.is_newer_than(&new));
        assert!(!old.is_newer_than(&old.clone()));
    }

    #[test]
    fn missing_timestamp_is_earliest() {
        let dated = Quote::at("a", "b", at(2020, 1, 1));
        let undated = Quote::undated("a", "b");
        assert!(dated.is_newer_than(&undated));
        assert!(!undated.is_newer_than(&dated));
        assert!(!undated.is_newer_than(&Quote::undated("a", "b")));
    }

    #[test]
    fn parses_supported_timestamp_shapes() {
        assert_eq!(
            timestamp::parse("2020-01-01T00:00:00.000Z"),
            Some(at(2020, 1, 1))
        );
        assert_eq!(
            timestamp::parse("2020-01-01T02:00:00+02:00"),
            Some(at(2020, 1, 1))
        );
        assert_eq!(timestamp::parse("2020-01-01T00:00:00"), Some(at(2020, 1, 1)));
        assert_eq!(timestamp::parse("2020-01-01"), Some(at(2020, 1, 1)));
        assert_eq!(timestamp::parse("yesterday"), None);
    }

    #[test]
    fn serializes_in_iso_string_shape() {
        let quote = Quote::at("a", "b", at(2020, 1, 1));
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["updatedAt"], "2020-01-01T00:00:00.000Z");

        let undated = serde_json::to_value(Quote::undated("a", "b")).unwrap();
        assert!(undated.get("updatedAt").is_none());
    }

    #[test]
    fn category_filter_matches_exactly() {
        let quote = Quote::undated("text", "Life");
        assert!(CategoryFilter::All.matches(&quote));
        assert!(CategoryFilter::parse("Life").matches(&quote));
        assert!(!CategoryFilter::parse("life").matches(&quote));
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("Life").to_string(), "Life");
    }

    #[test]
    fn default_set_has_seven_distinct_categories() {
        let defaults = default_quotes();
        assert_eq!(defaults.len(), 7);
        assert!(defaults.iter().all(|q| q.updated_at.is_none()));
        let mut categories: Vec<_> = defaults.iter().map(|q| q.category.as_str()).collect();
        categories.dedup();
        assert_eq!(categories.len(), 7);
    }
}
