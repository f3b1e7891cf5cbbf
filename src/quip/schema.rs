//! # Shape Validation
//!
//! Every quote that enters quip from outside the process (the durable store,
//! an imported file, a remote payload) arrives as untyped JSON. This module is
//! the only place that turns a [`serde_json::Value`] into a [`Quote`]: each
//! element either becomes a fully typed quote or a [`Rejection`] saying why it
//! was refused. Nothing partially trusted leaves this module.
//!
//! The three sources differ only in how they treat `updatedAt`:
//!
//! | source            | `text`/`category`  | `updatedAt`                         |
//! |-------------------|--------------------|-------------------------------------|
//! | [`Strictness::Stored`] | non-empty string | optional; unparseable values dropped |
//! | [`Strictness::Import`] | non-empty string | optional; must parse when present    |
//! | [`Strictness::Remote`] | non-empty string | required; must parse                 |
//!
//! Values are kept exactly as received (no trimming), since merge identity is
//! the untrimmed (text, category) pair. A category named `All` is refused at
//! every level: it is the filter that means every category.

use crate::model::{timestamp, Quote, ALL_CATEGORIES};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    Stored,
    Import,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("not a JSON object")]
    NotAnObject,
    #[error("missing `{0}`")]
    Missing(&'static str),
    #[error("`{0}` is not a string")]
    NotAString(&'static str),
    #[error("`{0}` is empty")]
    Empty(&'static str),
    #[error("`{0}` uses the reserved name \"All\"")]
    Reserved(&'static str),
    #[error("`updatedAt` is not a valid timestamp: {0}")]
    BadTimestamp(String),
}

/// Rejection of a whole list (import is all-or-nothing).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListRejection {
    #[error("expected a JSON array of quotes")]
    NotAList,
    #[error("entry {index}: {reason}")]
    Entry { index: usize, reason: Rejection },
}

/// Result of validating a list element by element.
#[derive(Debug, Default)]
pub struct Validated {
    pub accepted: Vec<Quote>,
    pub rejected: Vec<(usize, Rejection)>,
}

pub fn validate_entry(value: &Value, strictness: Strictness) -> Result<Quote, Rejection> {
    let object = value.as_object().ok_or(Rejection::NotAnObject)?;
    let text = required_string(object, "text")?;
    let category = required_string(object, "category")?;
    if category == ALL_CATEGORIES {
        return Err(Rejection::Reserved("category"));
    }

    let updated_at = match (object.get("updatedAt"), strictness) {
        (None | Some(Value::Null), Strictness::Remote) => {
            return Err(Rejection::Missing("updatedAt"))
        }
        (None | Some(Value::Null), _) => None,
        (Some(Value::String(raw)), Strictness::Stored) => timestamp::parse(raw),
        (Some(_), Strictness::Stored) => None,
        (Some(Value::String(raw)), _) => Some(
            timestamp::parse(raw).ok_or_else(|| Rejection::BadTimestamp(raw.clone()))?,
        ),
        (Some(_), _) => return Err(Rejection::NotAString("updatedAt")),
    };

    Ok(Quote {
        text,
        category,
        updated_at,
    })
}

/// Validates every element, keeping the good ones and recording the rest.
pub fn partition(values: &[Value], strictness: Strictness) -> Validated {
    let mut validated = Validated::default();
    for (index, value) in values.iter().enumerate() {
        match validate_entry(value, strictness) {
            Ok(quote) => validated.accepted.push(quote),
            Err(reason) => validated.rejected.push((index, reason)),
        }
    }
    validated
}

/// All-or-nothing validation: the first bad element rejects the list.
pub fn validate_all(value: &Value, strictness: Strictness) -> Result<Vec<Quote>, ListRejection> {
    let values = value.as_array().ok_or(ListRejection::NotAList)?;
    values
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            validate_entry(entry, strictness).map_err(|reason| ListRejection::Entry { index, reason })
        })
        .collect()
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String, Rejection> {
    match object.get(field) {
        None | Some(Value::Null) => Err(Rejection::Missing(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(Rejection::Empty(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Rejection::NotAString(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_entry_for_stored_and_import() {
        let value = json!({"text": "Q", "category": "C"});
        for strictness in [Strictness::Stored, Strictness::Import] {
            let quote = validate_entry(&value, strictness).unwrap();
            assert_eq!(quote, Quote::undated("Q", "C"));
        }
    }

    #[test]
    fn remote_requires_timestamp() {
        let value = json!({"text": "Q", "category": "C"});
        assert_eq!(
            validate_entry(&value, Strictness::Remote),
            Err(Rejection::Missing("updatedAt"))
        );

        let dated = json!({"text": "Q", "category": "C", "updatedAt": "2024-03-01T12:00:00Z"});
        assert!(validate_entry(&dated, Strictness::Remote)
            .unwrap()
            .updated_at
            .is_some());
    }

    #[test]
    fn stored_entries_lose_bad_timestamps_but_survive() {
        let value = json!({"text": "Q", "category": "C", "updatedAt": "not a date"});
        let quote = validate_entry(&value, Strictness::Stored).unwrap();
        assert!(quote.updated_at.is_none());

        let numeric = json!({"text": "Q", "category": "C", "updatedAt": 12});
        assert!(validate_entry(&numeric, Strictness::Stored).is_ok());
    }

    #[test]
    fn import_rejects_bad_timestamps() {
        let value = json!({"text": "Q", "category": "C", "updatedAt": "not a date"});
        assert!(matches!(
            validate_entry(&value, Strictness::Import),
            Err(Rejection::BadTimestamp(_))
        ));
        let numeric = json!({"text": "Q", "category": "C", "updatedAt": 12});
        assert_eq!(
            validate_entry(&numeric, Strictness::Import),
            Err(Rejection::NotAString("updatedAt"))
        );
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert_eq!(
            validate_entry(&json!("Q"), Strictness::Stored),
            Err(Rejection::NotAnObject)
        );
        assert_eq!(
            validate_entry(&json!({"category": "C"}), Strictness::Stored),
            Err(Rejection::Missing("text"))
        );
        assert_eq!(
            validate_entry(&json!({"text": "Q", "category": 3}), Strictness::Stored),
            Err(Rejection::NotAString("category"))
        );
        assert_eq!(
            validate_entry(&json!({"text": "  ", "category": "C"}), Strictness::Stored),
            Err(Rejection::Empty("text"))
        );
    }

    #[test]
    fn all_is_never_a_category() {
        let stored = json!({"text": "Q", "category": "All"});
        let remote = json!({"text": "Q", "category": "All", "updatedAt": "2024-01-01"});
        for (value, strictness) in [
            (&stored, Strictness::Stored),
            (&stored, Strictness::Import),
            (&remote, Strictness::Remote),
        ] {
            assert_eq!(
                validate_entry(value, strictness),
                Err(Rejection::Reserved("category"))
            );
        }

        let listed = json!([{"text": "A", "category": "C"}, stored]);
        assert_eq!(
            validate_all(&listed, Strictness::Import),
            Err(ListRejection::Entry {
                index: 1,
                reason: Rejection::Reserved("category")
            })
        );
        let values = vec![json!({"text": "A", "category": "C", "updatedAt": "2024-01-01"}), remote];
        let validated = partition(&values, Strictness::Remote);
        assert_eq!(validated.accepted.len(), 1);
        assert_eq!(validated.rejected, vec![(1, Rejection::Reserved("category"))]);
    }

    #[test]
    fn keeps_values_untrimmed() {
        let quote =
            validate_entry(&json!({"text": " Q ", "category": "C"}), Strictness::Stored).unwrap();
        assert_eq!(quote.text, " Q ");
    }

    #[test]
    fn partition_reports_rejected_indexes() {
        let values = vec![
            json!({"text": "A", "category": "C"}),
            json!(42),
            json!({"text": "B", "category": ""}),
        ];
        let validated = partition(&values, Strictness::Stored);
        assert_eq!(validated.accepted.len(), 1);
        let indexes: Vec<_> = validated.rejected.iter().map(|(i, _)| *i).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn validate_all_is_all_or_nothing() {
        let good = json!([{"text": "A", "category": "C"}, {"text": "B", "category": "D"}]);
        assert_eq!(validate_all(&good, Strictness::Import).unwrap().len(), 2);

        let bad = json!([{"text": "A", "category": "C"}, {"text": "B"}]);
        assert_eq!(
            validate_all(&bad, Strictness::Import),
            Err(ListRejection::Entry {
                index: 1,
                reason: Rejection::Missing("category")
            })
        );

        assert_eq!(
            validate_all(&json!({"text": "A"}), Strictness::Import),
            Err(ListRejection::NotAList)
        );
    }
}
