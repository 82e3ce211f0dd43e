//! Canonical, key-ordered serialization of response records.

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Converts a record into a mapping whose top-level keys are in
/// lexicographic order. Nested objects keep their natural shape.
///
/// This is a presentation concern only: it shapes what goes back to the
/// client, never what is persisted.
pub fn canonicalize<T: Serialize>(record: &T) -> Result<BTreeMap<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields.into_iter().collect()),
        _ => Err(AppError::Serialize(serde_json::Error::custom(
            "record did not serialize to an object",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_top_level_keys_lexicographically() {
        let record = serde_json::json!({
            "zeta": 1,
            "alpha": 2,
            "mid": 3,
        });

        let canonical = canonicalize(&record).unwrap();
        let keys: Vec<&str> = canonical.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn leaves_nested_objects_untouched() {
        let record = serde_json::json!({
            "meta": {"position": {"x": 522, "y": 420}, "font_size": 64},
            "a": 1,
        });

        let canonical = canonicalize(&record).unwrap();
        assert_eq!(canonical["meta"]["position"]["x"], 522);
        assert_eq!(canonical["meta"]["font_size"], 64);
    }

    #[test]
    fn rejects_non_object_records() {
        assert!(canonicalize(&vec![1, 2, 3]).is_err());
        assert!(canonicalize(&"just a string").is_err());
    }
}
