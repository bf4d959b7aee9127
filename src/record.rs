// Generic record trait for any storable entry type

use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt::Debug;

/// Caller-supplied record identifier
pub type RecordId = u64;

/// Core trait that any storable record must implement
///
/// The identifier is not part of the record: it is supplied to
/// [`Store::add`](crate::Store::add) and owned by the store.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + 'static {
    /// Collection name for this record type (e.g., "questions", "runs")
    fn collection_name() -> &'static str
    where
        Self: Sized;

    /// Human-facing singular name used in messages (e.g., "Question")
    fn display_name() -> &'static str
    where
        Self: Sized;

    /// Every field name, in form order
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Fields that get a secondary index
    fn indexed_field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Value of a named field, or None if the record lacks it
    fn field(&self, name: &str) -> Option<&str>;

    /// The defining field shown in result lists and delete confirmations
    fn summary(&self) -> &str;

    /// Current values of the indexed fields
    /// Absent fields are omitted
    fn indexed_fields(&self) -> HashMap<&'static str, &str>
    where
        Self: Sized,
    {
        Self::indexed_field_names()
            .iter()
            .filter_map(|name| self.field(name).map(|value| (*name, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestRecord {
        name: String,
        status: Option<String>,
    }

    impl Record for TestRecord {
        fn collection_name() -> &'static str {
            "test"
        }

        fn display_name() -> &'static str {
            "Test"
        }

        fn field_names() -> &'static [&'static str] {
            &["name", "status"]
        }

        fn indexed_field_names() -> &'static [&'static str] {
            &["status"]
        }

        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "name" => Some(&self.name),
                "status" => self.status.as_deref(),
                _ => None,
            }
        }

        fn summary(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_record_trait_implementation() {
        let record = TestRecord {
            name: "Test".to_string(),
            status: Some("active".to_string()),
        };

        assert_eq!(TestRecord::collection_name(), "test");
        assert_eq!(record.summary(), "Test");
        assert_eq!(record.field("status"), Some("active"));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_indexed_fields_skip_absent() {
        let present = TestRecord {
            name: "a".to_string(),
            status: Some("draft".to_string()),
        };
        let fields = present.indexed_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("status"), Some(&"draft"));

        let absent = TestRecord {
            name: "b".to_string(),
            status: None,
        };
        assert!(absent.indexed_fields().is_empty());
    }
}
