// Query filtering for generic records

use crate::record::Record;
use std::str::FromStr;

/// Exact-match constraint on one field
///
/// Matching is case-sensitive string equality. A record that lacks the field
/// never matches. Fields with no filter are wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field name to filter on
    pub field: String,
    /// Value the field must equal
    pub value: String,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check a single record against this filter
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        record.field(&self.field) == Some(self.value.as_str())
    }
}

/// Parses `field=value`
impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid filter: {} (expected field=value)", s))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("Invalid filter: {} (field name cannot be empty)", s));
        }
        Ok(Filter::eq(field, value))
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}
