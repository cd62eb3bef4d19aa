//! Query types understood by every document store backend.
//!
//! Filters are evaluated against raw JSON documents. Ordering follows the
//! usual document-database convention: values compare first by type class
//! (null < numbers < strings < objects < arrays < booleans) and then by value,
//! with a missing field treated as null.

use std::cmp::Ordering;

use serde_json::Value;

use super::Document;

/// A predicate on a single document.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value exactly.
    Eq { field: String, value: Value },

    /// Numeric field is greater than or equal to the bound.
    Gte { field: String, value: f64 },

    /// String field, or any string element of an array field, contains the
    /// needle ignoring case.
    ContainsIgnoreCase { field: String, needle: String },

    /// At least one of the nested filters matches.
    Or(Vec<Filter>),
}

impl Filter {
    /// Create an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an inclusive lower-bound filter.
    pub fn gte(field: impl Into<String>, value: f64) -> Self {
        Self::Gte {
            field: field.into(),
            value,
        }
    }

    /// Create a case-insensitive substring filter.
    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Create a disjunction.
    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }

    /// Check if a document matches this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Eq { field, value } => match doc.get(field) {
                Some(v) => v == value,
                None => value.is_null(),
            },
            Self::Gte { field, value } => doc
                .get(field)
                .and_then(Value::as_f64)
                .is_some_and(|v| v >= *value),
            Self::ContainsIgnoreCase { field, needle } => {
                let needle = needle.to_lowercase();
                match doc.get(field) {
                    Some(Value::String(s)) => s.to_lowercase().contains(&needle),
                    Some(Value::Array(items)) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|s| s.to_lowercase().contains(&needle)),
                    _ => false,
                }
            }
            Self::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-field sort order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Compare two documents on this sort's field.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ord = compare_values(a.get(&self.field), b.get(&self.field));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// A find request: conjunction of filters plus an optional sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
}

impl FindQuery {
    /// A query matching every document in store-native order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a filter (all filters must match).
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the sort order.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Check if a document satisfies every filter.
    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Filter and order a sequence of documents.
    ///
    /// The sort is stable, so ties keep their input order.
    pub fn apply<'a, I>(&self, docs: I) -> Vec<Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut matched: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.matches(doc))
            .cloned()
            .collect();

        if let Some(sort) = &self.sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        matched
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Total order over optional JSON values used for sorting.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let by_type = type_rank(a).cmp(&type_rank(b));
    if by_type != Ordering::Equal {
        return by_type;
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Array(x)), Some(Value::Array(y))) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ord = compare_values(Some(l), Some(r));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => Ordering::Equal,
    }
}
