//! Bulk import of a seed catalog.
//!
//! The seed file is a JSON object mapping each category name to an array of
//! tool objects:
//!
//! ```json
//! { "Writing": [ { "name": "Jasper", "description": "...", "tags": ["Marketing"] } ] }
//! ```

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use super::error::ToolError;
use crate::core::Result;
use crate::core::store::{Document, DocumentStore, ID_FIELD, TOOLS_COLLECTION};

/// Read a seed file and insert every tool it lists.
///
/// Returns the number of tools inserted.
pub async fn import_catalog(store: &dyn DocumentStore, path: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let docs = parse_catalog(&raw)?;
    let count = docs.len();

    store.insert_many(TOOLS_COLLECTION, docs).await?;
    info!(count, path = %path.display(), "Imported seed catalog");
    Ok(count)
}

/// Flatten a category-keyed catalog into tool documents.
pub fn parse_catalog(raw: &str) -> Result<Vec<Document>> {
    let Value::Object(by_category) = serde_json::from_str::<Value>(raw)? else {
        return Err(ToolError::invalid_seed("top level must be an object keyed by category").into());
    };

    let mut docs = Vec::new();
    for (category, tools) in by_category {
        let Value::Array(tools) = tools else {
            return Err(
                ToolError::invalid_seed(format!("category '{}' is not an array", category)).into(),
            );
        };

        for tool in tools {
            let Value::Object(mut doc) = tool else {
                return Err(ToolError::invalid_seed(format!(
                    "entry under '{}' is not an object",
                    category
                ))
                .into());
            };
            if !["name", "description"]
                .iter()
                .all(|field| doc.get(*field).is_some_and(Value::is_string))
            {
                warn!(category = %category, "Skipping seed entry without name or description");
                continue;
            }
            doc.insert("category".to_string(), Value::String(category.clone()));
            normalize(&mut doc);
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// Drop values whose type does not fit the tool record.
fn normalize(doc: &mut Document) {
    doc.remove(ID_FIELD);

    for field in ["rating", "popularityScore"] {
        if doc.get(field).is_some_and(|v| !v.is_number()) {
            warn!(field, value = %doc[field], "Dropping non-numeric seed value");
            doc.remove(field);
        }
    }

    if doc.get("reviewCount").is_some_and(|v| !v.is_u64()) {
        doc.remove("reviewCount");
    }

    match doc.get_mut("tags") {
        Some(Value::Array(tags)) => tags.retain(Value::is_string),
        Some(_) => {
            doc.remove("tags");
        }
        None => {}
    }

    for field in ["price", "releaseDate"] {
        if doc.get(field).is_some_and(|v| !v.is_string()) {
            doc.remove(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{FindQuery, MemoryStore};
    use crate::domains::tools::Tool;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_category_is_taken_from_key() {
        let docs = parse_catalog(
            r#"{"Finance": [{"name": "Plaid", "description": "Banking data"}],
                "Writing": [{"name": "Jasper", "description": "Copy"},
                            {"name": "Grammarly", "description": "Grammar", "category": "ignored"}]}"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 3);
        let pairs: Vec<_> = docs
            .iter()
            .map(|d| (d["name"].as_str().unwrap(), d["category"].as_str().unwrap()))
            .collect();
        assert!(pairs.contains(&("Plaid", "Finance")));
        assert!(pairs.contains(&("Jasper", "Writing")));
        assert!(pairs.contains(&("Grammarly", "Writing")));
    }

    #[test]
    fn test_star_ratings_are_dropped() {
        let docs = parse_catalog(
            r#"{"Finance": [{"name": "Plaid", "description": "x", "rating": "⭐⭐⭐⭐⭐",
                             "tags": ["Banking", 3], "popularityScore": 96, "price": "free"}]}"#,
        )
        .unwrap();

        let doc = &docs[0];
        assert!(doc.get("rating").is_none());
        assert_eq!(doc["tags"], json!(["Banking"]));
        assert_eq!(doc["popularityScore"], 96);
        assert_eq!(doc["price"], "free");
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(parse_catalog("[]").is_err());
        assert!(parse_catalog(r#"{"Writing": {"name": "x"}}"#).is_err());
        assert!(parse_catalog(r#"{"Writing": ["x"]}"#).is_err());
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn test_entries_without_required_text_are_skipped() {
        let docs = parse_catalog(
            r#"{"Writing": [{"name": "Jasper"}, {"name": "Grammarly", "description": "Grammar"},
                            {"name": 7, "description": "Numbers"}]}"#,
        )
        .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "Grammarly");
    }

    #[tokio::test]
    async fn test_import_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tools.json");
        std::fs::write(
            &path,
            r#"{"Chat": [{"name": "ChatGPT", "description": "Assistant", "rating": "⭐⭐⭐⭐"}],
                "Audio": [{"name": "Suno", "description": "Music"}]}"#,
        )
        .unwrap();

        let store = MemoryStore::new();
        let count = import_catalog(&store, &path).await.unwrap();
        assert_eq!(count, 2);

        let docs = store.find(TOOLS_COLLECTION, &FindQuery::all()).await.unwrap();
        assert_eq!(docs.len(), 2);
        for doc in docs {
            let tool = Tool::from_document(doc).unwrap();
            assert_eq!(tool.review_count, 0);
            assert!(tool.rating.is_none());
        }
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let store = MemoryStore::new();
        let result = import_catalog(&store, Path::new("/nonexistent/tools.json")).await;
        assert!(result.is_err());
    }
}
