//! # DocumentStore: Persistence Boundary
//!
//! A minimal document-database abstraction: collections of JSON documents
//! keyed by string id, nested sub-collections under documents, and a small
//! query language (equality filters, id exclusion, single-field ordering,
//! inclusive range bounds, limit).
//!
//! Ordering compares values by type first (null < bool < number < string <
//! array < object), then by value. Documents missing the ordered field are
//! left out of ordered queries.

use async_lock::RwLock;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use streamr_core::{Result, StreamrError};
use uuid::Uuid;

/// Stored document body
pub type Fields = Map<String, Value>;

/// Upper bound appended to a prefix to form a prefix range
pub const PREFIX_SENTINEL: char = '\u{f8ff}';

/// Address of a collection: `videos`, `videos/{id}/comments`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Top-level collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Sub-collection `name` under document `doc_id` of this collection
    pub fn sub(&self, doc_id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(doc_id.into());
        segments.push(name.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// A document and its id
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Decode into a record, exposing the document id as the `id` field.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            StreamrError::serialization(format!("document {}: {e}", self.id))
        })
    }
}

/// Encode a record as a document body, dropping any `id` field.
pub fn to_fields<T: serde::Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(StreamrError::serialization(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Query filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field == value`
    Eq { field: String, value: Value },
    /// Document id differs from the given id
    IdNotEq(String),
}

impl Filter {
    fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Eq { field, value } => doc.get(field) == Some(value),
            Filter::IdNotEq(id) => doc.id != *id,
        }
    }
}

/// Collection query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order_by: Option<(String, Direction)>,
    start_at: Option<Value>,
    end_at: Option<Value>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents whose `field` starts with `prefix`, ordered by that field
    pub fn prefix(field: impl Into<String>, prefix: &str) -> Self {
        Self::new()
            .order_by(field, Direction::Asc)
            .start_at(prefix)
            .end_at(format!("{prefix}{PREFIX_SENTINEL}"))
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn where_id_ne(mut self, id: impl Into<String>) -> Self {
        self.filters.push(Filter::IdNotEq(id.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    /// Inclusive lower bound on the ordered field (upper bound when descending)
    pub fn start_at(mut self, value: impl Into<Value>) -> Self {
        self.start_at = Some(value.into());
        self
    }

    /// Inclusive upper bound on the ordered field (lower bound when descending)
    pub fn end_at(mut self, value: impl Into<Value>) -> Self {
        self.end_at = Some(value.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Evaluate against an in-memory set of documents
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut out: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.filters.iter().all(|f| f.matches(doc)))
            .collect();

        if let Some((field, direction)) = &self.order_by {
            out.retain(|doc| doc.get(field).is_some());
            out.sort_by(|a, b| {
                let ord = compare_values(
                    a.get(field).unwrap_or(&Value::Null),
                    b.get(field).unwrap_or(&Value::Null),
                );
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });

            let (lower, upper) = match direction {
                Direction::Asc => (&self.start_at, &self.end_at),
                Direction::Desc => (&self.end_at, &self.start_at),
            };
            out.retain(|doc| {
                let v = doc.get(field).unwrap_or(&Value::Null);
                let above = match lower {
                    Some(lo) => compare_values(v, lo) != Ordering::Less,
                    None => true,
                };
                let below = match upper {
                    Some(hi) => compare_values(v, hi) != Ordering::Greater,
                    None => true,
                };
                above && below
            });
        }

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values used for sorting and range bounds
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ord = compare_values(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>>;

    async fn query(&self, path: &CollectionPath, query: &Query) -> Result<Vec<Document>>;

    /// Insert with a store-assigned id, returning the id
    async fn add(&self, path: &CollectionPath, fields: Fields) -> Result<String>;

    /// Create or overwrite the document `id`
    async fn set(&self, path: &CollectionPath, id: &str, fields: Fields) -> Result<()>;

    /// Merge `fields` into an existing document. Fails if it does not exist.
    async fn update(&self, path: &CollectionPath, id: &str, fields: Fields) -> Result<()>;

    /// Atomically add `delta` to a numeric field (missing counts as 0)
    async fn increment(&self, path: &CollectionPath, id: &str, field: &str, delta: i64)
        -> Result<()>;

    /// Number of documents in a collection
    async fn count(&self, path: &CollectionPath) -> Result<usize> {
        Ok(self.query(path, &Query::new()).await?.len())
    }
}

type Collection = BTreeMap<String, Fields>;

/// Document store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<BTreeMap<CollectionPath, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &CollectionPath, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(path)
            .and_then(|c| c.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn query(&self, path: &CollectionPath, query: &Query) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(path)
            .into_iter()
            .flat_map(|c| c.iter())
            .map(|(id, fields)| Document::new(id.clone(), fields.clone()));
        Ok(query.apply(docs))
    }

    async fn add(&self, path: &CollectionPath, fields: Fields) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(path.clone())
            .or_default()
            .insert(id.clone(), fields);
        tracing::debug!(collection = %path, id = %id, "Document added");
        Ok(id)
    }

    async fn set(&self, path: &CollectionPath, id: &str, fields: Fields) -> Result<()> {
        self.collections
            .write()
            .await
            .entry(path.clone())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update(&self, path: &CollectionPath, id: &str, fields: Fields) -> Result<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(path)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| StreamrError::not_found(format!("{path}/{id}")))?;
        doc.extend(fields);
        Ok(())
    }

    async fn increment(
        &self,
        path: &CollectionPath,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(path)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| StreamrError::not_found(format!("{path}/{id}")))?;
        let current = match doc.get(field) {
            None | Some(Value::Null) => 0,
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
                StreamrError::invalid(format!("{path}/{id}.{field} is not an integer"))
            })?,
            Some(_) => {
                return Err(StreamrError::invalid(format!(
                    "{path}/{id}.{field} is not numeric"
                )))
            }
        };
        doc.insert(field.to_string(), Value::from(current.saturating_add(delta)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    async fn seeded() -> (InMemoryDocumentStore, CollectionPath) {
        let store = InMemoryDocumentStore::new();
        let videos = CollectionPath::new("videos");
        for (id, title, views) in [
            ("a", "Rust in 10 minutes", 500),
            ("b", "Rustaceans unite", 1500),
            ("c", "Cooking pasta", 90),
        ] {
            store
                .set(&videos, id, fields(json!({ "title": title, "views": views })))
                .await
                .unwrap();
        }
        (store, videos)
    }

    #[tokio::test]
    async fn test_order_and_limit() {
        let (store, videos) = seeded().await;
        let docs = store
            .query(&videos, &Query::new().order_by("views", Direction::Desc).limit(2))
            .await
            .unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_prefix_range() {
        let (store, videos) = seeded().await;
        let docs = store.query(&videos, &Query::prefix("title", "Rust")).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let none = store.query(&videos, &Query::prefix("title", "rust")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_id_exclusion_and_equality() {
        let (store, videos) = seeded().await;
        let docs = store
            .query(&videos, &Query::new().where_id_ne("a"))
            .await
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.id != "a"));

        let docs = store
            .query(&videos, &Query::new().where_eq("views", 90))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "c");
    }

    #[tokio::test]
    async fn test_subcollections_are_separate() {
        let (store, videos) = seeded().await;
        let comments = videos.sub("a", "comments");
        assert_eq!(comments.to_string(), "videos/a/comments");
        store.add(&comments, fields(json!({ "text": "hi" }))).await.unwrap();
        assert_eq!(store.count(&comments).await.unwrap(), 1);
        assert_eq!(store.count(&videos).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_merges_and_increment_counts() {
        let (store, videos) = seeded().await;
        store
            .update(&videos, "a", fields(json!({ "title": "Renamed" })))
            .await
            .unwrap();
        store.increment(&videos, "a", "likes", 2).await.unwrap();
        store.increment(&videos, "a", "likes", 1).await.unwrap();

        let doc = store.get(&videos, "a").await.unwrap().unwrap();
        assert_eq!(doc.get("title"), Some(&json!("Renamed")));
        assert_eq!(doc.get("views"), Some(&json!(500)));
        assert_eq!(doc.get("likes"), Some(&json!(3)));

        let err = store.update(&videos, "zzz", Fields::new()).await.unwrap_err();
        assert_matches!(err, StreamrError::NotFound { .. });
        let err = store.increment(&videos, "a", "title", 1).await.unwrap_err();
        assert_matches!(err, StreamrError::Invalid { .. });
    }

    #[test]
    fn test_value_order_ranks_types() {
        assert_eq!(compare_values(&json!(5), &json!("5")), Ordering::Less);
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!(2.5), &json!(2)), Ordering::Greater);
    }

    #[test]
    fn test_decode_injects_id() {
        #[derive(serde::Deserialize)]
        struct Row {
            id: String,
            title: String,
        }
        let doc = Document::new("x1", fields(json!({ "title": "t" })));
        let row: Row = doc.decode().unwrap();
        assert_eq!(row.id, "x1");
        assert_eq!(row.title, "t");
    }
}
