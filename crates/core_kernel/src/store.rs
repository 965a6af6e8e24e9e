//! The generic entity store contract
//!
//! Every domain entity is persisted through the same narrow port: a
//! collection of JSON documents keyed by UUID and selected with
//! partial-field filters. Adapters implement [`EntityStore`] against a
//! concrete backend - PostgreSQL JSONB tables in `infra_db`, an
//! insertion-ordered vector in `test_utils` for hermetic tests.
//!
//! Each operation is an independent single-document (or single-collection
//! read) call; the contract carries no transaction or isolation guarantee
//! beyond the backend's per-operation atomicity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::pagination::{Page, PageParams};

/// A persistable domain entity.
///
/// `COLLECTION` names the backing collection. The serialized form of the
/// entity is the stored document, so serde field names are the stored (and
/// wire) names.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
}

/// A stored document: the entity fields plus store-managed identity and
/// timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<E> {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: E,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A partial-field match expression over stored documents.
///
/// A filter selects a document when the optional id matches and every filter
/// field is contained in the document (JSON containment, see [`contains`]).
/// Filters are built explicitly by callers; there is no reflective query
/// construction.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    id: Option<Uuid>,
    fields: Map<String, Value>,
}

impl Filter {
    /// An empty filter, matching every document in the collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching a single document by id
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Filter built from a prepared set of field matches
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { id: None, fields }
    }

    /// Adds a field equality match
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The id constraint, if any
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The field constraints
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The field constraints as a JSON object value
    pub fn fields_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// True when the filter constrains nothing
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.fields.is_empty()
    }

    /// Reference matching semantics, shared by the in-memory adapter and the
    /// test suite. The PostgreSQL adapter expresses the same predicate as
    /// `id = $id AND doc @> $fields`.
    pub fn matches(&self, id: Uuid, doc: &Value) -> bool {
        if let Some(want) = self.id {
            if want != id {
                return false;
            }
        }
        self.fields
            .iter()
            .all(|(name, expected)| doc.get(name).is_some_and(|found| contains(found, expected)))
    }
}

/// JSON containment: objects must contain every expected member, arrays
/// every expected element, scalars must be equal. Mirrors PostgreSQL's `@>`
/// operator so both adapters agree on what a filter selects.
pub fn contains(doc: &Value, expected: &Value) -> bool {
    match (doc, expected) {
        (Value::Object(doc), Value::Object(expected)) => expected
            .iter()
            .all(|(k, v)| doc.get(k).is_some_and(|dv| contains(dv, v))),
        (Value::Array(doc), Value::Array(expected)) => expected
            .iter()
            .all(|ev| doc.iter().any(|dv| contains(dv, ev))),
        (doc, expected) => doc == expected,
    }
}

/// A set of top-level field replacements merged into a stored document.
/// Fields absent from the patch are left untouched.
#[derive(Debug, Clone, Default)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// An empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a patch from anything serializing to a JSON object. `None`
    /// fields must be skipped by the source type's serde attributes so they
    /// do not overwrite stored values with null.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, StoreError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(StoreError::Serialization(format!(
                "patch must serialize to an object, got {other}"
            ))),
            Err(e) => Err(StoreError::Serialization(e.to_string())),
        }
    }

    /// Adds a single field replacement
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The patch as a JSON object value
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Merges the patch into a document in place. The PostgreSQL adapter
    /// expresses the same merge as `doc || $patch`.
    pub fn apply(&self, doc: &mut Value) {
        if let Value::Object(target) = doc {
            for (name, value) in &self.0 {
                target.insert(name.clone(), value.clone());
            }
        }
    }
}

/// Errors surfaced by store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the backing store
    #[error("Failed to connect to store: {0}")]
    Connection(String),

    /// The operation itself failed
    #[error("Query failed: {0}")]
    Query(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Any other constraint violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A document could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl StoreError {
    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::Duplicate(_) | StoreError::Constraint(_))
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::PoolExhausted
        )
    }
}

/// The entity store port.
///
/// `find_one`, `update` and `remove` return `None` for absence; `update` and
/// `remove` affect at most one document - the first in listing order that
/// matches the filter. Listing order is stable creation order, identical
/// between `find_all` and paginated reads.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Persists a new document and returns it with generated id and
    /// timestamps
    async fn create(&self, data: E) -> Result<Document<E>, StoreError>;

    /// Returns the first document matching the filter
    async fn find_one(&self, filter: &Filter) -> Result<Option<Document<E>>, StoreError>;

    /// Returns all documents matching the filter in creation order
    async fn find_all(&self, filter: &Filter) -> Result<Vec<Document<E>>, StoreError>;

    /// Returns one page of matching documents plus the total match count
    async fn find_all_with_pagination(
        &self,
        filter: &Filter,
        params: &PageParams,
    ) -> Result<Page<Document<E>>, StoreError>;

    /// Merges the patch into the first matching document
    async fn update(&self, filter: &Filter, patch: &Patch)
        -> Result<Option<Document<E>>, StoreError>;

    /// Deletes the first matching document and returns it
    async fn remove(&self, filter: &Filter) -> Result<Option<Document<E>>, StoreError>;
}
