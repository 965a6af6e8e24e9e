//! In-memory entity store adapter
//!
//! An insertion-ordered document collection behind a lock, sharing the
//! kernel's `Filter`/`Patch` reference semantics. This fills the mock
//! adapter slot of the store port: the API test suite exercises the whole
//! HTTP surface against it, no database required.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use core_kernel::{Document, Entity, EntityStore, Filter, Page, PageParams, Patch, StoreError};

#[derive(Debug, Clone)]
struct StoredDoc {
    id: Uuid,
    doc: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Insertion-ordered in-memory collection implementing the store port.
///
/// Cloning shares the underlying collection, mirroring how pool-backed
/// stores share their pool.
pub struct MemoryStore<E> {
    docs: Arc<Mutex<Vec<StoredDoc>>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            docs: Arc::clone(&self.docs),
            _entity: PhantomData,
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MemoryStore<E> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self {
            docs: Arc::new(Mutex::new(Vec::new())),
            _entity: PhantomData,
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    /// True when the collection holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<StoredDoc>>, StoreError> {
        self.docs
            .lock()
            .map_err(|_| StoreError::Query("collection lock poisoned".to_string()))
    }
}

fn into_document<E: Entity>(stored: &StoredDoc) -> Result<Document<E>, StoreError> {
    let data = serde_json::from_value(stored.doc.clone())
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(Document {
        id: stored.id,
        data,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    })
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn create(&self, data: E) -> Result<Document<E>, StoreError> {
        let doc = serde_json::to_value(&data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = Utc::now();
        let stored = StoredDoc {
            id: Uuid::new_v4(),
            doc,
            created_at: now,
            updated_at: now,
        };

        let document = into_document(&stored)?;
        self.lock()?.push(stored);
        Ok(document)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document<E>>, StoreError> {
        let docs = self.lock()?;
        docs.iter()
            .find(|stored| filter.matches(stored.id, &stored.doc))
            .map(into_document)
            .transpose()
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<Document<E>>, StoreError> {
        let docs = self.lock()?;
        docs.iter()
            .filter(|stored| filter.matches(stored.id, &stored.doc))
            .map(into_document)
            .collect()
    }

    async fn find_all_with_pagination(
        &self,
        filter: &Filter,
        params: &PageParams,
    ) -> Result<Page<Document<E>>, StoreError> {
        let params = params.normalized();
        let docs = self.lock()?;

        let matching: Vec<&StoredDoc> = docs
            .iter()
            .filter(|stored| filter.matches(stored.id, &stored.doc))
            .collect();
        let total = matching.len() as u64;

        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(params.limit as usize)
            .map(into_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total, params))
    }

    async fn update(
        &self,
        filter: &Filter,
        patch: &Patch,
    ) -> Result<Option<Document<E>>, StoreError> {
        let mut docs = self.lock()?;
        let Some(stored) = docs
            .iter_mut()
            .find(|stored| filter.matches(stored.id, &stored.doc))
        else {
            return Ok(None);
        };

        patch.apply(&mut stored.doc);
        stored.updated_at = Utc::now();
        into_document(stored).map(Some)
    }

    async fn remove(&self, filter: &Filter) -> Result<Option<Document<E>>, StoreError> {
        let mut docs = self.lock()?;
        let Some(index) = docs
            .iter()
            .position(|stored| filter.matches(stored.id, &stored.doc))
        else {
            return Ok(None);
        };

        let stored = docs.remove(index);
        into_document(&stored).map(Some)
    }
}
