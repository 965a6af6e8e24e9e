//! PostgreSQL adapter for the entity store port
//!
//! Each collection is one table of JSON documents:
//!
//! ```sql
//! id UUID PRIMARY KEY, doc JSONB NOT NULL, created_at, updated_at
//! ```
//!
//! Filters become `doc @> $fields`, patches become `doc || $patch`, and
//! single-document update/remove pick their target through an ordered
//! `LIMIT 1` subselect so they touch at most one row. Listing order is
//! `created_at, id` everywhere, which keeps paginated and unpaginated reads
//! consistent.
//!
//! Queries are built at runtime (not with the compile-time macros) because
//! the table name is generic over the entity's collection constant.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{Document, Entity, EntityStore, Filter, Page, PageParams, Patch, StoreError};

use crate::error::store_error;

/// Generic PostgreSQL-backed entity store for one collection.
#[derive(Debug, Clone)]
pub struct PgEntityStore<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PgEntityStore<E> {
    /// Creates a store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn select_sql(&self) -> String {
        format!(
            "SELECT id, doc, created_at, updated_at FROM {} \
             WHERE ($1::uuid IS NULL OR id = $1) AND doc @> $2 \
             ORDER BY created_at, id",
            E::COLLECTION
        )
    }

    fn target_subselect(&self) -> String {
        format!(
            "SELECT id FROM {} \
             WHERE ($1::uuid IS NULL OR id = $1) AND doc @> $2 \
             ORDER BY created_at, id LIMIT 1",
            E::COLLECTION
        )
    }
}

/// Raw row shape shared by every collection table
#[derive(FromRow)]
struct DocRow {
    id: Uuid,
    doc: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocRow {
    fn into_document<E: Entity>(self) -> Result<Document<E>, StoreError> {
        let data = serde_json::from_value(self.doc)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Document {
            id: self.id,
            data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for PgEntityStore<E> {
    async fn create(&self, data: E) -> Result<Document<E>, StoreError> {
        let doc = serde_json::to_value(&data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let row: DocRow = sqlx::query_as(&format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) \
             RETURNING id, doc, created_at, updated_at",
            E::COLLECTION
        ))
        .bind(Uuid::new_v4())
        .bind(doc)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row.into_document()
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document<E>>, StoreError> {
        let row: Option<DocRow> = sqlx::query_as(&format!("{} LIMIT 1", self.select_sql()))
            .bind(filter.id())
            .bind(filter.fields_value())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        row.map(DocRow::into_document).transpose()
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<Document<E>>, StoreError> {
        let rows: Vec<DocRow> = sqlx::query_as(&self.select_sql())
            .bind(filter.id())
            .bind(filter.fields_value())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        rows.into_iter().map(DocRow::into_document).collect()
    }

    async fn find_all_with_pagination(
        &self,
        filter: &Filter,
        params: &PageParams,
    ) -> Result<Page<Document<E>>, StoreError> {
        let params = params.normalized();

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE ($1::uuid IS NULL OR id = $1) AND doc @> $2",
            E::COLLECTION
        ))
        .bind(filter.id())
        .bind(filter.fields_value())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        let rows: Vec<DocRow> = sqlx::query_as(&format!("{} OFFSET $3 LIMIT $4", self.select_sql()))
            .bind(filter.id())
            .bind(filter.fields_value())
            .bind(i64::try_from(params.offset()).unwrap_or(i64::MAX))
            .bind(i64::from(params.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        let items = rows
            .into_iter()
            .map(DocRow::into_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total.unsigned_abs(), params))
    }

    async fn update(
        &self,
        filter: &Filter,
        patch: &Patch,
    ) -> Result<Option<Document<E>>, StoreError> {
        let row: Option<DocRow> = sqlx::query_as(&format!(
            "UPDATE {} SET doc = doc || $3, updated_at = now() \
             WHERE id = ({}) \
             RETURNING id, doc, created_at, updated_at",
            E::COLLECTION,
            self.target_subselect()
        ))
        .bind(filter.id())
        .bind(filter.fields_value())
        .bind(patch.as_value())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(DocRow::into_document).transpose()
    }

    async fn remove(&self, filter: &Filter) -> Result<Option<Document<E>>, StoreError> {
        let row: Option<DocRow> = sqlx::query_as(&format!(
            "DELETE FROM {} WHERE id = ({}) \
             RETURNING id, doc, created_at, updated_at",
            E::COLLECTION,
            self.target_subselect()
        ))
        .bind(filter.id())
        .bind(filter.fields_value())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(DocRow::into_document).transpose()
    }
}
