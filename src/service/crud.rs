//! Generic CRUD execution against PostgreSQL.

use crate::db::Database;
use crate::error::StoreError;
use crate::query::{Page, Predicate, SortSpec};
use crate::resource::Resource;
use crate::sql::{self, bind, QueryBuf};
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::FromRow;
use std::marker::PhantomData;

/// CRUD engine for one entity type. Every call is a single round trip and is never retried.
pub struct ResourceStore<T> {
    db: Database,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        ResourceStore {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(db: Database) -> Self {
        ResourceStore {
            db,
            _record: PhantomData,
        }
    }

    /// Rows matching `predicate` in `sort` order. No match is an empty vec.
    pub async fn list(&self, predicate: &Predicate, sort: &SortSpec, page: Page) -> Result<Vec<T>, StoreError> {
        let q = sql::select_list(self.db.schema(), &T::TABLE, predicate, sort, page);
        log_query::<T>(&q);
        let rows = build_query(&q).fetch_all(self.db.pool()).await?;
        rows.iter().map(map_row::<T>).collect()
    }

    pub async fn get(&self, id: i64) -> Result<T, StoreError> {
        let q = sql::select_by_id(self.db.schema(), &T::TABLE, id);
        log_query::<T>(&q);
        let row = build_query(&q)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or(StoreError::NotFound {
                table: T::TABLE.table,
                id,
            })?;
        map_row(&row)
    }

    /// Insert `record`, returning the stored row with its assigned id and defaults.
    pub async fn create(&self, record: &T) -> Result<T, StoreError> {
        let q = sql::insert(self.db.schema(), &T::TABLE, record.values());
        log_query::<T>(&q);
        let row = build_query(&q).fetch_one(self.db.pool()).await?;
        map_row(&row)
    }

    /// Replace every writable column of row `id` with `record`'s values. The write and
    /// the read-back happen in one transaction that is rolled back if either fails.
    pub async fn update(&self, id: i64, record: &T) -> Result<T, StoreError> {
        let q = sql::update(self.db.schema(), &T::TABLE, id, record.values());
        log_query::<T>(&q);
        let mut tx = self.db.pool().begin().await?;
        let row = match build_query(&q).fetch_optional(&mut *tx).await {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(e.into());
            }
        };
        let Some(row) = row else {
            rollback(tx).await;
            return Err(StoreError::NotFound {
                table: T::TABLE.table,
                id,
            });
        };
        let updated = match map_row::<T>(&row) {
            Ok(updated) => updated,
            Err(e) => {
                rollback(tx).await;
                return Err(e);
            }
        };
        tx.commit().await?;
        Ok(updated)
    }

    /// Delete row `id`. A missing row is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let q = sql::delete(self.db.schema(), &T::TABLE, id);
        log_query::<T>(&q);
        let result = build_query(&q).execute(self.db.pool()).await?;
        if result.rows_affected() == 0 {
            tracing::debug!(table = T::TABLE.table, id, "delete matched no row");
        }
        Ok(())
    }
}

fn build_query(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = bind(query, p.clone());
    }
    query
}

fn map_row<T: Resource>(row: &PgRow) -> Result<T, StoreError> {
    Ok(T::from_row(row)?)
}

fn log_query<T: Resource>(q: &QueryBuf) {
    tracing::debug!(table = T::TABLE.table, sql = %q.sql, params = ?q.params, "query");
}

async fn rollback(tx: sqlx::Transaction<'_, Postgres>) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(error = %e, "rollback failed");
    }
}
