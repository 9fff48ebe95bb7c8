//! The contract an entity type fulfils to be served by the generic CRUD engine.

use crate::error::AppError;
use crate::schema::FieldSchema;
use crate::sql::{BindValue, TableDef};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// An entity stored in one table and exposed under one REST path.
///
/// Reading goes through `FromRow`; writing goes through [`Resource::values`], which
/// must list every caller-writable column. The id and server-computed columns
/// (`created_at`) are left out so the database assigns them.
pub trait Resource:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    const TABLE: TableDef;
    /// Fields accepted in filter and `order_by` parameters.
    const SCHEMA: FieldSchema;
    /// Path segment under the API prefix, e.g. `members`.
    const PATH: &'static str;

    fn values(&self) -> Vec<(&'static str, BindValue)>;

    /// Check a record before it is written.
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}
