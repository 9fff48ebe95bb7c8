//! Typed values that sqlx can bind to a PostgreSQL statement.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound as a statement parameter. Each variant carries an `Option` so that a
/// NULL still reaches PostgreSQL with the column's type rather than as untyped text.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Text(Option<String>),
    Int(Option<i64>),
    Bool(Option<bool>),
    Timestamp(Option<DateTime<Utc>>),
}

impl BindValue {
    pub fn is_null(&self) -> bool {
        match self {
            BindValue::Text(v) => v.is_none(),
            BindValue::Int(v) => v.is_none(),
            BindValue::Bool(v) => v.is_none(),
            BindValue::Timestamp(v) => v.is_none(),
        }
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(Some(v))
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for BindValue {
    fn from(v: Option<String>) -> Self {
        BindValue::Text(v)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(Some(v))
    }
}

impl From<Option<i64>> for BindValue {
    fn from(v: Option<i64>) -> Self {
        BindValue::Int(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(Some(v))
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(v: DateTime<Utc>) -> Self {
        BindValue::Timestamp(Some(v))
    }
}

impl From<Option<DateTime<Utc>>> for BindValue {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        BindValue::Timestamp(v)
    }
}

/// Bind one value onto a `sqlx::query`.
pub fn bind<'q>(query: Query<'q, Postgres, PgArguments>, value: BindValue) -> Query<'q, Postgres, PgArguments> {
    match value {
        BindValue::Text(v) => query.bind(v),
        BindValue::Int(v) => query.bind(v),
        BindValue::Bool(v) => query.bind(v),
        BindValue::Timestamp(v) => query.bind(v),
    }
}
