//! Sort compilation from `order_by` and `sort_order`.

use crate::error::QueryError;
use crate::query::{QueryParams, ORDER_BY, SORT_ORDER};
use crate::schema::FieldSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortSpec {
    /// The store picks the order (id ascending).
    Unspecified,
    By {
        field: &'static str,
        direction: SortDirection,
    },
}

pub struct SortCompiler;

impl SortCompiler {
    pub fn compile(schema: &FieldSchema, params: &QueryParams) -> Result<SortSpec, QueryError> {
        let order_by = params.first(ORDER_BY).filter(|s| !s.is_empty());
        let field = match order_by {
            Some(name) => Some(
                schema
                    .get(name)
                    .map(|(field, _)| field)
                    .ok_or_else(|| QueryError::InvalidSortField(name.to_string()))?,
            ),
            None => None,
        };
        let direction = match params.first(SORT_ORDER).unwrap_or("") {
            "" | "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            other => return Err(QueryError::InvalidSortOrder(other.to_string())),
        };
        Ok(match field {
            Some(field) => SortSpec::By { field, direction },
            None => SortSpec::Unspecified,
        })
    }
}
