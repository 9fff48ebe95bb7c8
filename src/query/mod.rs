//! Query-string compilation: filters, sort and pagination for list endpoints.

mod filter;
mod params;
mod sort;

pub use filter::{CompareOp, Comparison, FilterCompiler, Predicate};
pub use params::QueryParams;
pub use sort::{SortCompiler, SortDirection, SortSpec};

use crate::error::AppError;
use crate::schema::FieldSchema;

pub const ORDER_BY: &str = "order_by";
pub const SORT_ORDER: &str = "sort_order";
pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";

/// Upper bound applied to any requested `limit`.
pub const MAX_LIMIT: u32 = 1000;

/// Optional LIMIT/OFFSET. Absent limit means every matching row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Everything a list call needs, compiled from one request's query string.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub predicate: Predicate,
    pub sort: SortSpec,
    pub page: Page,
}

impl ListQuery {
    /// Split control parameters off `params`, then compile the remainder as filters.
    pub fn compile(schema: &FieldSchema, mut params: QueryParams) -> Result<Self, AppError> {
        let mut sort_params = QueryParams::new();
        for key in [ORDER_BY, SORT_ORDER] {
            if let Some(values) = params.remove(key) {
                for v in values {
                    sort_params.insert(key, v);
                }
            }
        }
        let limit = parse_page_value(LIMIT, params.remove(LIMIT))?.map(|n| n.min(MAX_LIMIT));
        let offset = parse_page_value(OFFSET, params.remove(OFFSET))?;

        let sort = SortCompiler::compile(schema, &sort_params)?;
        let predicate = FilterCompiler::compile(schema, &params)?;
        Ok(ListQuery {
            predicate,
            sort,
            page: Page { limit, offset },
        })
    }
}

fn parse_page_value(name: &str, values: Option<Vec<String>>) -> Result<Option<u32>, AppError> {
    let Some(raw) = values.and_then(|v| v.into_iter().next()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("{} must be a non-negative integer", name)))
}
