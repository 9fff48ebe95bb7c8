//! Filter compilation: query parameters to a validated AND of leaf comparisons.

use crate::error::QueryError;
use crate::query::QueryParams;
use crate::schema::{FieldSchema, FieldType};

/// How a leaf compares its field to the supplied value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// Case-sensitive substring match (`LIKE '%value%'`).
    Contains,
    /// Exact equality against the literal cast to the column type.
    Eq,
}

/// One field-to-value test. `field` always comes from the schema, never from the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub field: &'static str,
    pub field_type: FieldType,
    pub op: CompareOp,
    pub value: String,
}

impl Comparison {
    /// Value to bind for this comparison: wrapped in `%` for substring matches.
    pub fn bind_value(&self) -> String {
        match self.op {
            CompareOp::Contains => format!("%{}%", self.value),
            CompareOp::Eq => self.value.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// No restriction.
    MatchAll,
    /// Restricts to zero rows.
    MatchNone,
    /// Conjunction of leaves, ordered by field name.
    And(Vec<Comparison>),
}

impl Predicate {
    pub fn comparisons(&self) -> &[Comparison] {
        match self {
            Predicate::And(c) => c,
            Predicate::MatchAll | Predicate::MatchNone => &[],
        }
    }
}

pub struct FilterCompiler;

impl FilterCompiler {
    /// Compile filter parameters against `schema`. Fails on the first key the schema
    /// does not know. Only the first value of a repeated key is used; keys whose value
    /// is empty are skipped, and if that leaves nothing the result matches no rows.
    pub fn compile(schema: &FieldSchema, params: &QueryParams) -> Result<Predicate, QueryError> {
        if params.is_empty() {
            return Ok(Predicate::MatchAll);
        }
        let mut leaves = Vec::with_capacity(params.len());
        for (key, values) in params.iter() {
            let (field, field_type) = schema
                .get(key)
                .ok_or_else(|| QueryError::InvalidField(key.to_string()))?;
            let Some(value) = values.first().filter(|v| !v.is_empty()) else {
                continue;
            };
            let op = match field_type {
                FieldType::String => CompareOp::Contains,
                FieldType::Integer | FieldType::Boolean | FieldType::Datetime => CompareOp::Eq,
            };
            leaves.push(Comparison {
                field,
                field_type,
                op,
                value: value.clone(),
            });
        }
        if leaves.is_empty() {
            return Ok(Predicate::MatchNone);
        }
        Ok(Predicate::And(leaves))
    }
}
