//! Per-entity field whitelist: which columns may be filtered and sorted, and how.

use std::fmt;

/// Semantic type of a filterable field. Decides the comparison a filter compiles to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Datetime,
}

impl FieldType {
    /// PostgreSQL type the bound text literal is cast to for equality comparisons.
    /// `None` for strings, which compare with LIKE against text.
    pub fn pg_cast(self) -> Option<&'static str> {
        match self {
            FieldType::String => None,
            FieldType::Integer => Some("bigint"),
            FieldType::Boolean => Some("boolean"),
            FieldType::Datetime => Some("timestamptz"),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Datetime => "datetime",
        };
        f.write_str(s)
    }
}

/// Immutable mapping from field name to [`FieldType`]. Built as a constant per entity.
#[derive(Clone, Copy, Debug)]
pub struct FieldSchema {
    fields: &'static [(&'static str, FieldType)],
}

impl FieldSchema {
    pub const fn new(fields: &'static [(&'static str, FieldType)]) -> Self {
        FieldSchema { fields }
    }

    /// Look up a field. Returns the schema's own `'static` name so callers never
    /// carry a user-supplied string into SQL identifiers.
    pub fn get(&self, name: &str) -> Option<(&'static str, FieldType)> {
        self.fields.iter().copied().find(|(n, _)| *n == name)
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("member_id", FieldType::Integer),
        ("email", FieldType::String),
        ("is_active", FieldType::Boolean),
    ]);

    #[test]
    fn lookup_returns_static_name_and_type() {
        let owned = String::from("email");
        let (name, ty) = SCHEMA.get(&owned).unwrap();
        assert_eq!(name, "email");
        assert_eq!(ty, FieldType::String);
        assert!(SCHEMA.get("missing").is_none());
        assert!(SCHEMA.get("Email").is_none());
    }

    #[test]
    fn casts_only_for_non_string_types() {
        assert_eq!(FieldType::String.pg_cast(), None);
        assert_eq!(FieldType::Integer.pg_cast(), Some("bigint"));
        assert_eq!(FieldType::Boolean.pg_cast(), Some("boolean"));
        assert_eq!(FieldType::Datetime.pg_cast(), Some("timestamptz"));
    }

    #[test]
    fn names_in_declaration_order() {
        let names: Vec<_> = SCHEMA.names().collect();
        assert_eq!(names, vec!["member_id", "email", "is_active"]);
    }
}
