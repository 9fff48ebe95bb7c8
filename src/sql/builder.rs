//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for a [`TableDef`].
//! Identifiers come from compiled-in table definitions; values are always `$n` parameters.

use crate::query::{CompareOp, Page, Predicate, SortSpec};
use crate::sql::BindValue;

/// Static description of one entity table.
#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub table: &'static str,
    pub id_column: &'static str,
    /// Every column returned by reads and RETURNING clauses, id first.
    pub columns: &'static [&'static str],
    /// Columns with a database default; an insert leaves them out when the value is NULL.
    pub defaulted: &'static [&'static str],
}

/// Quote identifier for PostgreSQL (safe: only from table definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn column_list(def: &TableDef) -> String {
    def.columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

fn where_clause(q: &mut QueryBuf, predicate: &Predicate) -> String {
    match predicate {
        Predicate::MatchAll => String::new(),
        Predicate::MatchNone => " WHERE 1 = 0".to_string(),
        Predicate::And(leaves) => {
            let mut parts = Vec::with_capacity(leaves.len());
            for leaf in leaves {
                let n = q.push_param(BindValue::Text(Some(leaf.bind_value())));
                let part = match (leaf.op, leaf.field_type.pg_cast()) {
                    (CompareOp::Contains, _) => format!("{} LIKE ${}", quoted(leaf.field), n),
                    (CompareOp::Eq, Some(cast)) => format!("{} = ${}::{}", quoted(leaf.field), n, cast),
                    (CompareOp::Eq, None) => format!("{} = ${}", quoted(leaf.field), n),
                };
                parts.push(part);
            }
            format!(" WHERE {}", parts.join(" AND "))
        }
    }
}

fn order_clause(def: &TableDef, sort: &SortSpec) -> String {
    match sort {
        SortSpec::Unspecified => format!(" ORDER BY {} ASC", quoted(def.id_column)),
        SortSpec::By { field, direction } if *field == def.id_column => {
            format!(" ORDER BY {} {}", quoted(field), direction.as_sql())
        }
        // id breaks ties so paging over a non-unique column is stable
        SortSpec::By { field, direction } => format!(
            " ORDER BY {} {}, {} ASC",
            quoted(field),
            direction.as_sql(),
            quoted(def.id_column)
        ),
    }
}

/// SELECT list restricted by `predicate`, ordered by `sort`, optional LIMIT/OFFSET.
pub fn select_list(schema: &str, def: &TableDef, predicate: &Predicate, sort: &SortSpec, page: Page) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let where_sql = where_clause(&mut q, predicate);
    let order_sql = order_clause(def, sort);
    let limit_sql = page.limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    let offset_sql = page.offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{}{}{}{}",
        column_list(def),
        table,
        where_sql,
        order_sql,
        limit_sql,
        offset_sql
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(schema: &str, def: &TableDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(Some(id)));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(def),
        qualified_table(schema, def.table),
        quoted(def.id_column),
        n
    );
    q
}

/// INSERT the given column values. NULLs for defaulted columns are omitted so the
/// database fills them in.
pub fn insert(schema: &str, def: &TableDef, values: Vec<(&'static str, BindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let values: Vec<_> = values
        .into_iter()
        .filter(|(col, val)| !(val.is_null() && def.defaulted.contains(col)))
        .collect();
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, column_list(def));
        return q;
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, val) in values {
        let n = q.push_param(val);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        column_list(def)
    );
    q
}

/// UPDATE by id, setting every given column. The id column itself is never written,
/// and a NULL for a defaulted column keeps the stored value.
pub fn update(schema: &str, def: &TableDef, id: i64, values: Vec<(&'static str, BindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let mut sets = Vec::with_capacity(values.len());
    for (col, val) in values {
        if col == def.id_column || (val.is_null() && def.defaulted.contains(&col)) {
            continue;
        }
        let n = q.push_param(val);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    if sets.is_empty() {
        sets.push(format!("{0} = {0}", quoted(def.id_column)));
    }
    let id_param = q.push_param(BindValue::Int(Some(id)));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        table,
        sets.join(", "),
        quoted(def.id_column),
        id_param,
        column_list(def)
    );
    q
}

/// DELETE by id.
pub fn delete(schema: &str, def: &TableDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(Some(id)));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        qualified_table(schema, def.table),
        quoted(def.id_column),
        n
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterCompiler, QueryParams, SortDirection};
    use crate::schema::{FieldSchema, FieldType};

    const VISITS: TableDef = TableDef {
        table: "visits",
        id_column: "visit_id",
        columns: &["visit_id", "member_id", "location_id", "checked_in_at", "created_at"],
        defaulted: &["checked_in_at", "created_at"],
    };

    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("visit_id", FieldType::Integer),
        ("member_id", FieldType::Integer),
        ("note", FieldType::String),
        ("checked_in_at", FieldType::Datetime),
    ]);

    const COLS: &str = r#""visit_id", "member_id", "location_id", "checked_in_at", "created_at""#;

    #[test]
    fn list_without_filters_orders_by_id() {
        let q = select_list("public", &VISITS, &Predicate::MatchAll, &SortSpec::Unspecified, Page::default());
        assert_eq!(
            q.sql,
            format!(r#"SELECT {} FROM "public"."visits" ORDER BY "visit_id" ASC"#, COLS)
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn list_with_filters_binds_values_in_field_order() {
        let params: QueryParams = [("note", "late"), ("member_id", "1")].into_iter().collect();
        let predicate = FilterCompiler::compile(&SCHEMA, &params).unwrap();
        let q = select_list("public", &VISITS, &predicate, &SortSpec::Unspecified, Page::default());
        assert_eq!(
            q.sql,
            format!(
                r#"SELECT {} FROM "public"."visits" WHERE "member_id" = $1::bigint AND "note" LIKE $2 ORDER BY "visit_id" ASC"#,
                COLS
            )
        );
        assert_eq!(
            q.params,
            vec![BindValue::Text(Some("1".into())), BindValue::Text(Some("%late%".into()))]
        );
    }

    #[test]
    fn user_values_never_reach_sql_text() {
        let params: QueryParams = [("note", "'; DROP TABLE visits; --")].into_iter().collect();
        let predicate = FilterCompiler::compile(&SCHEMA, &params).unwrap();
        let q = select_list("public", &VISITS, &predicate, &SortSpec::Unspecified, Page::default());
        assert!(!q.sql.contains("DROP"));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn match_none_restricts_to_zero_rows() {
        let q = select_list("gym", &VISITS, &Predicate::MatchNone, &SortSpec::Unspecified, Page::default());
        assert!(q.sql.contains(r#"FROM "gym"."visits" WHERE 1 = 0 ORDER BY"#));
    }

    #[test]
    fn sort_and_page() {
        let sort = SortSpec::By {
            field: "visit_id",
            direction: SortDirection::Descending,
        };
        let page = Page {
            limit: Some(10),
            offset: Some(5),
        };
        let q = select_list("public", &VISITS, &Predicate::MatchAll, &sort, page);
        assert!(q.sql.ends_with(r#"ORDER BY "visit_id" DESC LIMIT 10 OFFSET 5"#));

        let sort = SortSpec::By {
            field: "member_id",
            direction: SortDirection::Ascending,
        };
        let q = select_list("public", &VISITS, &Predicate::MatchAll, &sort, Page::default());
        assert!(q.sql.ends_with(r#"ORDER BY "member_id" ASC, "visit_id" ASC"#));
    }

    #[test]
    fn insert_returns_all_columns() {
        let q = insert(
            "public",
            &VISITS,
            vec![("member_id", BindValue::from(3i64)), ("location_id", BindValue::from(4i64))],
        );
        assert_eq!(
            q.sql,
            format!(
                r#"INSERT INTO "public"."visits" ("member_id", "location_id") VALUES ($1, $2) RETURNING {}"#,
                COLS
            )
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn insert_omits_null_defaulted_columns() {
        let q = insert(
            "public",
            &VISITS,
            vec![
                ("member_id", BindValue::from(3i64)),
                ("location_id", BindValue::Int(None)),
                ("checked_in_at", BindValue::Timestamp(None)),
            ],
        );
        assert!(q.sql.starts_with(r#"INSERT INTO "public"."visits" ("member_id", "location_id") VALUES ($1, $2)"#));
        assert_eq!(q.params, vec![BindValue::Int(Some(3)), BindValue::Int(None)]);

        let q = insert("public", &VISITS, vec![("checked_in_at", BindValue::Timestamp(None))]);
        assert!(q.sql.starts_with(r#"INSERT INTO "public"."visits" DEFAULT VALUES RETURNING"#));
    }

    #[test]
    fn update_skips_id_and_binds_id_last() {
        let q = update(
            "public",
            &VISITS,
            9,
            vec![("visit_id", BindValue::from(1i64)), ("member_id", BindValue::from(3i64))],
        );
        assert_eq!(
            q.sql,
            format!(
                r#"UPDATE "public"."visits" SET "member_id" = $1 WHERE "visit_id" = $2 RETURNING {}"#,
                COLS
            )
        );
        assert_eq!(q.params, vec![BindValue::Int(Some(3)), BindValue::Int(Some(9))]);
    }

    #[test]
    fn update_keeps_stored_value_for_null_defaulted_columns() {
        use crate::models::Visit;
        use crate::resource::Resource;

        let visit = Visit {
            visit_id: 0,
            member_id: 3,
            location_id: 4,
            checked_in_at: None,
            created_at: None,
        };
        let q = update("public", &Visit::TABLE, 7, visit.values());
        assert!(!q.sql.contains("checked_in_at\" = $"));
        assert!(q.sql.starts_with(r#"UPDATE "public"."visits" SET "member_id" = $1, "location_id" = $2 WHERE "visit_id" = $3"#));
        assert_eq!(q.params, vec![BindValue::Int(Some(3)), BindValue::Int(Some(4)), BindValue::Int(Some(7))]);

        let at = chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let visit = Visit {
            checked_in_at: Some(at),
            ..visit
        };
        let q = update("public", &Visit::TABLE, 7, visit.values());
        assert!(q.sql.contains(r#""checked_in_at" = $3"#));
        assert_eq!(q.params[2], BindValue::Timestamp(Some(at)));
    }

    #[test]
    fn select_and_delete_by_id() {
        let q = select_by_id("public", &VISITS, 2);
        assert!(q.sql.ends_with(r#"FROM "public"."visits" WHERE "visit_id" = $1"#));
        let q = delete("public", &VISITS, 2);
        assert_eq!(q.sql, r#"DELETE FROM "public"."visits" WHERE "visit_id" = $1"#);
        assert_eq!(q.params, vec![BindValue::Int(Some(2))]);
    }
}
