//! Idempotent DDL for the entity tables, applied in foreign-key order.

use crate::db::{quote_ident, Database};

/// `{schema}` is replaced with the quoted schema name.
const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS {schema}."users" (
        "user_id" BIGSERIAL PRIMARY KEY,
        "email" TEXT NOT NULL UNIQUE,
        "first_name" TEXT NOT NULL,
        "last_name" TEXT NOT NULL,
        "is_admin" BOOLEAN NOT NULL DEFAULT FALSE,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {schema}."member_statuses" (
        "status_id" BIGSERIAL PRIMARY KEY,
        "name" TEXT NOT NULL UNIQUE,
        "description" TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {schema}."plans" (
        "plan_id" BIGSERIAL PRIMARY KEY,
        "name" TEXT NOT NULL UNIQUE,
        "description" TEXT,
        "price_cents" BIGINT NOT NULL CHECK ("price_cents" >= 0),
        "duration_months" BIGINT NOT NULL CHECK ("duration_months" > 0),
        "is_active" BOOLEAN NOT NULL DEFAULT TRUE,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {schema}."gyms" (
        "gym_id" BIGSERIAL PRIMARY KEY,
        "name" TEXT NOT NULL,
        "email" TEXT,
        "phone" TEXT,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {schema}."locations" (
        "location_id" BIGSERIAL PRIMARY KEY,
        "gym_id" BIGINT NOT NULL REFERENCES {schema}."gyms" ("gym_id") ON DELETE CASCADE,
        "name" TEXT NOT NULL,
        "address" TEXT NOT NULL,
        "city" TEXT NOT NULL,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {schema}."members" (
        "member_id" BIGSERIAL PRIMARY KEY,
        "user_id" BIGINT REFERENCES {schema}."users" ("user_id") ON DELETE SET NULL,
        "email" TEXT NOT NULL UNIQUE,
        "first_name" TEXT NOT NULL,
        "last_name" TEXT NOT NULL,
        "status_id" BIGINT NOT NULL REFERENCES {schema}."member_statuses" ("status_id"),
        "plan_id" BIGINT REFERENCES {schema}."plans" ("plan_id"),
        "home_location_id" BIGINT REFERENCES {schema}."locations" ("location_id") ON DELETE SET NULL,
        "joined_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {schema}."visits" (
        "visit_id" BIGSERIAL PRIMARY KEY,
        "member_id" BIGINT NOT NULL REFERENCES {schema}."members" ("member_id") ON DELETE CASCADE,
        "location_id" BIGINT NOT NULL REFERENCES {schema}."locations" ("location_id") ON DELETE CASCADE,
        "checked_in_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "idx_members_status_id" ON {schema}."members" ("status_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "idx_visits_member_id" ON {schema}."visits" ("member_id")"#,
    r#"CREATE INDEX IF NOT EXISTS "idx_locations_gym_id" ON {schema}."locations" ("gym_id")"#,
];

/// Lookup rows every deployment starts with.
const MEMBER_STATUSES: &[(&str, &str)] = &[
    ("active", "Membership in good standing"),
    ("frozen", "Temporarily paused by the member"),
    ("cancelled", "Ended before the plan term"),
    ("expired", "Plan term ran out"),
];

pub(crate) fn statements(schema: &str) -> Vec<String> {
    let schema = quote_ident(schema);
    let mut out = Vec::with_capacity(TABLES.len() + 1);
    out.push(format!("CREATE SCHEMA IF NOT EXISTS {}", schema));
    out.extend(TABLES.iter().map(|ddl| ddl.replace("{schema}", &schema)));
    out
}

/// Create the schema, tables and indexes if missing and seed the status lookup.
/// Runs in one transaction.
pub async fn apply_migrations(db: &Database) -> Result<(), sqlx::Error> {
    let mut tx = db.pool().begin().await?;
    for sql in statements(db.schema()) {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    let seed = format!(
        r#"INSERT INTO {}."member_statuses" ("name", "description") VALUES ($1, $2) ON CONFLICT ("name") DO NOTHING"#,
        quote_ident(db.schema())
    );
    for (name, description) in MEMBER_STATUSES {
        sqlx::query(&seed)
            .bind(*name)
            .bind(*description)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(schema = %db.schema(), "migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_placeholder_is_replaced() {
        let stmts = statements("gym");
        assert_eq!(stmts[0], r#"CREATE SCHEMA IF NOT EXISTS "gym""#);
        for s in &stmts {
            assert!(!s.contains("{schema}"));
        }
        assert!(stmts.iter().any(|s| s.contains(r#"REFERENCES "gym"."members" ("member_id")"#)));
    }

    #[test]
    fn referenced_tables_are_created_first() {
        let stmts = statements("public");
        let pos = |table: &str| {
            stmts
                .iter()
                .position(|s| s.starts_with(&format!(r#"CREATE TABLE IF NOT EXISTS "public"."{}""#, table)))
                .unwrap()
        };
        assert!(pos("gyms") < pos("locations"));
        assert!(pos("member_statuses") < pos("members"));
        assert!(pos("members") < pos("visits"));
    }
}
