use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::sql::{BindValue, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One check-in of a member at a location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Visit {
    #[serde(default)]
    pub visit_id: i64,
    pub member_id: i64,
    pub location_id: i64,
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Visit {
    const TABLE: TableDef = TableDef {
        table: "visits",
        id_column: "visit_id",
        columns: &["visit_id", "member_id", "location_id", "checked_in_at", "created_at"],
        defaulted: &["checked_in_at", "created_at"],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("visit_id", FieldType::Integer),
        ("member_id", FieldType::Integer),
        ("location_id", FieldType::Integer),
        ("checked_in_at", FieldType::Datetime),
        ("created_at", FieldType::Datetime),
    ]);
    const PATH: &'static str = "visits";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("member_id", self.member_id.into()),
            ("location_id", self.location_id.into()),
            ("checked_in_at", self.checked_in_at.into()),
        ]
    }
}
