use crate::error::AppError;
use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::service::RecordValidator;
use crate::sql::{BindValue, TableDef};
use serde::{Deserialize, Serialize};

/// Lookup row for a membership's state (active, frozen, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberStatus {
    #[serde(default)]
    pub status_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for MemberStatus {
    const TABLE: TableDef = TableDef {
        table: "member_statuses",
        id_column: "status_id",
        columns: &["status_id", "name", "description"],
        defaulted: &[],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("status_id", FieldType::Integer),
        ("name", FieldType::String),
    ]);
    const PATH: &'static str = "member-statuses";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("description", self.description.clone().into()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        RecordValidator::required("name", &self.name)?;
        RecordValidator::max_length("name", &self.name, 64)
    }
}
