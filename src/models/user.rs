use crate::error::AppError;
use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::service::RecordValidator;
use crate::sql::{BindValue, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Someone with a login to the system: staff or a member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    #[serde(default)]
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    const TABLE: TableDef = TableDef {
        table: "users",
        id_column: "user_id",
        columns: &["user_id", "email", "first_name", "last_name", "is_admin", "created_at"],
        defaulted: &["created_at"],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("user_id", FieldType::Integer),
        ("email", FieldType::String),
        ("first_name", FieldType::String),
        ("last_name", FieldType::String),
        ("is_admin", FieldType::Boolean),
        ("created_at", FieldType::Datetime),
    ]);
    const PATH: &'static str = "users";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("email", self.email.clone().into()),
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("is_admin", self.is_admin.into()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        RecordValidator::email("email", &self.email)?;
        RecordValidator::required("first_name", &self.first_name)?;
        RecordValidator::required("last_name", &self.last_name)?;
        Ok(())
    }
}
