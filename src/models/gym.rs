use crate::error::AppError;
use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::service::RecordValidator;
use crate::sql::{BindValue, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gym {
    #[serde(default)]
    pub gym_id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Gym {
    const TABLE: TableDef = TableDef {
        table: "gyms",
        id_column: "gym_id",
        columns: &["gym_id", "name", "email", "phone", "created_at"],
        defaulted: &["created_at"],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("gym_id", FieldType::Integer),
        ("name", FieldType::String),
        ("email", FieldType::String),
        ("phone", FieldType::String),
        ("created_at", FieldType::Datetime),
    ]);
    const PATH: &'static str = "gyms";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("email", self.email.clone().into()),
            ("phone", self.phone.clone().into()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        RecordValidator::required("name", &self.name)?;
        RecordValidator::optional_email("email", self.email.as_deref())
    }
}
