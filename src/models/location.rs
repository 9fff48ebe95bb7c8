use crate::error::AppError;
use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::service::RecordValidator;
use crate::sql::{BindValue, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical site belonging to a gym.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    #[serde(default)]
    pub location_id: i64,
    pub gym_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Location {
    const TABLE: TableDef = TableDef {
        table: "locations",
        id_column: "location_id",
        columns: &["location_id", "gym_id", "name", "address", "city", "created_at"],
        defaulted: &["created_at"],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("location_id", FieldType::Integer),
        ("gym_id", FieldType::Integer),
        ("name", FieldType::String),
        ("address", FieldType::String),
        ("city", FieldType::String),
        ("created_at", FieldType::Datetime),
    ]);
    const PATH: &'static str = "locations";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("gym_id", self.gym_id.into()),
            ("name", self.name.clone().into()),
            ("address", self.address.clone().into()),
            ("city", self.city.clone().into()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        RecordValidator::required("name", &self.name)?;
        RecordValidator::required("address", &self.address)?;
        RecordValidator::required("city", &self.city)
    }
}
