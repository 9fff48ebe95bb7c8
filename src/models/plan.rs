use crate::error::AppError;
use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::service::RecordValidator;
use crate::sql::{BindValue, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A purchasable membership plan. Prices are integer cents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Plan {
    #[serde(default)]
    pub plan_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_months: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Plan {
    const TABLE: TableDef = TableDef {
        table: "plans",
        id_column: "plan_id",
        columns: &[
            "plan_id",
            "name",
            "description",
            "price_cents",
            "duration_months",
            "is_active",
            "created_at",
        ],
        defaulted: &["created_at"],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("plan_id", FieldType::Integer),
        ("name", FieldType::String),
        ("duration_months", FieldType::Integer),
        ("is_active", FieldType::Boolean),
        ("created_at", FieldType::Datetime),
    ]);
    const PATH: &'static str = "plans";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("description", self.description.clone().into()),
            ("price_cents", self.price_cents.into()),
            ("duration_months", self.duration_months.into()),
            ("is_active", self.is_active.into()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        RecordValidator::required("name", &self.name)?;
        RecordValidator::minimum("price_cents", self.price_cents, 0)?;
        RecordValidator::minimum("duration_months", self.duration_months, 1)
    }
}
