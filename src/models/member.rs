use crate::error::AppError;
use crate::resource::Resource;
use crate::schema::{FieldSchema, FieldType};
use crate::service::RecordValidator;
use crate::sql::{BindValue, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person holding a membership. `joined_at` defaults to the insert time when omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    #[serde(default)]
    pub member_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status_id: i64,
    #[serde(default)]
    pub plan_id: Option<i64>,
    #[serde(default)]
    pub home_location_id: Option<i64>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Member {
    const TABLE: TableDef = TableDef {
        table: "members",
        id_column: "member_id",
        columns: &[
            "member_id",
            "user_id",
            "email",
            "first_name",
            "last_name",
            "status_id",
            "plan_id",
            "home_location_id",
            "joined_at",
            "created_at",
        ],
        defaulted: &["joined_at", "created_at"],
    };
    const SCHEMA: FieldSchema = FieldSchema::new(&[
        ("member_id", FieldType::Integer),
        ("user_id", FieldType::Integer),
        ("email", FieldType::String),
        ("first_name", FieldType::String),
        ("last_name", FieldType::String),
        ("status_id", FieldType::Integer),
        ("plan_id", FieldType::Integer),
        ("home_location_id", FieldType::Integer),
        ("joined_at", FieldType::Datetime),
        ("created_at", FieldType::Datetime),
    ]);
    const PATH: &'static str = "members";

    fn values(&self) -> Vec<(&'static str, BindValue)> {
        vec![
            ("user_id", self.user_id.into()),
            ("email", self.email.clone().into()),
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("status_id", self.status_id.into()),
            ("plan_id", self.plan_id.into()),
            ("home_location_id", self.home_location_id.into()),
            ("joined_at", self.joined_at.into()),
        ]
    }

    fn validate(&self) -> Result<(), AppError> {
        RecordValidator::email("email", &self.email)?;
        RecordValidator::required("first_name", &self.first_name)?;
        RecordValidator::required("last_name", &self.last_name)
    }
}
