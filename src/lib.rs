//! Gym membership REST backend: typed entities over PostgreSQL with schema-checked
//! filtering and sorting on every list endpoint.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod query;
pub mod resource;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use db::{ensure_database_exists, Database};
pub use error::{AppError, ConfigError, QueryError, StoreError};
pub use migration::apply_migrations;
pub use query::{FilterCompiler, ListQuery, Page, Predicate, QueryParams, SortCompiler, SortDirection, SortSpec};
pub use resource::Resource;
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{api_routes, app, common_routes_with_ready, resource_routes, API_PREFIX};
pub use schema::{FieldSchema, FieldType};
pub use service::{RecordValidator, ResourceStore};
pub use state::AppState;
pub use telemetry::init_tracing;
