//! Generic CRUD handlers. One instantiation per entity type is mounted by
//! [`crate::routes::resource_routes`].

use crate::error::AppError;
use crate::extractors::RequestId;
use crate::query::{ListQuery, QueryParams};
use crate::resource::Resource;
use crate::response::{success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// Unwrap the JSON extractor so its rejections use the error envelope.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge(rejection.body_text()))
        }
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

fn parse_body<T: Resource>(body: Value) -> Result<T, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
}

#[tracing::instrument(skip_all, fields(resource = T::PATH, request_id = %request_id))]
pub async fn list<T: Resource>(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let params: QueryParams = pairs.into_iter().collect();
    let query = ListQuery::compile(&T::SCHEMA, params)?;
    let rows = state
        .store::<T>()
        .list(&query.predicate, &query.sort, query.page)
        .await?;
    tracing::debug!(count = rows.len(), "listed");
    Ok(success_many(rows))
}

#[tracing::instrument(skip_all, fields(resource = T::PATH, request_id = %request_id))]
pub async fn read<T: Resource>(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let row = state.store::<T>().get(id).await?;
    Ok(success_one_ok(row))
}

#[tracing::instrument(skip_all, fields(resource = T::PATH, request_id = %request_id))]
pub async fn create<T: Resource>(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let record: T = parse_body(json_body(body)?)?;
    record.validate()?;
    let row = state.store::<T>().create(&record).await?;
    Ok(success_one(row))
}

/// Full replace: every writable column takes the body's value.
#[tracing::instrument(skip_all, fields(resource = T::PATH, request_id = %request_id))]
pub async fn update<T: Resource>(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let record: T = parse_body(json_body(body)?)?;
    record.validate()?;
    let row = state.store::<T>().update(id, &record).await?;
    Ok(success_one_ok(row))
}

#[tracing::instrument(skip_all, fields(resource = T::PATH, request_id = %request_id))]
pub async fn delete<T: Resource>(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    state.store::<T>().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
