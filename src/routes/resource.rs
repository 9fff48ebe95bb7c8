//! Resource CRUD routes, one set per entity type.

use crate::handlers::resource::{create, delete, list, read, update};
use crate::models::{Gym, Location, Member, MemberStatus, Plan, User, Visit};
use crate::resource::Resource;
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/{path}` and `/{path}/:id` for `T`.
pub fn resource_routes<T: Resource>() -> Router<AppState> {
    let collection = format!("/{}", T::PATH);
    let item = format!("/{}/:id", T::PATH);
    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(&item, get(read::<T>).put(update::<T>).delete(delete::<T>))
}

/// Every entity's routes, unprefixed.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<User>())
        .merge(resource_routes::<MemberStatus>())
        .merge(resource_routes::<Plan>())
        .merge(resource_routes::<Gym>())
        .merge(resource_routes::<Location>())
        .merge(resource_routes::<Member>())
        .merge(resource_routes::<Visit>())
        .with_state(state)
}
