use super::service::StoreService;
use super::types::*;
use crate::auth::users::UserDirectory;
use crate::error::AppError;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub reviews: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub reviews: Option<bool>,
}

fn check_author(users: &UserDirectory, input: &StoreInput) -> Result<(), AppError> {
    match &input.author {
        Some(author) if !author.0.trim().is_empty() && !users.exists(author) => {
            Err(AppError::UnknownAuthor(author.to_string()))
        }
        _ => Ok(()),
    }
}

pub async fn handle_create_store(
    Extension(stores): Extension<Arc<StoreService>>,
    Extension(users): Extension<Arc<UserDirectory>>,
    Json(input): Json<StoreInput>,
) -> Result<(StatusCode, Json<Store>), AppError> {
    check_author(&users, &input)?;
    let store = stores.create(&input)?;
    Ok((StatusCode::CREATED, Json(store)))
}

pub async fn handle_update_store(
    Extension(stores): Extension<Arc<StoreService>>,
    Extension(users): Extension<Arc<UserDirectory>>,
    Path(id): Path<String>,
    Json(input): Json<StoreInput>,
) -> Result<Json<Store>, AppError> {
    check_author(&users, &input)?;
    let store = stores.update(&StoreId(id), &input)?;
    Ok(Json(store))
}

pub async fn handle_get_store(
    Extension(stores): Extension<Arc<StoreService>>,
    Path(slug): Path<String>,
    Query(params): Query<ReadParams>,
) -> Result<Json<StoreView>, AppError> {
    stores
        .find_by_slug(&slug, Populate::from_flag(params.reviews))
        .map(Json)
        .ok_or(AppError::StoreNotFound)
}

pub async fn handle_list_stores(
    Extension(stores): Extension<Arc<StoreService>>,
    Query(params): Query<ListParams>,
) -> Json<StorePage> {
    Json(stores.list(
        params.page.unwrap_or(1),
        Populate::from_flag(params.reviews),
    ))
}

pub async fn handle_tags(Extension(stores): Extension<Arc<StoreService>>) -> Json<TagListing> {
    Json(stores.stores_by_tag(None))
}

pub async fn handle_stores_by_tag(
    Extension(stores): Extension<Arc<StoreService>>,
    Path(tag): Path<String>,
) -> Json<TagListing> {
    Json(stores.stores_by_tag(Some(&tag)))
}

pub async fn handle_top_stores(
    Extension(stores): Extension<Arc<StoreService>>,
) -> Json<Vec<TopStore>> {
    Json(stores.top_stores())
}
