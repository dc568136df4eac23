use super::types::{Review, ReviewInput};
use crate::auth::users::UserDirectory;
use crate::error::AppError;
use crate::stores::service::StoreService;
use crate::stores::types::StoreId;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_add_review(
    Extension(stores): Extension<Arc<StoreService>>,
    Extension(users): Extension<Arc<UserDirectory>>,
    Path(store_id): Path<String>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    if !users.exists(&input.author) {
        return Err(AppError::UnknownAuthor(input.author.to_string()));
    }

    let review = stores.add_review(&StoreId(store_id), input)?;
    Ok((StatusCode::CREATED, Json(review)))
}
