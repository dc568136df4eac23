use super::delegate::{LoginDelegate, LoginRedirect};
use super::types::{Credentials, RegisterInput, User};
use super::users::UserDirectory;
use crate::error::AppError;

use axum::http::StatusCode;
use axum::{Extension, Form, Json};
use std::sync::Arc;

pub async fn handle_register(
    Extension(users): Extension<Arc<UserDirectory>>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = users.register(&input)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn handle_login(
    Extension(delegate): Extension<Arc<LoginDelegate>>,
    Form(credentials): Form<Credentials>,
) -> LoginRedirect {
    delegate.login(&credentials)
}
