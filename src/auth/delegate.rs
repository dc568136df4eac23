//! Maps the outcome of an authentication strategy onto a redirect and a flash
//! message. The delegate owns no session state.

use super::types::{AuthFailure, Credentials, Flash, User};
use crate::stores::types::UserId;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

pub const SUCCESS_REDIRECT: &str = "/";
pub const SUCCESS_FLASH: &str = "You are now logged in!";
pub const FAILURE_REDIRECT: &str = "/login";
pub const FAILURE_FLASH: &str = "Failed Login!";

/// A named credential check.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthFailure>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub target: String,
    pub flash: Flash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub location: String,
    pub flash: Flash,
    pub user: Option<UserId>,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [
                (header::LOCATION, self.location),
                (header::SET_COOKIE, self.flash.cookie()),
            ],
        )
            .into_response()
    }
}

pub struct LoginDelegate {
    strategy: Arc<dyn Strategy>,
    success: RedirectRule,
    failure: RedirectRule,
}

impl LoginDelegate {
    pub fn new(strategy: Arc<dyn Strategy>) -> Self {
        Self {
            strategy,
            success: RedirectRule {
                target: SUCCESS_REDIRECT.to_string(),
                flash: Flash::success(SUCCESS_FLASH),
            },
            failure: RedirectRule {
                target: FAILURE_REDIRECT.to_string(),
                flash: Flash::error(FAILURE_FLASH),
            },
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Never fails: a rejected login is just the failure redirect.
    pub fn login(&self, credentials: &Credentials) -> LoginRedirect {
        match self.strategy.authenticate(credentials) {
            Ok(user) => {
                tracing::info!("User {} logged in via {}", user.id, self.strategy.name());
                LoginRedirect {
                    location: self.success.target.clone(),
                    flash: self.success.flash.clone(),
                    user: Some(user.id),
                }
            }
            Err(reason) => {
                tracing::warn!("Login via {} rejected: {}", self.strategy.name(), reason);
                LoginRedirect {
                    location: self.failure.target.clone(),
                    flash: self.failure.flash.clone(),
                    user: None,
                }
            }
        }
    }
}
