use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stores::types::UserId;

/// Login form fields of the "local" strategy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub(crate) salt: String,
    #[serde(skip)]
    pub(crate) password_digest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingCredentials,
    UnknownEmail,
    WrongPassword,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::MissingCredentials => f.write_str("missing credentials"),
            AuthFailure::UnknownEmail => f.write_str("unknown email"),
            AuthFailure::WrongPassword => f.write_str("wrong password"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// One-shot notification carried by a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Seconds a flash cookie survives if the next page never consumes it.
pub const FLASH_MAX_AGE_SECS: u32 = 60;

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value carrying this flash.
    pub fn cookie(&self) -> String {
        format!(
            "flash={}:{}; Path=/; Max-Age={}; SameSite=Lax; HttpOnly",
            self.kind.as_str(),
            urlencoding::encode(&self.message),
            FLASH_MAX_AGE_SECS
        )
    }
}
