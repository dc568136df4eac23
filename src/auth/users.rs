//! Registered users and the "local" email/password strategy.

use super::delegate::Strategy;
use super::types::{AuthFailure, Credentials, RegisterInput, User};
use crate::error::AppError;
use crate::stores::types::UserId;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sha2::{Digest, Sha256};
use std::fmt::Write;

pub const LOCAL_STRATEGY: &str = "local";

#[derive(Default)]
pub struct UserDirectory {
    users: DashMap<UserId, User>,
    by_email: DashMap<String, UserId>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, input: &RegisterInput) -> Result<User, AppError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::MalformedPayload("You must supply a name!".into()));
        }
        let email = normalize_email(&input.email)
            .ok_or_else(|| AppError::MalformedPayload("That Email is not valid!".into()))?;
        if input.password.is_empty() {
            return Err(AppError::MalformedPayload("Password cannot be blank!".into()));
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.clone(),
            password_digest: digest(&salt, &input.password),
            salt,
        };

        match self.by_email.entry(email.clone()) {
            Entry::Occupied(_) => return Err(AppError::EmailTaken(email)),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }
        self.users.insert(user.id.clone(), user.clone());

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.get(id).map(|u| u.clone())
    }

    pub fn exists(&self, id: &UserId) -> bool {
        self.users.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Strategy for UserDirectory {
    fn name(&self) -> &'static str {
        LOCAL_STRATEGY
    }

    fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthFailure> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthFailure::MissingCredentials);
        }
        let email = normalize_email(&credentials.email).ok_or(AuthFailure::UnknownEmail)?;
        let id = self
            .by_email
            .get(&email)
            .map(|id| id.clone())
            .ok_or(AuthFailure::UnknownEmail)?;
        let user = self.get(&id).ok_or(AuthFailure::UnknownEmail)?;

        if digest(&user.salt, &credentials.password) != user.password_digest {
            return Err(AuthFailure::WrongPassword);
        }
        Ok(user)
    }
}

/// Trimmed, lower-cased address; `None` unless it looks like `local@domain`.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || email.contains(' ') {
        return None;
    }
    Some(email)
}

// TODO: swap for a memory-hard KDF (argon2) before exposing registration publicly.
fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());

    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}
