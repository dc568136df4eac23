//! Authentication Module
//!
//! Registration of users and the login flow.
//!
//! ## Overview
//! - **`users`**: the user directory and the `"local"` strategy (email + password).
//! - **`delegate`**: maps a strategy's success or failure onto a fixed redirect
//!   target and flash message. It never errors to the caller.
//! - **`handlers`**: `POST /register` and `POST /login`.

pub mod delegate;
pub mod handlers;
pub mod types;
pub mod users;

#[cfg(test)]
mod tests;
