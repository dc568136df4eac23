//! Store Directory Library
//!
//! This library crate defines the modules behind the `store-directory` server
//! and the `typeahead` client binary.
//!
//! ## Modules
//! - **`stores`**: Store listings. Validation, slug derivation, in-memory persistence with
//!   a unique slug index, and the read-side aggregations (tag counts, top stores).
//! - **`reviews`**: Ratings left on stores, joined onto store reads explicitly.
//! - **`search`**: Free-text and proximity search backing `/api/search` and `/api/near`.
//! - **`typeahead`**: The search-as-you-type widget and its HTTP client.
//! - **`auth`**: User registration and the login delegate (redirects plus flash messages).
//! - **`config`** / **`error`**: Process configuration and the HTTP error mapping.

pub mod auth;
pub mod config;
pub mod error;
pub mod reviews;
pub mod search;
pub mod stores;
pub mod typeahead;
