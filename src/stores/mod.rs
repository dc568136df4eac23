//! Store Record Model
//!
//! Store listings: their shape, validation, slugs, persistence and read-side
//! aggregations.
//!
//! ## Overview
//! A store is created by a registered author. Its slug is derived from the
//! name and disambiguated against existing slugs every time the name changes.
//! Reviews are never stored on the record; reads join them in explicitly.
//!
//! ## Submodules
//! - **`types`**: records, payloads and read models.
//! - **`validate`**: required-field checks reporting every violated field.
//! - **`slug`**: `slugify`, the disambiguation policies and `prepare_for_save`.
//! - **`memory`**: in-memory records with a unique slug index plus text and geo indices.
//! - **`aggregate`**: tag counts, top-rated stores, stores by tag.
//! - **`service`**: create/update/read paths and the review join.
//! - **`handlers`**: HTTP handlers for the Axum web server.

pub mod aggregate;
pub mod handlers;
pub mod memory;
pub mod service;
pub mod slug;
pub mod types;
pub mod validate;
