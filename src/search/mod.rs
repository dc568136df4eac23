//! Search Service Module
//!
//! Text and proximity search over store listings.
//!
//! ## Responsibilities
//! - **Tokenization**: Splitting names, descriptions and queries into normalized tokens.
//! - **Text index**: Inverted index over `name` + `description`; query tokens match terms by prefix.
//! - **Geo index**: Stored points queried by great-circle distance.
//! - **API**: `GET /api/search?q=` for the typeahead and `GET /api/near?lat=&lng=`.
//!
//! ## Submodules
//! - **`engine`**: The text index and result hydration.
//! - **`geo`**: The point index and haversine distance.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`tokenizer`**: Text processing utilities.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod engine;
pub mod geo;
pub mod handlers;
pub mod tokenizer;
pub mod types;
