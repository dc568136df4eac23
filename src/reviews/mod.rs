//! Reviews left on stores.
//!
//! Reviews reference their store by id. `ReviewStore::load_reviews_for` is the
//! join used by store reads and by the top-stores ranking.

pub mod handlers;
pub mod memory;
pub mod types;

#[cfg(test)]
mod tests;
