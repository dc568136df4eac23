//! Typeahead client
//!
//! Turns keystrokes into a live, escaped, keyboard-navigable list of stores.
//!
//! ## Submodules
//! - **`widget`**: The headless state machine. Inputs issue sequenced requests; only
//!   the response to the latest request is rendered.
//! - **`render`**: HTML for the results panel, with escaping.
//! - **`client`**: The `SearchClient` seam, its `reqwest` implementation and a session driver.

pub mod client;
pub mod render;
pub mod widget;

#[cfg(test)]
mod tests;
