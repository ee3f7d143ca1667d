//! Browser front end for the activities board.
//!
//! Only [`ui_model`] is compiled on the host, which keeps the list state and
//! message styling testable with plain `cargo test`. The Leptos app, the fetch
//! transport and the delegated click listener need `--features web` on wasm32.

pub mod ui_model;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
