//! # activities
//!
//! Client core for the extracurricular activities board.
//!
//! Fetches the activity catalog from the REST API, turns it into a view model,
//! submits signups, and removes participants when a removal control is clicked.
//! Nothing in here touches a DOM or a terminal: front ends plug in through the
//! [`Transport`] and [`View`] traits.
//!
//! ## Quick Start
//!
//! ```ignore
//! use activities::prelude::*;
//!
//! let client = ActivityClient::new(my_transport, my_view);
//! client.load_catalog().await?;
//! client.submit_signup("Chess Club", "michael@mergington.edu").await?;
//! ```
//!
//! ## Modules
//!
//! - [`model`]: Activity and catalog types as they come off the wire
//! - [`protocol`]: Endpoint paths and request/response bodies
//! - [`render`]: View model built from a catalog
//! - [`delegate`]: Removal control tags and delegated click lookup
//! - [`client`]: The `ActivityClient` and its `View` seam
//! - [`transport`]: HTTP request/response types and the `Transport` seam
//! - [`config`]: Base URL and timeout settings

pub mod client;
pub mod config;
pub mod delegate;
pub mod error;
pub mod model;
pub mod protocol;
pub mod render;
pub mod transport;

pub use client::{ActivityClient, Notice, NoticeLevel, View};
pub use config::ClientConfig;
pub use delegate::{RemovalTag, TaggedElement};
pub use error::{ClientError, TransportError};
pub use model::{Activity, Catalog};
pub use render::{ActivityCard, CatalogView, ParticipantEntry};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

/// Prelude for front ends.
pub mod prelude {
    pub use crate::client::{ActivityClient, Notice, NoticeLevel, View};
    pub use crate::config::ClientConfig;
    pub use crate::delegate::{RemovalTag, TaggedElement};
    pub use crate::error::{ClientError, TransportError};
    pub use crate::render::CatalogView;
    pub use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
}
