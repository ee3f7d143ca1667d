//! UI state that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test
//! them on the host.

use activities::{CatalogView, Notice, NoticeLevel};

pub const LOADING_TEXT: &str = "Loading activities...";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    /// Nothing has loaded yet. Stays here if the first load fails.
    #[default]
    Loading,
    Ready(CatalogView),
}

impl ListState {
    pub fn options(&self) -> &[String] {
        match self {
            ListState::Loading => &[],
            ListState::Ready(view) => &view.options,
        }
    }
}

/// CSS class for the message area.
pub fn message_class(notice: Option<&Notice>) -> &'static str {
    match notice.map(|n| n.level) {
        None => "message hidden",
        Some(NoticeLevel::Success) => "message success",
        Some(NoticeLevel::Error) => "message error",
    }
}
