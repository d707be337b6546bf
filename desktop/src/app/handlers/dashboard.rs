//! # Dashboard Handlers
//!
//! News feed filter, copying an article link and opening links in the browser.

use crate::app::state::{AppState, NotifyLevel};
use parking_lot::RwLock;
use shared::NewsFilter;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the "Copied" badge stays on an article
pub const COPIED_BADGE: Duration = Duration::from_secs(2);

pub(crate) fn handle_news_filter(state: Arc<RwLock<AppState>>, filter: NewsFilter) {
    state.write().dashboard.filter = filter;
}

/// Record that an article link was copied (the UI puts it on the clipboard).
pub(crate) fn handle_link_copied(state: Arc<RwLock<AppState>>, article_id: String) {
    state.write().dashboard.copied = Some((article_id, Instant::now()));
}

/// Whether `article_id` should still show its "Copied" badge.
pub fn is_recently_copied(state: &AppState, article_id: &str) -> bool {
    matches!(
        &state.dashboard.copied,
        Some((id, at)) if id == article_id && at.elapsed() < COPIED_BADGE
    )
}

/// Open an article or grounding link in the system browser.
pub(crate) fn handle_open_link(state: Arc<RwLock<AppState>>, url: String) {
    if url.is_empty() || url == "#" {
        return;
    }
    if let Err(e) = open::that(&url) {
        tracing::error!(url = %url, error = %e, "Failed to open link");
        state
            .write()
            .notify(NotifyLevel::Error, format!("Could not open link: {}", url));
    }
}
