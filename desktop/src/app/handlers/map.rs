//! # Farm Map Handlers
//!
//! Reports from the map screen back into the running map driver.

use crate::app::state::AppState;
use parking_lot::RwLock;
use std::sync::Arc;

/// The keyed satellite image could not be drawn; the driver moves to open tiles.
///
/// Safe to report more than once, the driver ignores it once off the primary provider.
pub(crate) fn handle_primary_failed(state: Arc<RwLock<AppState>>, reason: String) {
    let handle = state.read().map.handle.clone();
    match handle {
        Some(handle) => handle.primary_init_failed(reason),
        None => tracing::debug!("Primary map failure reported with no map running"),
    }
}

/// Start the map over after a terminal failure.
pub(crate) fn handle_retry(state: Arc<RwLock<AppState>>) {
    let handle = state.read().map.handle.clone();
    if let Some(handle) = handle {
        tracing::info!("Retrying map");
        handle.retry();
    }
}
