//! # Farm Map Tasks
//!
//! The map driver lives while the map screen is shown. Its snapshots arrive as
//! [`AppEvent::MapUpdated`] tagged with the generation it was started under.

use std::sync::Arc;

use async_channel::Sender;
use lib_core::map::MapDriver;
use parking_lot::RwLock;

use crate::app::events::AppEvent;
use crate::app::state::AppState;

/// Start (or restart) the map for the current settings.
pub(crate) fn start(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let mut state = state.write();
    stop_locked(&mut state);

    let (locale, location_enabled) = state.load_key();
    let services = state.services.clone();
    let ticket = state.map.gate.issue();

    let driver = MapDriver::new(
        &services.config,
        locale,
        services.locator.clone(),
        services.map_loader.clone(),
        location_enabled,
    );
    let handle = driver.spawn(move |snapshot| {
        let event = AppEvent::MapUpdated {
            generation: ticket.generation,
            snapshot,
        };
        if event_tx.try_send(event).is_err() {
            tracing::debug!("Event channel closed, dropping map update");
        }
    });
    // The map panel exists as soon as the screen is shown
    handle.surface_attached();

    tracing::info!(generation = ticket.generation, "Map started");
    state.map.handle = Some(handle);
    state.map.loaded_for = Some((locale, location_enabled));
}

/// Tear the map down when leaving its screen.
pub(crate) fn stop(state: Arc<RwLock<AppState>>) {
    stop_locked(&mut state.write());
}

fn stop_locked(state: &mut AppState) {
    if let Some(handle) = state.map.handle.take() {
        handle.teardown();
        tracing::debug!("Map stopped");
    }
    state.map.gate.invalidate();
    state.map.snapshot = None;
    state.map.loaded_for = None;
}
