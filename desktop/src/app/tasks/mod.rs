//! # Async Tasks
//!
//! Background work for every screen. Each task takes what it needs from the state
//! under a short lock, issues a ticket from the screen's gate, runs the collaborator
//! call on Tokio and reports back through an [`AppEvent`](crate::app::AppEvent).

pub mod advisory;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod map;
pub mod weather;

use async_channel::Sender;

use crate::app::events::AppEvent;

/// Deliver an event to the UI thread; a closed channel means the app is exiting.
pub(crate) async fn deliver(event_tx: &Sender<AppEvent>, event: AppEvent) {
    if event_tx.send(event).await.is_err() {
        tracing::debug!("Event channel closed, dropping task result");
    }
}
