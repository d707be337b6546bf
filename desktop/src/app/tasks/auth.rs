//! # Login Task

use async_channel::Sender;
use lib_core::session;

use super::deliver;
use crate::app::events::AppEvent;
use crate::debug::spawn_tracked;

/// Run the simulated login for `email`.
pub(crate) fn login(event_tx: Sender<AppEvent>, email: String) {
    spawn_tracked("login", async move {
        let user = session::login(&email).await;
        deliver(&event_tx, AppEvent::LoginCompleted(user)).await;
    });
}
