//! # Chat Tasks

use std::sync::Arc;

use async_channel::Sender;
use lib_core::ai::chat::DEFAULT_LOCATION_CONTEXT;
use lib_core::ai::{ChatContext, PendingTurn};
use parking_lot::RwLock;

use super::{deliver, weather::current_conditions};
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::debug::spawn_tracked;

/// Load the weather card shown above the conversation.
///
/// The coordinates it resolves are reused to ground later replies.
pub(crate) fn fetch_weather(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (services, key, ticket) = {
        let mut state = state.write();
        let key = state.load_key();
        state.chat.loaded_for = Some(key);
        (state.services.clone(), key, state.chat.weather_gate.issue())
    };
    let (locale, location_enabled) = key;

    spawn_tracked("chat_weather", async move {
        let (weather, coords) = current_conditions(&services, location_enabled, locale).await;
        deliver(
            &event_tx,
            AppEvent::ChatWeather {
                generation: ticket.generation,
                weather,
                coords,
            },
        )
        .await;
    });
}

/// Send the typed message.
///
/// Blank input and sends while a reply is outstanding are ignored.
pub(crate) fn send_message(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let job = {
        let mut state = state.write();
        let locale = state.locale();
        let location_label = state
            .session
            .as_ref()
            .map(|user| user.location.clone())
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION_CONTEXT.to_string());

        let chat = &mut state.chat;
        let text = std::mem::take(&mut chat.input);
        match chat.session.begin_send(&text) {
            Some(turn) => {
                let ctx = ChatContext {
                    location_label,
                    coords: chat.coords,
                    locale,
                };
                Some((turn, ctx, chat.reply_gate.issue()))
            }
            None => {
                chat.input = text;
                None
            }
        }
    };
    let Some((PendingTurn { history, message }, ctx, ticket)) = job else {
        return;
    };
    let services = state.read().services.clone();

    spawn_tracked("chat_reply", async move {
        let reply = services.chat.respond(&history, &message, &ctx).await;
        tracing::info!(
            grounding = reply.grounding.len(),
            is_demo = reply.is_demo,
            "Assistant replied"
        );
        deliver(
            &event_tx,
            AppEvent::ChatReplied {
                generation: ticket.generation,
                reply,
            },
        )
        .await;
    });
}
