//! # Application Orchestrator
//!
//! The main [`App`] struct coordinates the UI rendering layer, async tasks and
//! application state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Main Thread (egui)                       │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App (orchestrator)                                  │   │
//! │  │  - on_tick() - called every frame                    │   │
//! │  │  - handle_event() - processes async results          │   │
//! │  │  - handle_*() - user action handlers                 │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │                                             │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>                        │   │
//! │  │  - one block per screen, each with a RequestGate     │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Async Task Threads (Tokio)                     │
//! │  - tasks::dashboard  weather widget, news feed              │
//! │  - tasks::advisory   soil, leaf, price, district            │
//! │  - tasks::chat       weather card, assistant replies        │
//! │  - tasks::weather    seven-day forecast                     │
//! │  - tasks::map        map driver snapshots                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Results
//!
//! Every task takes a ticket from its screen's gate before it starts and sends the
//! ticket's generation back with its result. Navigating away, retrying or changing
//! a setting moves the gate on, so late results are dropped in
//! [`event_handler`] instead of overwriting newer state.
//!
//! ## Related Modules
//!
//! - [`state`]: Application state types and definitions
//! - [`events`]: Event enum for async communication
//! - [`handlers`]: User action handlers
//! - [`tasks`]: Async background tasks

mod app_trait;
mod event_handler;
mod events;
mod handlers;
mod state;
mod tasks;

pub use app_trait::AppLike;
pub use events::AppEvent;
pub use handlers::advisory::{prepare_leaf_upload, prepare_soil_upload};
pub use handlers::dashboard::{is_recently_copied, COPIED_BADGE};
pub use state::*;

use std::path::Path;
use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use lib_core::settings::JsonFileStore;
use lib_core::{Config, SettingsService, SharedSettings};
use parking_lot::RwLock;
use shared::{Locale, NewsFilter};

use crate::core::Services;

/// Main application orchestrator.
///
/// Async tasks report back through an unbounded channel that [`App::on_tick`]
/// drains once per frame.
pub struct App {
    /// Thread-safe shared application state.
    ///
    /// - Use `read()` for reading (shared lock, multiple readers)
    /// - Use `write()` for writing (exclusive lock, single writer)
    /// - **Critical**: Hold locks for minimal duration to prevent UI freezing
    pub state: Arc<RwLock<AppState>>,

    /// Channel receiver for async task results.
    pub event_rx: Receiver<AppEvent>,

    /// Channel sender, cloned into every task.
    event_tx: Sender<AppEvent>,
}

impl App {
    /// Create the application on the landing screen.
    pub fn new(settings: SharedSettings, services: Arc<Services>) -> Self {
        let state = AppState::new(settings, services);
        let (event_tx, event_rx) = unbounded();

        tracing::info!(
            locale = state.locale().code(),
            location_enabled = state.location_enabled(),
            ai_live = state.services.ai_live(),
            "App state initialized"
        );

        Self {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            event_tx,
        }
    }

    /// Create the application with real collaborators and the settings file named
    /// in `config`.
    pub fn from_config(config: &Config) -> Self {
        let store = JsonFileStore::open(&config.settings_path);
        let settings = SettingsService::load(Arc::new(store)).shared();
        let services = Arc::new(Services::from_config(config.clone()));
        Self::new(settings, services)
    }

    /// Called every frame: applies finished task results, then starts any loads
    /// the current screen still needs.
    pub fn on_tick(&mut self) {
        let mut events_processed = 0u32;
        while let Ok(event) = self.event_rx.try_recv() {
            events_processed += 1;
            self.handle_event(event);
        }
        if events_processed > 0 {
            tracing::trace!(events_processed, "on_tick: processed events");
        }

        handlers::navigation::refresh_current_screen(self.state.clone(), self.event_tx.clone());
    }

    /// Handle async event results
    ///
    /// Delegates to the event_handler module for processing.
    fn handle_event(&mut self, event: AppEvent) {
        use event_handler::AppEventHandler;
        self.handle_event_impl(event);
    }

    /// Toasts queued since the last frame.
    pub fn take_notifications(&mut self) -> Vec<(NotifyLevel, String)> {
        std::mem::take(&mut self.state.write().pending_notifications)
    }

    // ========== Auth ==========

    pub fn handle_login_click(&mut self) {
        handlers::auth::handle_login_click(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_logout(&mut self) {
        handlers::auth::handle_logout(self.state.clone());
    }

    // ========== Navigation ==========

    pub fn handle_screen_change(&mut self, screen: Screen) {
        handlers::navigation::handle_screen_change(self.state.clone(), self.event_tx.clone(), screen);
    }

    /// Navigate to next screen in Tab order
    pub fn next_screen(&mut self) {
        handlers::navigation::next_screen(self.state.clone(), self.event_tx.clone());
    }

    /// Navigate to previous screen in Tab order
    pub fn previous_screen(&mut self) {
        handlers::navigation::previous_screen(self.state.clone(), self.event_tx.clone());
    }

    // ========== Settings ==========

    pub fn handle_locale_change(&mut self, locale: Locale) {
        handlers::settings::handle_locale_change(self.state.clone(), locale);
    }

    pub fn handle_location_toggle(&mut self) {
        handlers::settings::handle_location_toggle(self.state.clone());
    }

    // ========== Dashboard ==========

    pub fn handle_news_filter(&mut self, filter: NewsFilter) {
        handlers::dashboard::handle_news_filter(self.state.clone(), filter);
    }

    pub fn handle_link_copied(&mut self, article_id: String) {
        handlers::dashboard::handle_link_copied(self.state.clone(), article_id);
    }

    pub fn handle_open_link(&mut self, url: String) {
        handlers::dashboard::handle_open_link(self.state.clone(), url);
    }

    // ========== Advisory ==========

    pub fn handle_soil_file(&mut self, path: &Path) {
        handlers::advisory::handle_soil_file(self.state.clone(), path);
    }

    pub fn handle_analyze_soil(&mut self) {
        tasks::advisory::analyze_soil(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_leaf_file(&mut self, path: &Path) {
        handlers::advisory::handle_leaf_file(self.state.clone(), path);
    }

    pub fn handle_check_leaf(&mut self) {
        tasks::advisory::check_leaf(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_predict_price(&mut self) {
        tasks::advisory::predict_price(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_detect_district(&mut self) {
        tasks::advisory::detect_district(self.state.clone(), self.event_tx.clone());
    }

    // ========== Chat ==========

    pub fn handle_chat_send(&mut self) {
        tasks::chat::send_message(self.state.clone(), self.event_tx.clone());
    }

    // ========== Map ==========

    pub fn handle_map_primary_failed(&mut self, reason: String) {
        handlers::map::handle_primary_failed(self.state.clone(), reason);
    }

    pub fn handle_map_retry(&mut self) {
        handlers::map::handle_retry(self.state.clone());
    }
}

impl AppLike for App {
    fn state(&self) -> &Arc<RwLock<AppState>> {
        &self.state
    }

    fn handle_login_click(&mut self) {
        App::handle_login_click(self)
    }

    fn handle_logout(&mut self) {
        App::handle_logout(self)
    }

    fn handle_screen_change(&mut self, screen: Screen) {
        App::handle_screen_change(self, screen)
    }

    fn next_screen(&mut self) {
        App::next_screen(self)
    }

    fn previous_screen(&mut self) {
        App::previous_screen(self)
    }

    fn handle_locale_change(&mut self, locale: Locale) {
        App::handle_locale_change(self, locale)
    }

    fn handle_location_toggle(&mut self) {
        App::handle_location_toggle(self)
    }

    fn handle_news_filter(&mut self, filter: NewsFilter) {
        App::handle_news_filter(self, filter)
    }

    fn handle_link_copied(&mut self, article_id: String) {
        App::handle_link_copied(self, article_id)
    }

    fn handle_open_link(&mut self, url: String) {
        App::handle_open_link(self, url)
    }

    fn handle_soil_file(&mut self, path: &Path) {
        App::handle_soil_file(self, path)
    }

    fn handle_analyze_soil(&mut self) {
        App::handle_analyze_soil(self)
    }

    fn handle_leaf_file(&mut self, path: &Path) {
        App::handle_leaf_file(self, path)
    }

    fn handle_check_leaf(&mut self) {
        App::handle_check_leaf(self)
    }

    fn handle_predict_price(&mut self) {
        App::handle_predict_price(self)
    }

    fn handle_detect_district(&mut self) {
        App::handle_detect_district(self)
    }

    fn handle_chat_send(&mut self) {
        App::handle_chat_send(self)
    }

    fn handle_map_primary_failed(&mut self, reason: String) {
        App::handle_map_primary_failed(self, reason)
    }

    fn handle_map_retry(&mut self) {
        App::handle_map_retry(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::test_support::{self, DeniedLocator, FixedLocator};
    use lib_core::ai::SoilInput;
    use lib_core::location::Locator;
    use lib_core::settings::{MemoryStore, SettingsStore};
    use shared::{Coordinates, SessionUser, SoilReport};

    fn app_with(locator: Arc<dyn Locator>, district: Option<&str>) -> (App, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let settings = SettingsService::load(store.clone()).shared();
        let services = Arc::new(test_support::offline(locator, district));
        (App::new(settings, services), store)
    }

    fn offline_app() -> App {
        app_with(Arc::new(DeniedLocator), None).0
    }

    fn farmer() -> SessionUser {
        SessionUser {
            name: "ramesh".to_string(),
            kisan_id: "KISAN-IN-DEMO-4242".to_string(),
            phone: "+91 9876543210".to_string(),
            location: "Indore, MP".to_string(),
            is_demo: true,
        }
    }

    /// Apply task results until `done` holds.
    async fn settle(app: &mut App, done: impl Fn(&AppState) -> bool) {
        while !done(&app.state.read()) {
            let event = app.event_rx.recv().await.unwrap();
            app.handle_event(event);
        }
    }

    // ========== Screen Tests ==========

    #[test]
    fn test_screen_all_returns_correct_order() {
        let screens = Screen::all();
        assert_eq!(screens.len(), 10);
        assert_eq!(screens[0], Screen::Home);
        assert_eq!(screens[1], Screen::Login);
        assert_eq!(screens[2], Screen::Dashboard);
        assert_eq!(screens[9], Screen::Settings);
        assert!(!Screen::sidebar().contains(&Screen::Home));
    }

    #[test]
    fn test_screen_title() {
        assert_eq!(Screen::Price.title(Locale::En), "Fasaldaam");
        assert_eq!(Screen::Price.title(Locale::Hi), "फसल दाम");
        assert_eq!(Screen::Chat.title(Locale::En), "Sahayak (Chat)");
        assert_eq!(Screen::Home.title(Locale::Hi), "Maatiputra");
    }

    #[test]
    fn test_initial_state() {
        let app = offline_app();
        let state = app.state.read();

        assert_eq!(state.current_screen, Screen::Home);
        assert!(!state.is_authenticated());
        assert!(state.price.crop.is_empty());
        assert!(state.chat.session.messages().len() == 1);
    }

    // ========== Navigation Tests ==========

    #[tokio::test]
    async fn test_protected_screen_redirects_to_login() {
        let mut app = offline_app();

        app.handle_screen_change(Screen::Soil);
        assert_eq!(app.state.read().current_screen, Screen::Login);

        app.handle_screen_change(Screen::Home);
        assert_eq!(app.state.read().current_screen, Screen::Home);
    }

    #[tokio::test]
    async fn test_next_screen_skips_protected_screens_when_logged_out() {
        let mut app = offline_app();

        app.next_screen();
        assert_eq!(app.state.read().current_screen, Screen::Login);
        app.next_screen();
        assert_eq!(app.state.read().current_screen, Screen::Home);
        app.previous_screen();
        assert_eq!(app.state.read().current_screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_next_then_previous_screen_returns_to_original() {
        let mut app = offline_app();
        app.state.write().session = Some(farmer());
        app.handle_screen_change(Screen::Weather);

        app.next_screen();
        assert_eq!(app.state.read().current_screen, Screen::Soil);
        app.previous_screen();
        assert_eq!(app.state.read().current_screen, Screen::Weather);
    }

    #[tokio::test]
    async fn test_entering_price_screen_starts_fresh() {
        let mut app = offline_app();
        app.state.write().session = Some(farmer());
        {
            let mut state = app.state.write();
            state.price.crop = "Wheat".to_string();
            state.price.district = "Dewas".to_string();
        }

        app.handle_screen_change(Screen::Price);
        let state = app.state.read();
        assert!(state.price.crop.is_empty());
        assert!(state.price.district.is_empty());
    }

    // ========== Session Tests ==========

    #[tokio::test]
    async fn test_login_event_opens_dashboard() {
        let mut app = offline_app();
        app.state.write().login.password = "secret".to_string();

        app.handle_event(AppEvent::LoginCompleted(farmer()));

        let state = app.state.read();
        assert!(state.is_authenticated());
        assert_eq!(state.current_screen, Screen::Dashboard);
        assert!(state.login.password.is_empty());
        assert_eq!(state.dashboard.loaded_for, Some((Locale::En, true)));
        assert!(state
            .pending_notifications
            .iter()
            .any(|(level, msg)| *level == NotifyLevel::Success && msg == "Logged in using demo mode"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_click_completes_with_demo_session() {
        let mut app = offline_app();
        app.handle_screen_change(Screen::Login);
        app.state.write().login.email = " ramesh@kisan.in ".to_string();

        app.handle_login_click();
        assert!(app.state.read().login.in_progress);
        // A second click while logging in is ignored
        app.handle_login_click();

        settle(&mut app, |s| s.is_authenticated()).await;

        let state = app.state.read();
        assert!(!state.login.in_progress);
        let user = state.session.as_ref().unwrap();
        assert_eq!(user.name, "ramesh");
        assert!(user.is_demo);
    }

    #[tokio::test]
    async fn test_logout_returns_home_and_clears_form() {
        let mut app = offline_app();
        app.handle_event(AppEvent::LoginCompleted(farmer()));
        app.state.write().login.email = "ramesh@kisan.in".to_string();

        app.handle_logout();

        let state = app.state.read();
        assert!(!state.is_authenticated());
        assert_eq!(state.current_screen, Screen::Home);
        assert!(state.login.email.is_empty());
        assert!(state.map.handle.is_none());
    }

    // ========== Stale Result Tests ==========

    #[test]
    fn test_stale_soil_report_is_dropped() {
        let mut app = offline_app();
        let (old, new) = {
            let state = app.state.read();
            (state.soil.gate.issue(), state.soil.gate.issue())
        };
        app.state.write().soil.loading = true;

        let report = |soil_type: &str| SoilReport {
            soil_type: soil_type.to_string(),
            crop_recommendations: vec![],
            fertilizer_advice: String::new(),
            analysis: String::new(),
            is_demo: true,
        };

        app.handle_event(AppEvent::SoilAnalyzed {
            generation: old.generation,
            report: report("Alluvial"),
        });
        assert!(app.state.read().soil.result.is_none());
        assert!(app.state.read().soil.loading);

        app.handle_event(AppEvent::SoilAnalyzed {
            generation: new.generation,
            report: report("Black Cotton Soil"),
        });
        let state = app.state.read();
        assert_eq!(state.soil.result.as_ref().unwrap().soil_type, "Black Cotton Soil");
        assert!(!state.soil.loading);
    }

    #[tokio::test]
    async fn test_leaving_screen_drops_result_in_flight() {
        let mut app = offline_app();
        app.state.write().session = Some(farmer());
        app.handle_screen_change(Screen::Price);
        let ticket = app.state.read().price.detect_gate.issue();

        app.handle_screen_change(Screen::Dashboard);
        app.handle_event(AppEvent::DistrictDetected {
            generation: ticket.generation,
            result: Ok("Dewas".to_string()),
        });

        assert!(app.state.read().price.district.is_empty());
    }

    // ========== Settings Tests ==========

    #[tokio::test]
    async fn test_locale_change_reloads_current_screen() {
        let mut app = offline_app();
        app.handle_event(AppEvent::LoginCompleted(farmer()));
        let before = app.state.read().dashboard.weather_gate.current();

        app.handle_locale_change(Locale::Hi);
        app.on_tick();

        let state = app.state.read();
        assert_eq!(state.dashboard.loaded_for, Some((Locale::Hi, true)));
        assert!(state.dashboard.weather_gate.current() > before);
    }

    #[test]
    fn test_settings_are_persisted() {
        let (mut app, store) = app_with(Arc::new(DeniedLocator), None);

        app.handle_location_toggle();
        app.handle_locale_change(Locale::Hi);

        assert!(!app.state.read().location_enabled());
        assert_eq!(store.get("location_enabled").as_deref(), Some("false"));
        let reloaded = SettingsService::load(store);
        assert_eq!(reloaded.locale(), Locale::Hi);
        assert!(!reloaded.location_enabled());
    }

    // ========== Advisory Tests ==========

    #[tokio::test(start_paused = true)]
    async fn test_soil_analysis_without_credential_uses_demo_report() {
        let mut app = offline_app();
        app.state.write().soil.input = Some(SoilInput::Text("pH 7.8, N low".to_string()));

        app.handle_analyze_soil();
        assert!(app.state.read().soil.loading);

        settle(&mut app, |s| s.soil.result.is_some()).await;
        let state = app.state.read();
        assert!(!state.soil.loading);
        assert!(state.soil.result.as_ref().unwrap().is_demo);
    }

    #[tokio::test(start_paused = true)]
    async fn test_price_prediction_needs_crop_and_district() {
        let mut app = offline_app();
        app.state.write().price.district = "Indore".to_string();

        app.handle_predict_price();
        assert!(!app.state.read().price.loading);

        app.state.write().price.crop = "Wheat".to_string();
        app.handle_predict_price();
        assert!(app.state.read().price.loading);

        settle(&mut app, |s| s.price.prediction.is_some()).await;
        let state = app.state.read();
        assert_eq!(state.price.history.len(), 6);
        assert!(state.price.prediction.as_ref().unwrap().is_demo);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detect_district_fills_field() {
        let coords = Coordinates { lat: 22.72, lon: 75.86 };
        let (mut app, _) = app_with(Arc::new(FixedLocator(coords)), Some("Indore"));

        app.handle_detect_district();
        settle(&mut app, |s| !s.price.detecting).await;

        assert_eq!(app.state.read().price.district, "Indore");
    }

    #[tokio::test(start_paused = true)]
    async fn test_detect_district_reports_denied_location() {
        let mut app = offline_app();

        app.handle_detect_district();
        settle(&mut app, |s| !s.price.detecting).await;

        let state = app.state.read();
        assert!(state.price.district.is_empty());
        assert!(state
            .pending_notifications
            .iter()
            .any(|(level, _)| *level == NotifyLevel::Error));
    }

    // ========== Chat Tests ==========

    #[test]
    fn test_blank_chat_message_is_ignored() {
        let mut app = offline_app();
        app.state.write().chat.input = "   ".to_string();

        app.handle_chat_send();

        let state = app.state.read();
        assert_eq!(state.chat.session.messages().len(), 1);
        assert!(!state.chat.session.is_in_flight());
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_reply_in_demo_mode() {
        let mut app = offline_app();
        app.state.write().chat.input = "Gehu ka bhav kya hai?".to_string();

        app.handle_chat_send();
        {
            let state = app.state.read();
            assert!(state.chat.input.is_empty());
            assert!(state.chat.session.is_in_flight());
        }

        settle(&mut app, |s| !s.chat.session.is_in_flight()).await;
        let state = app.state.read();
        assert_eq!(state.chat.session.messages().len(), 3);
    }
}
