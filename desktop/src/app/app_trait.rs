//! # App Trait
//!
//! The surface screen renderers see. Screens read the shared state and report
//! user actions through these methods; they never spawn work themselves.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Locale, NewsFilter};

use crate::app::{AppState, Screen};

/// Trait for application-like types that screen renderers can use.
pub trait AppLike {
    /// Get access to the application state.
    fn state(&self) -> &Arc<RwLock<AppState>>;

    // Auth methods
    fn handle_login_click(&mut self);
    fn handle_logout(&mut self);

    // Navigation methods
    fn handle_screen_change(&mut self, screen: Screen);
    fn next_screen(&mut self);
    fn previous_screen(&mut self);

    // Settings methods
    fn handle_locale_change(&mut self, locale: Locale);
    fn handle_location_toggle(&mut self);

    // Dashboard methods
    fn handle_news_filter(&mut self, filter: NewsFilter);
    fn handle_link_copied(&mut self, article_id: String);
    fn handle_open_link(&mut self, url: String);

    // Advisory methods
    fn handle_soil_file(&mut self, path: &Path);
    fn handle_analyze_soil(&mut self);
    fn handle_leaf_file(&mut self, path: &Path);
    fn handle_check_leaf(&mut self);
    fn handle_predict_price(&mut self);
    fn handle_detect_district(&mut self);

    // Chat methods
    fn handle_chat_send(&mut self);

    // Map methods
    fn handle_map_primary_failed(&mut self, reason: String);
    fn handle_map_retry(&mut self);
}
