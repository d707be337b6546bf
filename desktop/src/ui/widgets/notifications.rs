//! # Notifications Widget
//!
//! Toast notifications using egui-notify. Handlers queue `(NotifyLevel, message)`
//! pairs in the app state; the frame loop drains them into here.

use egui_notify::Toasts;
use std::time::Duration;

use crate::app::NotifyLevel;

/// How long a toast stays up
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Notification manager for the application
pub struct NotificationManager {
    /// Toast notification system
    pub toasts: Toasts,
}

impl Default for NotificationManager {
    fn default() -> Self {
        let toasts = Toasts::default().with_anchor(egui_notify::Anchor::BottomRight);
        Self { toasts }
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a success notification
    pub fn success(&mut self, message: String) {
        self.toasts.success(message).duration(Some(TOAST_DURATION));
    }

    /// Show an error notification
    pub fn error(&mut self, message: String) {
        self.toasts.error(message).duration(Some(TOAST_DURATION));
    }

    /// Show a warning notification
    pub fn warning(&mut self, message: String) {
        self.toasts.warning(message).duration(Some(TOAST_DURATION));
    }

    /// Show an info notification
    pub fn info(&mut self, message: String) {
        self.toasts.info(message).duration(Some(TOAST_DURATION));
    }

    /// Show a queued notification at its level
    pub fn notify(&mut self, level: NotifyLevel, message: String) {
        match level {
            NotifyLevel::Success => self.success(message),
            NotifyLevel::Info => self.info(message),
            NotifyLevel::Warning => self.warning(message),
            NotifyLevel::Error => self.error(message),
        }
    }

    /// Render notifications in the UI context
    pub fn show(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}
