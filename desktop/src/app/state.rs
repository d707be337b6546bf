//! # Application State Types
//!
//! All state-related types for the application: screens, the simulated session,
//! and one state block per screen.
//!
//! Each screen that talks to a collaborator owns a [`RequestGate`]. Gates survive
//! screen resets so a completion from before a reset can never match a newer
//! ticket.

use std::sync::Arc;
use std::time::Instant;

use lib_core::ai::{ChatSession, SoilInput};
use lib_core::map::{MapHandle, MapSnapshot};
use lib_core::weather::Forecast;
use lib_core::{RequestGate, SharedSettings};
use shared::{
    Coordinates, DiseaseResult, Locale, NewsArticle, NewsFilter, PriceHistoryPoint,
    PricePrediction, SessionUser, SoilReport, WeatherSnapshot,
};

use crate::core::Services;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Landing page with feature overview
    Home,
    /// Simulated login form
    Login,
    /// Greeting, weather widget and news feed
    Dashboard,
    /// Satellite farm map
    Map,
    /// Seven-day forecast
    Weather,
    /// Soil health card analysis
    Soil,
    /// Leaf disease check
    Leaf,
    /// Fasaldaam crop price prediction
    Price,
    /// Sahayak chat assistant
    Chat,
    /// Language and location preferences
    Settings,
}

impl Screen {
    /// Get all screens in Tab navigation order
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Home,
            Screen::Login,
            Screen::Dashboard,
            Screen::Map,
            Screen::Weather,
            Screen::Soil,
            Screen::Leaf,
            Screen::Price,
            Screen::Chat,
            Screen::Settings,
        ]
    }

    /// Sidebar entries for a logged-in user
    pub fn sidebar() -> &'static [Screen] {
        &[
            Screen::Dashboard,
            Screen::Map,
            Screen::Weather,
            Screen::Soil,
            Screen::Leaf,
            Screen::Price,
            Screen::Chat,
            Screen::Settings,
        ]
    }

    /// Get screen title for header and sidebar display
    pub fn title(&self, locale: Locale) -> &'static str {
        match self {
            Screen::Home => "Maatiputra",
            Screen::Login => locale.pick("Login", "लॉगिन"),
            Screen::Dashboard => locale.pick("Dashboard", "डैशबोर्ड"),
            Screen::Map => locale.pick("Farm Map (Satellite)", "खेत का नक्शा (सैटेलाइट)"),
            Screen::Weather => locale.pick("Weather Forecast", "मौसम"),
            Screen::Soil => locale.pick("Soil Analysis", "मृदा परीक्षण"),
            Screen::Leaf => locale.pick("Leaf Health", "फसल रोग"),
            Screen::Price => locale.pick("Fasaldaam", "फसल दाम"),
            Screen::Chat => locale.pick("Sahayak (Chat)", "सहायक (चैट)"),
            Screen::Settings => locale.pick("Settings", "सेटिंग्स"),
        }
    }
}

/// Settings values a screen's data depends on; a change triggers a reload.
pub type LoadKey = (Locale, bool);

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub in_progress: bool,
}

/// Dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub weather: Option<WeatherSnapshot>,
    pub weather_loading: bool,
    pub weather_gate: RequestGate,
    pub news: Vec<NewsArticle>,
    pub news_loading: bool,
    pub news_error: Option<String>,
    pub news_gate: RequestGate,
    pub filter: NewsFilter,
    /// Article whose link was just copied, and when
    pub copied: Option<(String, Instant)>,
    pub loaded_for: Option<LoadKey>,
}

/// Soil analysis state
#[derive(Debug, Clone, Default)]
pub struct SoilState {
    pub file_name: Option<String>,
    pub input: Option<SoilInput>,
    pub loading: bool,
    pub result: Option<SoilReport>,
    pub error: Option<String>,
    pub gate: RequestGate,
}

impl SoilState {
    /// Fresh screen, keeping the gate and staling anything in flight.
    pub fn reset(&mut self) {
        self.gate.invalidate();
        *self = Self {
            gate: self.gate.clone(),
            ..Self::default()
        };
    }
}

/// Picked leaf photo
#[derive(Debug, Clone)]
pub struct LeafImage {
    pub file_name: String,
    pub mime_type: String,
    pub b64: String,
    /// Raw bytes for the preview
    pub bytes: Arc<[u8]>,
}

/// Leaf check state
#[derive(Debug, Clone, Default)]
pub struct LeafState {
    pub image: Option<LeafImage>,
    pub loading: bool,
    pub result: Option<DiseaseResult>,
    pub error: Option<String>,
    pub gate: RequestGate,
}

impl LeafState {
    pub fn reset(&mut self) {
        self.gate.invalidate();
        *self = Self {
            gate: self.gate.clone(),
            ..Self::default()
        };
    }
}

/// Fasaldaam price prediction state
#[derive(Debug, Clone, Default)]
pub struct PriceState {
    /// `CROPS` value; empty until picked
    pub crop: String,
    pub district: String,
    pub loading: bool,
    pub prediction: Option<PricePrediction>,
    pub history: Vec<PriceHistoryPoint>,
    pub gate: RequestGate,
    pub detecting: bool,
    pub detect_gate: RequestGate,
}

impl PriceState {
    pub fn reset(&mut self) {
        self.gate.invalidate();
        self.detect_gate.invalidate();
        *self = Self {
            gate: self.gate.clone(),
            detect_gate: self.detect_gate.clone(),
            ..Self::default()
        };
    }
}

/// Chat assistant state
#[derive(Debug, Clone)]
pub struct ChatState {
    pub session: ChatSession,
    pub input: String,
    pub weather: Option<WeatherSnapshot>,
    pub coords: Option<Coordinates>,
    pub weather_gate: RequestGate,
    pub reply_gate: RequestGate,
    pub loaded_for: Option<LoadKey>,
}

impl ChatState {
    pub fn new(locale: Locale) -> Self {
        Self {
            session: ChatSession::new(locale),
            input: String::new(),
            weather: None,
            coords: None,
            weather_gate: RequestGate::new(),
            reply_gate: RequestGate::new(),
            loaded_for: None,
        }
    }

    /// New transcript in `locale`; a reply still in flight is dropped.
    pub fn reset(&mut self, locale: Locale) {
        self.weather_gate.invalidate();
        self.reply_gate.invalidate();
        self.session = ChatSession::new(locale);
        self.input.clear();
        self.weather = None;
        self.coords = None;
        self.loaded_for = None;
    }
}

/// Weather forecast state
#[derive(Debug, Clone, Default)]
pub struct WeatherState {
    pub forecast: Option<Forecast>,
    /// Current conditions for the farm outlook line
    pub current: Option<WeatherSnapshot>,
    pub loading: bool,
    pub gate: RequestGate,
    pub loaded_for: Option<LoadKey>,
}

/// Farm map state
#[derive(Debug, Clone, Default)]
pub struct MapState {
    pub snapshot: Option<MapSnapshot>,
    pub handle: Option<MapHandle>,
    pub gate: RequestGate,
    pub loaded_for: Option<LoadKey>,
}

/// Main application state
#[derive(Clone)]
pub struct AppState {
    /// Current active screen
    pub current_screen: Screen,
    /// Simulated session; `None` when logged out
    pub session: Option<SessionUser>,
    pub login: LoginForm,
    /// Durable language and location preferences
    pub settings: SharedSettings,
    /// Collaborators
    pub services: Arc<Services>,
    /// Toasts queued for the next frame
    pub pending_notifications: Vec<(NotifyLevel, String)>,
    pub dashboard: DashboardState,
    pub soil: SoilState,
    pub leaf: LeafState,
    pub price: PriceState,
    pub chat: ChatState,
    pub weather: WeatherState,
    pub map: MapState,
}

impl AppState {
    pub fn new(settings: SharedSettings, services: Arc<Services>) -> Self {
        let locale = settings.read().locale();
        Self {
            current_screen: Screen::Home,
            session: None,
            login: LoginForm::default(),
            settings,
            services,
            pending_notifications: Vec::new(),
            dashboard: DashboardState::default(),
            soil: SoilState::default(),
            leaf: LeafState::default(),
            price: PriceState::default(),
            chat: ChatState::new(locale),
            weather: WeatherState::default(),
            map: MapState::default(),
        }
    }

    /// Check if a farmer is logged in
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Check if a screen requires a session
    pub fn requires_auth(screen: Screen) -> bool {
        !matches!(screen, Screen::Home | Screen::Login)
    }

    pub fn locale(&self) -> Locale {
        self.settings.read().locale()
    }

    pub fn location_enabled(&self) -> bool {
        self.settings.read().location_enabled()
    }

    pub fn load_key(&self) -> LoadKey {
        let settings = self.settings.read();
        (settings.locale(), settings.location_enabled())
    }

    pub fn notify(&mut self, level: NotifyLevel, message: impl Into<String>) {
        self.pending_notifications.push((level, message.into()));
    }
}
