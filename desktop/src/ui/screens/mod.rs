//! # Screen Modules
//!
//! Each screen module contains the rendering logic for one screen of the application.
//!
//! ## Screen Organization
//!
//! - **[`home`]**: Landing page with the feature overview
//! - **[`login`]**: Simulated farmer login
//! - **[`dashboard`]**: Greeting, weather widget, news feed and mandi rates
//! - **[`map`]**: Satellite farm map with provider fallback
//! - **[`weather`]**: Seven-day forecast
//! - **[`soil`]**: Soil Health Card analysis
//! - **[`leaf`]**: Leaf disease check
//! - **[`price`]**: Fasaldaam price prediction
//! - **[`chat`]**: Sahayak chat assistant
//! - **[`settings`]**: Language, location access and profile
//!
//! ## Rendering Pattern
//!
//! All screen modules follow the same shape:
//!
//! ```rust,ignore
//! pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut impl AppLike) {
//!     // - Read from the state snapshot
//!     // - Handle user input
//!     // - Call app.handle_* methods for actions
//! }
//! ```
//!
//! ## State Access Pattern
//!
//! Screens receive a **cloned state snapshot** for rendering:
//!
//! - State is cloned before rendering (no locks held while drawing)
//! - Text fields are edited on local copies and written back through `app.state()`
//!   only when they change
//! - User actions call `app.handle_*` methods, which take locks internally and spawn
//!   any background work
//!
//! ## Navigation
//!
//! Screens navigate using [`crate::app::AppLike::handle_screen_change`]:
//!
//! ```rust,ignore
//! if button.clicked() {
//!     app.handle_screen_change(Screen::Soil);
//! }
//! ```

pub mod chat;
pub mod dashboard;
pub mod home;
pub mod leaf;
pub mod login;
pub mod map;
pub mod price;
pub mod settings;
pub mod soil;
pub mod weather;
