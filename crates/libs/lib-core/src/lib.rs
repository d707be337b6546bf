//! # Core Library
//!
//! Everything the Maatiputra client does that is not drawing: configuration,
//! settings, collaborator clients (AI, weather, geocoding, location, map
//! resources), the demo/live fallback wrapper and the canned answers it falls
//! back to.

pub mod ai;
pub mod canned;
pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod location;
pub mod map;
pub mod news;
pub mod request;
pub mod resilient;
pub mod session;
pub mod settings;
pub mod weather;

// Re-export commonly used types
pub use config::Config;
pub use error::{CoreError, Result};
pub use request::RequestGate;
pub use resilient::{Outcome, ResilientCall};
pub use settings::{SettingsService, SharedSettings};
