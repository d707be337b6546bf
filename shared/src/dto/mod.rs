//! # Data Records
//!
//! All records used by the farming assistant.
//!
//! ## Module Organization
//!
//! - [`locale`] - Language selection (`en` / `hi`)
//! - [`geo`] - Coordinates and the Bhopal fallback point
//! - [`session`] - Simulated farmer session
//! - [`weather`] - Weather snapshot and forecast series
//! - [`advisory`] - Soil report, disease result, price prediction
//! - [`news`] - News articles and categories
//! - [`chat`] - Chat messages and grounding links
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Tags**: `Trend`, `Recommendation` and `ChatRole` serialize lowercase
//! - **Partial answers**: AI result types carry `#[serde(default)]`

pub mod advisory;
pub mod chat;
pub mod geo;
pub mod locale;
pub mod news;
pub mod session;
pub mod weather;

pub use advisory::*;
pub use chat::*;
pub use geo::*;
pub use locale::*;
pub use news::*;
pub use session::*;
pub use weather::*;
