//! # Shared Data Model
//!
//! Plain records exchanged between the Maatiputra core library and the desktop client.
//! Every type here is a short-lived value owned by whichever screen created it; nothing
//! in this crate performs I/O.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data records
//!   - **[`dto::locale`]**: Active language and its storage code
//!   - **[`dto::geo`]**: Coordinates and the fallback farm location
//!   - **[`dto::session`]**: Simulated logged-in farmer
//!   - **[`dto::weather`]**: Current conditions and daily forecast
//!   - **[`dto::advisory`]**: Soil, leaf and crop price results
//!   - **[`dto::news`]**: Agriculture news feed entries
//!   - **[`dto::chat`]**: Assistant conversation messages
//! - **[`utils`]**: Display helpers shared by screens
//!
//! ## Wire Format
//!
//! Records that come back from the generative AI backend deserialize from its JSON
//! answers, so field names follow the snake_case keys the prompts ask for. Missing
//! fields fall back to `Default` where a partial answer is still usable.
//!
//! ```rust
//! use shared::dto::advisory::SoilReport;
//!
//! let report: SoilReport = serde_json::from_str(r#"{
//!     "soil_type": "Clay",
//!     "crop_recommendations": ["Rice", "Wheat", "Gram"],
//!     "fertilizer_advice": "Apply gypsum",
//!     "gemini_analysis": "Heavy soil"
//! }"#).unwrap();
//! assert_eq!(report.analysis, "Heavy soil");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
