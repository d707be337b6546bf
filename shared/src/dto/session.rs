//! # Session Records

use serde::{Deserialize, Serialize};

/// Farmer shown as logged in.
///
/// Login is simulated, so every session is a demo session and nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    /// Program identifier, e.g. `KISAN-IN-DEMO-4821`
    pub kisan_id: String,
    pub phone: String,
    pub location: String,
    pub is_demo: bool,
}
