//! # Maatiputra Desktop Client - Library Root
//!
//! A native **egui** desktop client for farmers: soil health card analysis, leaf
//! disease checks, crop price prediction, a chat assistant, weather and a
//! satellite farm map, in English or Hindi.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              maatiputra (this crate)                   │
//! ├────────────────────────────────────────────────────────┤
//! │  egui / eframe  - Immediate-mode GUI                   │
//! │  egui_plot      - Price history chart                  │
//! │  egui_extras    - Remote images (news, map tiles)      │
//! │  Tokio          - Async runtime for collaborator calls │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ lib-core                     │ shared
//!          ▼                              ▼
//! ┌──────────────────────────┐   ┌──────────────────────┐
//! │ AI advisory, weather,    │   │ Records and display  │
//! │ location, news, map,     │   │ helpers              │
//! │ settings, demo data      │   │                      │
//! └──────────────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: State, screen navigation, user action handlers, background tasks
//! - **core**: Error type and the collaborator container
//! - **debug**: File logging and task tracking
//! - **ui**: Theme, fonts, widgets and one module per screen
//!
//! ## Core Concepts
//!
//! ### Event-Driven Architecture
//!
//! - Main thread: input and rendering
//! - Async tasks: every collaborator call (AI, weather, location, news, map)
//!
//! Results flow back to the main thread as [`AppEvent`]s, tagged with the request
//! generation they were started under so stale answers can be dropped.
//!
//! ### Demo Mode
//!
//! Without credentials, or when a live call fails or times out, every tool answers
//! with canned data and marks it as demo. The app never shows an empty screen
//! because a service is down.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p maatiputra
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod ui;

// Re-export commonly used types for convenience
pub use app::{App, AppEvent, AppState, Screen};
pub use core::{AppError, Result};
