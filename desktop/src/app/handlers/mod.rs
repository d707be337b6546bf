//! # Event Handlers
//!
//! User action handlers organized by domain.

pub mod advisory;
pub mod auth;
pub mod dashboard;
pub mod map;
pub mod navigation;
pub mod settings;
