//! # Reusable UI Widgets
//!
//! Common widgets used across screens.

pub mod badges;
pub mod forms;
pub mod layouts;
pub mod nav_bar;
pub mod notifications;
