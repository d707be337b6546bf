//! # Core Abstractions
//!
//! Error type and the collaborator container shared by every screen.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: [`Services`], the collaborator container built from `Config`
//!
//! ## Dependency Injection
//!
//! Collaborators are trait objects from `lib-core`:
//!
//! ```rust,no_run
//! use maatiputra::core::Services;
//!
//! // In production: real HTTP clients, demo mode where credentials are missing
//! let services = Services::from_config(lib_core::config::core_config().clone());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::Services;
