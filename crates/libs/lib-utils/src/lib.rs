//! # Utilities Library
//!
//! Shared utility functions for base64 payloads, uploaded file types, environment
//! variables, calendar labels and login input.

pub mod b64;
pub mod envs;
pub mod files;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64_encode, strip_data_url};
pub use envs::{get_env, get_env_opt, get_env_parse};
pub use files::{mime_from_path, UploadKind};
pub use time::{day_label, month_name, trailing_month_labels};
pub use validation::email_local_part;
