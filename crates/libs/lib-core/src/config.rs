//! # Application Configuration
//!
//! Configuration loaded from environment variables (and a `.env` file via `dotenvy`).
//! Every collaborator URL is configurable so tests and self-hosted mirrors can point
//! the client elsewhere.
//!
//! ## Credentials
//!
//! Two optional credentials drive the live/demo split:
//!
//! | Variable                                   | Enables                          |
//! |--------------------------------------------|----------------------------------|
//! | `GEMINI_API_KEY` (alias `API_KEY`)          | Live soil, leaf, price and chat  |
//! | `GOOGLE_MAPS_API_KEY` (alias `VITE_GOOGLE_MAPS_API_KEY`) | Primary satellite map provider |
//!
//! Blank values count as absent.
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{init_config, core_config};
//!
//! init_config().ok();
//! let config = core_config();
//! println!("AI live: {}", config.has_ai_credential());
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::envs::{get_env_opt, get_env_parse};

use crate::error::{CoreError, Result};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_IP_GEOLOCATION_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_STATIC_MAPS_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
pub const DEFAULT_SETTINGS_PATH: &str = "./maatiputra-settings.json";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Generative AI credential; `None` puts every AI tool in demo mode
    pub gemini_api_key: Option<String>,

    /// Primary map provider credential; `None` selects the open fallback provider
    pub maps_api_key: Option<String>,

    pub gemini_base_url: String,
    pub open_meteo_base_url: String,
    pub geocoding_base_url: String,
    pub nominatim_base_url: String,
    pub ip_geolocation_url: String,
    pub static_maps_url: String,

    /// JSON file backing the durable settings store
    pub settings_path: PathBuf,

    /// Default per-request timeout for collaborator calls
    ///
    /// Individual operations apply tighter bounds (weather 5 s, leaf 15 s).
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            maps_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            open_meteo_base_url: DEFAULT_OPEN_METEO_BASE_URL.to_string(),
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            nominatim_base_url: DEFAULT_NOMINATIM_BASE_URL.to_string(),
            ip_geolocation_url: DEFAULT_IP_GEOLOCATION_URL.to_string(),
            static_maps_url: DEFAULT_STATIC_MAPS_URL.to_string(),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let defaults = Config::default();

        let http_timeout_secs = match get_env_opt("HTTP_TIMEOUT_SECS") {
            Some(_) => get_env_parse::<u64>("HTTP_TIMEOUT_SECS").map_err(|e| {
                CoreError::Config(format!("HTTP_TIMEOUT_SECS must be a valid number: {}", e))
            })?,
            None => defaults.http_timeout_secs,
        };

        Ok(Self {
            gemini_api_key: get_env_opt("GEMINI_API_KEY").or_else(|| get_env_opt("API_KEY")),
            maps_api_key: get_env_opt("GOOGLE_MAPS_API_KEY")
                .or_else(|| get_env_opt("VITE_GOOGLE_MAPS_API_KEY")),
            gemini_base_url: get_env_opt("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            open_meteo_base_url: get_env_opt("OPEN_METEO_BASE_URL")
                .unwrap_or(defaults.open_meteo_base_url),
            geocoding_base_url: get_env_opt("OPEN_METEO_GEOCODING_URL")
                .unwrap_or(defaults.geocoding_base_url),
            nominatim_base_url: get_env_opt("NOMINATIM_BASE_URL")
                .unwrap_or(defaults.nominatim_base_url),
            ip_geolocation_url: get_env_opt("IP_GEOLOCATION_URL")
                .unwrap_or(defaults.ip_geolocation_url),
            static_maps_url: get_env_opt("STATIC_MAPS_URL").unwrap_or(defaults.static_maps_url),
            settings_path: get_env_opt("MAATIPUTRA_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.settings_path),
            http_timeout_secs,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(CoreError::Config(
                "HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        for (name, url) in [
            ("GEMINI_BASE_URL", &self.gemini_base_url),
            ("OPEN_METEO_BASE_URL", &self.open_meteo_base_url),
            ("OPEN_METEO_GEOCODING_URL", &self.geocoding_base_url),
            ("NOMINATIM_BASE_URL", &self.nominatim_base_url),
            ("IP_GEOLOCATION_URL", &self.ip_geolocation_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CoreError::Config(format!("{} must be an http(s) URL", name)));
            }
        }

        Ok(())
    }

    /// Config pointing every collaborator at one mock server, with both credentials set.
    pub fn for_tests(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            gemini_api_key: Some("test-key".to_string()),
            maps_api_key: Some("test-maps-key".to_string()),
            gemini_base_url: base.to_string(),
            open_meteo_base_url: base.to_string(),
            geocoding_base_url: base.to_string(),
            nominatim_base_url: base.to_string(),
            ip_geolocation_url: format!("{}/json/", base),
            static_maps_url: format!("{}/maps/api/staticmap", base),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            http_timeout_secs: 5,
        }
    }

    pub fn has_ai_credential(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn has_maps_credential(&self) -> bool {
        self.maps_api_key.is_some()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if environment values are invalid, validation fails, or the
/// config has already been initialized.
pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| CoreError::Config("Config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
///
/// Falls back to [`Config::default`] (demo mode everywhere) when [`init_config`]
/// was never called or failed.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(|| {
        tracing::warn!("Config not initialized, using defaults (demo mode)");
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_demo_mode() {
        let config = Config::default();
        assert!(!config.has_ai_credential());
        assert!(!config.has_maps_credential());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = Config {
            nominatim_base_url: "ftp://example.org".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
