//! # Collaborator Services
//!
//! Every collaborator a screen can reach, built once at startup and shared behind
//! an `Arc`. Fields are trait objects so tests can swap in offline stubs.

use std::sync::Arc;

use lib_core::ai::{self, AdvisoryService, ChatAssistant};
use lib_core::geo::{Geocoder, HttpGeocoder};
use lib_core::location::{IpLocator, Locator};
use lib_core::map::{HttpResourceLoader, ResourceLoader};
use lib_core::news::{MockNewsFeed, NewsFeed};
use lib_core::weather::{OpenMeteoClient, WeatherService};
use lib_core::Config;

pub struct Services {
    pub config: Config,
    pub advisory: AdvisoryService,
    pub chat: ChatAssistant,
    pub weather: Arc<WeatherService>,
    pub geocoder: Arc<dyn Geocoder>,
    pub locator: Arc<dyn Locator>,
    pub news: Arc<dyn NewsFeed>,
    pub map_loader: Arc<dyn ResourceLoader>,
}

impl Services {
    /// Wire the real HTTP collaborators for `config`.
    ///
    /// Missing credentials leave the AI tools in demo mode and the map on its
    /// open-data provider.
    pub fn from_config(config: Config) -> Self {
        let backend = ai::backend_from_config(&config);
        let geocoder: Arc<dyn Geocoder> = Arc::new(HttpGeocoder::new(&config));
        let weather = Arc::new(WeatherService::new(
            Arc::new(OpenMeteoClient::new(&config)),
            geocoder.clone(),
        ));

        tracing::info!(
            ai_live = config.has_ai_credential(),
            maps_primary = config.has_maps_credential(),
            "Services configured"
        );

        Self {
            advisory: AdvisoryService::new(backend.clone()),
            chat: ChatAssistant::new(backend, weather.clone()),
            weather,
            geocoder,
            locator: Arc::new(IpLocator::new(&config)),
            news: Arc::new(MockNewsFeed::new()),
            map_loader: Arc::new(HttpResourceLoader::new(config.http_timeout())),
            config,
        }
    }

    pub fn ai_live(&self) -> bool {
        self.advisory.is_live()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Offline collaborators for App tests.

    use super::*;
    use async_trait::async_trait;
    use lib_core::geo::Place;
    use lib_core::weather::{ForecastResponse, WeatherApi, WeatherQuery};
    use lib_core::{CoreError, Result};
    use shared::Coordinates;
    use std::time::Duration;

    pub struct DeniedLocator;

    #[async_trait]
    impl Locator for DeniedLocator {
        async fn locate(&self) -> Result<Coordinates> {
            Err(CoreError::NotFound("denied".to_string()))
        }
    }

    pub struct FixedLocator(pub Coordinates);

    #[async_trait]
    impl Locator for FixedLocator {
        async fn locate(&self) -> Result<Coordinates> {
            Ok(self.0)
        }
    }

    pub struct NamedGeocoder(pub Option<String>);

    #[async_trait]
    impl Geocoder for NamedGeocoder {
        async fn search(&self, _name: &str) -> Result<Option<Place>> {
            Ok(None)
        }

        async fn reverse(&self, _coords: Coordinates) -> Result<Option<String>> {
            Ok(self.0.clone())
        }
    }

    pub struct OfflineWeather;

    #[async_trait]
    impl WeatherApi for OfflineWeather {
        async fn fetch(&self, _coords: Coordinates, _query: WeatherQuery) -> Result<ForecastResponse> {
            Err(CoreError::Network("offline".to_string()))
        }
    }

    pub struct OkLoader;

    #[async_trait]
    impl ResourceLoader for OkLoader {
        async fn load(&self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Demo-mode services with no network access.
    pub fn offline(locator: Arc<dyn Locator>, district: Option<&str>) -> Services {
        let config = Config::default();
        let geocoder: Arc<dyn Geocoder> = Arc::new(NamedGeocoder(district.map(str::to_string)));
        let weather = Arc::new(WeatherService::new(Arc::new(OfflineWeather), geocoder.clone()));

        Services {
            config,
            advisory: AdvisoryService::new(None),
            chat: ChatAssistant::new(None, weather.clone()),
            weather,
            geocoder,
            locator,
            news: Arc::new(MockNewsFeed::with_latency(Duration::ZERO)),
            map_loader: Arc::new(OkLoader),
        }
    }
}
