//! # Map Driver
//!
//! Runs a [`MapCascade`] on tokio: executes its commands (location lookup,
//! resource fetches) and feeds the outcomes back as events. Each state change is
//! published as a [`MapSnapshot`] through the caller's callback.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use shared::{Locale, ResolvedLocation};
use tokio::sync::mpsc;

use super::cascade::{CascadeConfig, MapCascade, MapCommand, MapEvent, MapPhase, MapView, Provider};
use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::http::build_client;
use crate::location::{try_locate, Locator};

/// Fetches a map resource; success means it is usable.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<()>;
}

pub struct HttpResourceLoader {
    client: Client,
}

impl HttpResourceLoader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }
}

#[async_trait]
impl ResourceLoader for HttpResourceLoader {
    #[tracing::instrument(skip(self))]
    async fn load(&self, url: &str) -> Result<()> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        tracing::debug!(
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "Map resource response"
        );

        if status.is_success() {
            Ok(())
        } else {
            Err(CoreError::Http {
                status: status.as_u16(),
                message: "map resource rejected".to_string(),
            })
        }
    }
}

/// What the map screen draws.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub phase: MapPhase,
    pub provider: Option<Provider>,
    pub location: Option<ResolvedLocation>,
    pub view: Option<MapView>,
}

impl MapSnapshot {
    fn of(cascade: &MapCascade) -> Self {
        Self {
            phase: cascade.phase().clone(),
            provider: cascade.provider(),
            location: cascade.location(),
            view: cascade.widget().cloned(),
        }
    }

    pub fn using_fallback_location(&self) -> bool {
        self.location.map(|l| l.is_fallback()).unwrap_or(false)
    }

    pub fn location_badge(&self) -> &'static str {
        if self.using_fallback_location() {
            "Default Loc"
        } else {
            "Live Loc"
        }
    }
}

/// Control side of a running map; dropping it stops the driver.
#[derive(Debug, Clone)]
pub struct MapHandle {
    events: mpsc::UnboundedSender<MapEvent>,
}

impl MapHandle {
    fn send(&self, event: MapEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("Map driver already stopped");
        }
    }

    pub fn surface_attached(&self) {
        self.send(MapEvent::SurfaceAttached);
    }

    pub fn teardown(&self) {
        self.send(MapEvent::Teardown);
    }

    pub fn primary_init_failed(&self, reason: impl Into<String>) {
        self.send(MapEvent::PrimaryInitFailed(reason.into()));
    }

    pub fn retry(&self) {
        self.send(MapEvent::Retry);
    }
}

pub struct MapDriver {
    cascade: MapCascade,
    locator: Arc<dyn Locator>,
    loader: Arc<dyn ResourceLoader>,
    location_enabled: bool,
}

impl MapDriver {
    pub fn new(
        config: &Config,
        locale: Locale,
        locator: Arc<dyn Locator>,
        loader: Arc<dyn ResourceLoader>,
        location_enabled: bool,
    ) -> Self {
        let cascade = MapCascade::new(CascadeConfig {
            maps_api_key: config.maps_api_key.clone(),
            static_maps_url: config.static_maps_url.clone(),
            locale,
        });
        Self {
            cascade,
            locator,
            loader,
            location_enabled,
        }
    }

    /// Start the event loop on the current tokio runtime.
    pub fn spawn<F>(self, on_update: F) -> MapHandle
    where
        F: Fn(MapSnapshot) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = MapHandle { events: tx.clone() };
        tokio::spawn(self.run(tx.downgrade(), rx, on_update));
        handle
    }

    async fn run<F>(
        mut self,
        tx: mpsc::WeakUnboundedSender<MapEvent>,
        mut rx: mpsc::UnboundedReceiver<MapEvent>,
        on_update: F,
    ) where
        F: Fn(MapSnapshot),
    {
        let commands = self.cascade.start();
        self.execute(commands, &tx);
        on_update(MapSnapshot::of(&self.cascade));

        while let Some(event) = rx.recv().await {
            let commands = self.cascade.handle(event);
            self.execute(commands, &tx);
            on_update(MapSnapshot::of(&self.cascade));
        }

        tracing::debug!("Map driver stopped");
    }

    fn execute(&self, commands: Vec<MapCommand>, tx: &mpsc::WeakUnboundedSender<MapEvent>) {
        for command in commands {
            match command {
                MapCommand::RequestLocation { timeout } => {
                    let locator = self.locator.clone();
                    let enabled = self.location_enabled;
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let event = match try_locate(locator.as_ref(), enabled, timeout).await {
                            Some(coords) => MapEvent::LocationResolved(coords),
                            None => MapEvent::LocationUnavailable,
                        };
                        deliver(&tx, event);
                    });
                }
                MapCommand::InjectScript { resource, url } | MapCommand::InjectStylesheet { resource, url } => {
                    let loader = self.loader.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let event = match loader.load(&url).await {
                            Ok(()) => MapEvent::ResourceLoaded(resource),
                            Err(e) => MapEvent::ResourceFailed(resource, e.to_string()),
                        };
                        deliver(&tx, event);
                    });
                }
                MapCommand::RegisterCallback { name } => {
                    tracing::debug!(callback = name, "Primary completion callback registered");
                }
                MapCommand::CreateWidget(view) => {
                    tracing::debug!(provider = view.provider.label(), "Map widget created");
                }
                MapCommand::ReleaseWidget => {
                    tracing::debug!("Map widget released");
                }
            }
        }
    }
}

fn deliver(tx: &mpsc::WeakUnboundedSender<MapEvent>, event: MapEvent) {
    if let Some(tx) = tx.upgrade() {
        let _ = tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::test_support::FixedLocator;
    use parking_lot::Mutex;
    use shared::Coordinates;

    /// Loader failing for URLs containing any of `failing`.
    struct StubLoader {
        failing: Vec<&'static str>,
        loads: Mutex<Vec<String>>,
    }

    impl StubLoader {
        fn new(failing: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                failing,
                loads: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ResourceLoader for StubLoader {
        async fn load(&self, url: &str) -> Result<()> {
            self.loads.lock().push(url.to_string());
            if self.failing.iter().any(|f| url.contains(f)) {
                Err(CoreError::Network("unreachable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    async fn settle(
        driver: MapDriver,
        until: impl Fn(&MapSnapshot) -> bool,
    ) -> MapSnapshot {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = driver.spawn(move |snapshot| {
            let _ = tx.send(snapshot);
        });
        handle.surface_attached();

        let wait = async {
            while let Some(snapshot) = rx.recv().await {
                if until(&snapshot) {
                    return snapshot;
                }
            }
            panic!("driver stopped before settling");
        };
        tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("map did not settle")
    }

    fn config(key: Option<&str>) -> Config {
        let mut config = Config::for_tests("http://localhost:9");
        config.maps_api_key = key.map(str::to_string);
        config
    }

    #[tokio::test]
    async fn test_denied_location_renders_fallback_map() {
        let loader = StubLoader::new(vec![]);
        let driver = MapDriver::new(
            &config(None),
            Locale::En,
            Arc::new(FixedLocator::denied()),
            loader.clone(),
            true,
        );

        let snapshot = settle(driver, |s| !s.phase.is_loading()).await;
        assert_eq!(snapshot.phase, MapPhase::RenderingFallback);
        assert!(snapshot.using_fallback_location());
        assert_eq!(snapshot.location_badge(), "Default Loc");
        assert_eq!(snapshot.view.unwrap().marker.position, Coordinates::FALLBACK);
        assert!(loader.loads.lock().iter().all(|u| !u.contains("staticmap")));
    }

    #[tokio::test]
    async fn test_primary_failure_cascades_to_fallback() {
        let loader = StubLoader::new(vec!["staticmap"]);
        let driver = MapDriver::new(
            &config(Some("maps-key")),
            Locale::En,
            Arc::new(FixedLocator::at(Coordinates::new(22.7, 75.8))),
            loader.clone(),
            true,
        );

        let snapshot = settle(driver, |s| !s.phase.is_loading()).await;
        assert_eq!(snapshot.provider, Some(Provider::Fallback));
        assert_eq!(snapshot.location_badge(), "Live Loc");
        assert_eq!(loader.loads.lock().iter().filter(|u| u.contains("staticmap")).count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_script_failure_is_reported() {
        let driver = MapDriver::new(
            &config(None),
            Locale::En,
            Arc::new(FixedLocator::denied()),
            StubLoader::new(vec!["leaflet.js"]),
            true,
        );

        let snapshot = settle(driver, |s| !s.phase.is_loading()).await;
        assert!(matches!(snapshot.phase, MapPhase::Failed { .. }));
        assert!(snapshot.view.is_none());
    }
}
