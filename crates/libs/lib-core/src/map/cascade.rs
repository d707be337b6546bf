//! # Map Provider Cascade
//!
//! Finite-state object that decides which satellite provider renders the farm map
//! and in what order resources are fetched. It performs no I/O: the driver feeds
//! it [`MapEvent`]s and executes the [`MapCommand`]s it returns.
//!
//! ## Phases
//!
//! ```text
//! AcquiringLocation ─► SelectingProvider ─┬─► LoadingPrimaryScript ─► RenderingPrimary
//!                                         │            │ script error / init error
//!                                         │            ▼
//!                                         └─► LoadingFallbackScript ─► RenderingFallback
//!                                                      │ script error
//!                                                      ▼
//!                                                    Failed
//! ```
//!
//! ## Guarantees
//!
//! - Without a maps credential the primary bundle is never requested.
//! - Every resource is injected at most once per cascade run.
//! - The completion callback is registered at most once.
//! - The widget is created only with the surface attached, and never while one
//!   exists.
//! - A location fix arriving after the fallback coordinate was used re-runs
//!   initialization once, and only if no widget exists yet.

use std::collections::HashSet;
use std::time::Duration;

use shared::{Coordinates, Locale, ResolvedLocation};

use crate::location::MAP_LOCATE_TIMEOUT;

/// Name of the completion callback the primary bundle invokes.
pub const PRIMARY_CALLBACK: &str = "initFarmMap";

pub const FARM_ZOOM: u8 = 18;

pub const FALLBACK_STYLESHEET_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const FALLBACK_SCRIPT_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub const IMAGERY_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
pub const LABEL_TILES: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}";
pub const IMAGERY_ATTRIBUTION: &str = "Tiles © Esri, Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Keyed satellite imagery
    Primary,
    /// Open tile imagery, no credential
    Fallback,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Primary => "Google Satellite",
            Provider::Fallback => "Open Satellite Map",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapResource {
    PrimaryBundle,
    FallbackStylesheet,
    FallbackScript,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapPhase {
    AcquiringLocation,
    SelectingProvider,
    LoadingPrimaryScript,
    LoadingFallbackScript,
    RenderingPrimary,
    RenderingFallback,
    Failed { reason: String },
}

impl MapPhase {
    pub fn is_loading(&self) -> bool {
        !matches!(
            self,
            MapPhase::RenderingPrimary | MapPhase::RenderingFallback | MapPhase::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    LocationResolved(Coordinates),
    LocationUnavailable,
    ResourceLoaded(MapResource),
    ResourceFailed(MapResource, String),
    /// The primary provider loaded but could not draw (bad imagery, rejected key)
    PrimaryInitFailed(String),
    SurfaceAttached,
    Teardown,
    /// Start over after `Failed`
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    RequestLocation { timeout: Duration },
    RegisterCallback { name: &'static str },
    InjectScript { resource: MapResource, url: String },
    InjectStylesheet { resource: MapResource, url: String },
    CreateWidget(MapView),
    ReleaseWidget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// URL with `{z}`, `{x}`, `{y}` placeholders, or a single image URL
    pub url: String,
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinates,
    pub title: String,
    pub popup: Option<String>,
    pub animated_drop: bool,
}

/// Everything needed to draw the map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub provider: Provider,
    pub center: Coordinates,
    pub zoom: u8,
    pub layers: Vec<TileLayer>,
    pub marker: MarkerSpec,
}

#[derive(Debug, Clone)]
pub struct CascadeConfig {
    pub maps_api_key: Option<String>,
    pub static_maps_url: String,
    pub locale: Locale,
}

#[derive(Debug, Clone)]
pub struct MapCascade {
    config: CascadeConfig,
    phase: MapPhase,
    location: Option<ResolvedLocation>,
    provider: Option<Provider>,
    injected: HashSet<MapResource>,
    loaded: HashSet<MapResource>,
    callback_registered: bool,
    surface_attached: bool,
    widget: Option<MapView>,
    late_fix_applied: bool,
}

impl MapCascade {
    pub fn new(config: CascadeConfig) -> Self {
        Self {
            config,
            phase: MapPhase::AcquiringLocation,
            location: None,
            provider: None,
            injected: HashSet::new(),
            loaded: HashSet::new(),
            callback_registered: false,
            surface_attached: false,
            widget: None,
            late_fix_applied: false,
        }
    }

    pub fn phase(&self) -> &MapPhase {
        &self.phase
    }

    pub fn provider(&self) -> Option<Provider> {
        self.provider
    }

    pub fn location(&self) -> Option<ResolvedLocation> {
        self.location
    }

    pub fn using_fallback_location(&self) -> bool {
        self.location.map(|l| l.is_fallback()).unwrap_or(false)
    }

    pub fn widget(&self) -> Option<&MapView> {
        self.widget.as_ref()
    }

    /// First commands of a run.
    pub fn start(&mut self) -> Vec<MapCommand> {
        self.phase = MapPhase::AcquiringLocation;
        vec![MapCommand::RequestLocation {
            timeout: MAP_LOCATE_TIMEOUT,
        }]
    }

    /// The transition function.
    pub fn handle(&mut self, event: MapEvent) -> Vec<MapCommand> {
        tracing::debug!(?event, phase = ?self.phase, "Map cascade event");

        match event {
            MapEvent::LocationResolved(coords) => self.on_location(ResolvedLocation::live(coords)),
            MapEvent::LocationUnavailable => self.on_location(ResolvedLocation::fallback()),
            MapEvent::ResourceLoaded(resource) => {
                self.loaded.insert(resource);
                self.try_init()
            }
            MapEvent::ResourceFailed(resource, reason) => self.on_resource_failed(resource, reason),
            MapEvent::PrimaryInitFailed(reason) => {
                if self.provider != Some(Provider::Primary) {
                    return Vec::new();
                }
                tracing::warn!(reason = %reason, "Primary map failed to initialise, switching to fallback");
                let mut commands = self.release();
                commands.extend(self.switch_to_fallback());
                commands
            }
            MapEvent::SurfaceAttached => {
                self.surface_attached = true;
                self.try_init()
            }
            MapEvent::Teardown => {
                self.surface_attached = false;
                self.release()
            }
            MapEvent::Retry => {
                if !matches!(self.phase, MapPhase::Failed { .. }) {
                    return Vec::new();
                }
                let mut commands = self.release();
                let surface_attached = self.surface_attached;
                let callback_registered = self.callback_registered;
                *self = MapCascade::new(self.config.clone());
                self.surface_attached = surface_attached;
                self.callback_registered = callback_registered;
                commands.extend(self.start());
                commands
            }
        }
    }

    fn on_location(&mut self, resolved: ResolvedLocation) -> Vec<MapCommand> {
        match self.location {
            None => {
                if resolved.is_fallback() {
                    tracing::warn!("Location unavailable, using fallback coordinate");
                }
                self.location = Some(resolved);
                if self.phase != MapPhase::AcquiringLocation {
                    return self.try_init();
                }
                self.phase = MapPhase::SelectingProvider;
                self.select_provider()
            }
            Some(current) if current.is_fallback() && !resolved.is_fallback() => {
                if self.widget.is_some() || self.late_fix_applied {
                    tracing::debug!("Late location fix ignored, map already initialised");
                    return Vec::new();
                }
                tracing::info!("Late location fix, re-running map initialisation");
                self.late_fix_applied = true;
                self.location = Some(resolved);
                self.try_init()
            }
            Some(_) => Vec::new(),
        }
    }

    fn select_provider(&mut self) -> Vec<MapCommand> {
        match self.config.maps_api_key.clone() {
            Some(key) => {
                tracing::info!("Maps credential present, selecting primary provider");
                self.provider = Some(Provider::Primary);
                self.phase = MapPhase::LoadingPrimaryScript;

                let mut commands = Vec::new();
                if !self.callback_registered {
                    self.callback_registered = true;
                    commands.push(MapCommand::RegisterCallback {
                        name: PRIMARY_CALLBACK,
                    });
                }
                let url = self.primary_url(&key);
                commands.extend(self.inject(MapResource::PrimaryBundle, url));
                commands.extend(self.try_init());
                commands
            }
            None => {
                tracing::warn!("Maps credential missing, switching to open fallback provider");
                self.switch_to_fallback()
            }
        }
    }

    fn switch_to_fallback(&mut self) -> Vec<MapCommand> {
        self.provider = Some(Provider::Fallback);
        self.phase = MapPhase::LoadingFallbackScript;

        let mut commands = self.inject(MapResource::FallbackStylesheet, FALLBACK_STYLESHEET_URL.to_string());
        commands.extend(self.inject(MapResource::FallbackScript, FALLBACK_SCRIPT_URL.to_string()));
        commands.extend(self.try_init());
        commands
    }

    fn on_resource_failed(&mut self, resource: MapResource, reason: String) -> Vec<MapCommand> {
        match resource {
            MapResource::PrimaryBundle if self.provider == Some(Provider::Primary) => {
                tracing::error!(reason = %reason, "Failed to load primary map bundle, switching to fallback");
                self.switch_to_fallback()
            }
            MapResource::FallbackStylesheet => {
                tracing::warn!(reason = %reason, "Fallback stylesheet failed to load");
                Vec::new()
            }
            MapResource::FallbackScript => {
                tracing::error!(reason = %reason, "Fallback map script failed to load");
                self.phase = MapPhase::Failed { reason };
                Vec::new()
            }
            MapResource::PrimaryBundle => Vec::new(),
        }
    }

    fn inject(&mut self, resource: MapResource, url: String) -> Vec<MapCommand> {
        if !self.injected.insert(resource) {
            return Vec::new();
        }
        match resource {
            MapResource::FallbackStylesheet => vec![MapCommand::InjectStylesheet { resource, url }],
            _ => vec![MapCommand::InjectScript { resource, url }],
        }
    }

    fn ready(&self, provider: Provider) -> bool {
        match provider {
            Provider::Primary => self.loaded.contains(&MapResource::PrimaryBundle),
            Provider::Fallback => self.loaded.contains(&MapResource::FallbackScript),
        }
    }

    fn try_init(&mut self) -> Vec<MapCommand> {
        let (Some(provider), Some(location)) = (self.provider, self.location) else {
            return Vec::new();
        };
        if self.widget.is_some() || !self.surface_attached || !self.ready(provider) {
            return Vec::new();
        }
        if matches!(self.phase, MapPhase::Failed { .. }) {
            return Vec::new();
        }

        let view = self.build_view(provider, location.coords);
        self.phase = match provider {
            Provider::Primary => MapPhase::RenderingPrimary,
            Provider::Fallback => MapPhase::RenderingFallback,
        };
        self.widget = Some(view.clone());
        tracing::info!(provider = provider.label(), lat = location.coords.lat, lon = location.coords.lon, "Map initialised");
        vec![MapCommand::CreateWidget(view)]
    }

    fn release(&mut self) -> Vec<MapCommand> {
        match self.widget.take() {
            Some(_) => vec![MapCommand::ReleaseWidget],
            None => Vec::new(),
        }
    }

    fn primary_url(&self, key: &str) -> String {
        let center = self
            .location
            .map(|l| l.coords)
            .unwrap_or(Coordinates::FALLBACK);
        static_map_url(&self.config.static_maps_url, key, center)
    }

    fn build_view(&self, provider: Provider, center: Coordinates) -> MapView {
        let locale = self.config.locale;
        let title = locale.pick("Your Farm", "आपका खेत").to_string();

        match provider {
            Provider::Primary => {
                let key = self.config.maps_api_key.clone().unwrap_or_default();
                MapView {
                    provider,
                    center,
                    zoom: FARM_ZOOM,
                    layers: vec![TileLayer {
                        url: static_map_url(&self.config.static_maps_url, &key, center),
                        attribution: None,
                    }],
                    marker: MarkerSpec {
                        position: center,
                        title,
                        popup: None,
                        animated_drop: true,
                    },
                }
            }
            Provider::Fallback => MapView {
                provider,
                center,
                zoom: FARM_ZOOM,
                layers: vec![
                    TileLayer {
                        url: IMAGERY_TILES.to_string(),
                        attribution: Some(IMAGERY_ATTRIBUTION.to_string()),
                    },
                    TileLayer {
                        url: LABEL_TILES.to_string(),
                        attribution: None,
                    },
                ],
                marker: MarkerSpec {
                    position: center,
                    title: title.clone(),
                    popup: Some(format!(
                        "{}\n{}",
                        title,
                        locale.pick("Satellite view active", "सैटेलाइट दृश्य सक्रिय")
                    )),
                    animated_drop: false,
                },
            },
        }
    }
}

/// Keyed satellite image centred on `center` at farm zoom.
pub fn static_map_url(base: &str, key: &str, center: Coordinates) -> String {
    format!(
        "{}?center={},{}&zoom={}&size=640x640&scale=2&maptype=satellite&key={}",
        base.trim_end_matches('/'),
        center.lat,
        center.lon,
        FARM_ZOOM,
        key
    )
}
