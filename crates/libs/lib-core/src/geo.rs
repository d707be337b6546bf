//! # Geocoding
//!
//! Forward place search (Open-Meteo geocoding) and reverse lookup (Nominatim).
//! Both are best effort: "not found" is `Ok(None)`, transport problems are errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::Coordinates;

use crate::config::Config;
use crate::error::Result;
use crate::http::{build_client, get_json};

/// A forward geocoding hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub admin1: Option<String>,
    pub coords: Coordinates,
}

impl Place {
    /// `"Indore, Madhya Pradesh"`, keeping the trailing separator when the region is
    /// unknown so the label matches what the assistant has always been shown.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.admin1.as_deref().unwrap_or(""))
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for a free-text place name.
    async fn search(&self, name: &str) -> Result<Option<Place>>;

    /// Best human label for a coordinate (city, town, village, district, county).
    async fn reverse(&self, coords: Coordinates) -> Result<Option<String>>;
}

// ========== Wire Types ==========

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    admin1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state_district: Option<String>,
    county: Option<String>,
}

impl Address {
    fn best_label(self) -> Option<String> {
        [self.city, self.town, self.village, self.state_district, self.county]
            .into_iter()
            .flatten()
            .find(|label| !label.trim().is_empty())
    }
}

// ========== HTTP Geocoder ==========

pub struct HttpGeocoder {
    client: Client,
    search_base: String,
    reverse_base: String,
}

impl HttpGeocoder {
    pub fn new(config: &Config) -> Self {
        Self {
            client: build_client(config.http_timeout()),
            search_base: config.geocoding_base_url.trim_end_matches('/').to_string(),
            reverse_base: config.nominatim_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    #[tracing::instrument(skip(self))]
    async fn search(&self, name: &str) -> Result<Option<Place>> {
        let url = format!("{}/v1/search", self.search_base);
        let response: SearchResponse = get_json(
            &self.client,
            &url,
            &[
                ("name", name.to_string()),
                ("count", "1".to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ],
        )
        .await?;

        Ok(response.results.into_iter().next().map(|hit| Place {
            name: hit.name,
            admin1: hit.admin1,
            coords: Coordinates::new(hit.latitude, hit.longitude),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn reverse(&self, coords: Coordinates) -> Result<Option<String>> {
        let url = format!("{}/reverse", self.reverse_base);
        let response: ReverseResponse = get_json(
            &self.client,
            &url,
            &[
                ("format", "json".to_string()),
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
            ],
        )
        .await?;

        Ok(response.address.and_then(Address::best_label))
    }
}
