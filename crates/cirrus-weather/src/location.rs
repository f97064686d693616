//! Device location sources.
//!
//! The widget asks for a position once at startup. Which source answers is
//! picked from `LocationConfig`: an IP lookup, a fixed position from the
//! config file, or nothing at all (capability absent).

use async_trait::async_trait;
use cirrus_core::{LocationConfig, LocationError, LocationProvider};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::types::Coordinates;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Build the geolocator selected by `config`.
pub fn from_config(config: &LocationConfig) -> Result<Arc<dyn Geolocator>, LocationError> {
    match config.provider {
        LocationProvider::Ip => Ok(Arc::new(IpGeolocator::new(&config.lookup_url)?)),
        LocationProvider::Fixed => match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Ok(Arc::new(FixedGeolocator::new(Coordinates::new(
                lat, lon,
            )?))),
            _ => Err(LocationError::ServiceUnavailable(
                "fixed location is missing latitude or longitude".to_string(),
            )),
        },
        LocationProvider::Disabled => Ok(Arc::new(UnsupportedGeolocator)),
    }
}

/// Approximate position from an ip-api.com compatible endpoint
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    client: Client,
    lookup_url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

impl IpGeolocator {
    pub fn new(lookup_url: &str) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LocationError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            lookup_url: lookup_url.to_string(),
        })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(|e| LocationError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LocationError::ServiceUnavailable(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::ServiceUnavailable(e.to_string()))?;

        if body.status != "success" {
            return Err(LocationError::ServiceUnavailable(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocationError::ServiceUnavailable(
                "lookup response has no coordinates".to_string(),
            ));
        };

        let coords = Coordinates::new(lat, lon)?;
        tracing::info!(
            "Located via IP: {}, {} ({})",
            coords.latitude,
            coords.longitude,
            body.city.as_deref().unwrap_or("unknown city")
        );
        Ok(coords)
    }
}

/// Always answers with the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coords: Coordinates,
}

impl FixedGeolocator {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// No location capability on this host
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}
