//! Weather data for Cirrus
//!
//! Current conditions from the OpenWeatherMap API, device location sources,
//! and the locally persisted favorites list.

pub mod favorites;
pub mod location;
pub mod provider;
pub mod storage;
pub mod types;

pub use favorites::{AddOutcome, Favorites, FAVORITES_KEY};
pub use location::{FixedGeolocator, Geolocator, IpGeolocator, UnsupportedGeolocator};
pub use provider::{WeatherApi, WeatherProvider};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::*;
