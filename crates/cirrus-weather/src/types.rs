use cirrus_core::LocationError;
use serde::{Deserialize, Serialize};

/// Background image bucket selected from a weather condition keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    ClearSky,
    Cloudy,
    Rain,
    Thunderstorm,
}

impl Background {
    /// Map a condition keyword such as `"Rain"` to its background.
    ///
    /// Matching is case-insensitive. Anything outside the three known
    /// keywords falls back to [`Background::Thunderstorm`].
    pub fn from_condition(condition: &str) -> Self {
        match condition.to_lowercase().as_str() {
            "clear" => Self::ClearSky,
            "clouds" => Self::Cloudy,
            "rain" => Self::Rain,
            _ => Self::Thunderstorm,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ClearSky => "clear.avif",
            Self::Cloudy => "clouds.avif",
            Self::Rain => "rain.avif",
            Self::Thunderstorm => "thunderstorm.avif",
        }
    }

    /// Full asset path under `asset_dir`, e.g. `/images/rain.avif`
    pub fn asset_path(&self, asset_dir: &str) -> String {
        let dir = asset_dir.trim_end_matches('/');
        if dir.is_empty() {
            self.file_name().to_string()
        } else {
            format!("{}/{}", dir, self.file_name())
        }
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(LocationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// What to fetch weather for
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates(Coordinates),
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => write!(f, "{}", name),
            Self::Coordinates(c) => write!(f, "{:.4}, {:.4}", c.latitude, c.longitude),
        }
    }
}

/// Temperature and humidity block of a current-weather response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Degrees Celsius (requests use metric units)
    pub temp: f64,
    /// Relative humidity, percent
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Short category keyword, e.g. "Rain"
    pub main: String,
    /// Human-readable text, e.g. "light rain"
    pub description: String,
}

/// Current weather for one place.
///
/// Mirrors the subset of the OpenWeatherMap `/data/2.5/weather` response the
/// widget uses; every other field in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub name: String,
    pub main: MainReadings,
    pub weather: Vec<ConditionEntry>,
}

impl WeatherReport {
    /// First condition entry; the API lists the primary one first
    pub fn primary_condition(&self) -> Option<&ConditionEntry> {
        self.weather.first()
    }

    pub fn background(&self) -> Option<Background> {
        self.primary_condition()
            .map(|c| Background::from_condition(&c.main))
    }
}
