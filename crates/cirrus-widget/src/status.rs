//! The widget's single message slot.
//!
//! Failures and confirmations share one line; the newest message replaces
//! whatever was there. `kind` lets a host style them apart.

use cirrus_core::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn invalid_city() -> Self {
        Self::error("Please enter a valid city name.")
    }

    pub fn location_denied() -> Self {
        Self::error("Unable to retrieve your location. Please try again.")
    }

    pub fn location_unsupported() -> Self {
        Self::error("Geolocation is not supported on this system.")
    }

    pub fn fetch_failed() -> Self {
        Self::error("Error fetching weather data.")
    }

    pub fn no_weather_data() -> Self {
        Self::error("No weather data available to add to favorites.")
    }

    pub fn already_favorite() -> Self {
        Self::error("City is already in favorites.")
    }

    pub fn favorite_added(city: &str) -> Self {
        Self::info(format!("{} added to favorites!", city))
    }

    pub fn no_such_favorite(position: usize) -> Self {
        Self::error(format!("No favorite at position {}.", position))
    }

    pub fn storage_failed(err: &StorageError) -> Self {
        Self::error(err.user_message())
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
