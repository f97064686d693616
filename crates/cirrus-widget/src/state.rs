use cirrus_weather::{Background, Favorites, WeatherReport};

use crate::status::Status;

/// In-memory widget state, reset whenever a new widget is built
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    /// Text currently in the city input
    pub city: String,
    /// Last successful fetch
    pub weather: Option<WeatherReport>,
    pub status: Option<Status>,
    /// Derived from the first condition of `weather`
    pub background: Option<Background>,
    /// True while a fetch is in flight
    pub loading: bool,
    pub favorites: Favorites,
}

impl WidgetState {
    pub(crate) fn apply_report(&mut self, report: WeatherReport) {
        self.background = report.background();
        self.weather = Some(report);
    }

    pub(crate) fn clear_weather(&mut self) {
        self.weather = None;
        self.background = None;
    }

    pub fn status_text(&self) -> &str {
        self.status.as_ref().map(|s| s.text.as_str()).unwrap_or("")
    }
}
