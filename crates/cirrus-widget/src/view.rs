//! What the widget shows, as plain data.

use crate::state::WidgetState;
use crate::status::Status;

pub const TITLE: &str = "Weather App";
pub const SUBMIT_LABEL: &str = "Get Weather";
pub const FAVORITE_LABEL: &str = "Add to Favorites";
pub const LOADING_TEXT: &str = "Loading...";
pub const FAVORITES_HEADING: &str = "Favorite Cities";

/// Weather panel contents, present only when data is loaded and idle
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDetails {
    pub city: String,
    /// e.g. `"18°C"`
    pub temperature: String,
    pub condition: String,
    /// e.g. `"60%"`
    pub humidity: String,
    /// Asset path of the background image
    pub background: Option<String>,
}

/// Snapshot of everything a host needs to draw the widget
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    /// Current input value; the form is always shown
    pub input: String,
    pub status: Option<Status>,
    pub loading: bool,
    pub details: Option<WeatherDetails>,
    pub favorites: Vec<String>,
}

impl WidgetView {
    pub fn from_state(state: &WidgetState, asset_dir: &str) -> Self {
        let details = match (&state.weather, state.loading) {
            (Some(report), false) => Some(WeatherDetails {
                city: report.name.clone(),
                temperature: format!("{}°C", report.main.temp),
                condition: report
                    .primary_condition()
                    .map(|c| c.description.clone())
                    .unwrap_or_default(),
                humidity: format!("{}%", report.main.humidity),
                background: state.background.map(|b| b.asset_path(asset_dir)),
            }),
            _ => None,
        };

        Self {
            input: state.city.clone(),
            status: state.status.clone().filter(|s| !s.text.is_empty()),
            loading: state.loading,
            details,
            favorites: state.favorites.iter().map(str::to_string).collect(),
        }
    }
}
