//! The weather widget: input handling, startup location lookup, fetching,
//! and favorites.
//!
//! State sits behind an `Arc<Mutex<_>>` so a cloned handle can drive a fetch
//! from another task. The lock is only held for short synchronous sections,
//! never across an `.await`. Superseded fetches are not cancelled; whichever
//! response lands last wins.

use std::sync::Arc;

use cirrus_core::{AppError, Config, LocationError};
use cirrus_weather::{
    location, AddOutcome, Favorites, FileStore, Geolocator, KeyValueStore, WeatherApi,
    WeatherProvider, WeatherQuery,
};
use parking_lot::Mutex;

use crate::state::WidgetState;
use crate::status::Status;
use crate::view::WidgetView;

#[derive(Clone)]
pub struct WeatherWidget {
    state: Arc<Mutex<WidgetState>>,
    api: Arc<dyn WeatherApi>,
    geolocator: Arc<dyn Geolocator>,
    store: Arc<dyn KeyValueStore>,
    asset_dir: String,
}

/// Resets `loading` when the fetch settles, including when its future is dropped
struct LoadingGuard {
    state: Arc<Mutex<WidgetState>>,
}

impl LoadingGuard {
    fn start(state: &Arc<Mutex<WidgetState>>) -> Self {
        state.lock().loading = true;
        Self {
            state: Arc::clone(state),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.lock().loading = false;
    }
}

impl WeatherWidget {
    pub fn new(
        api: Arc<dyn WeatherApi>,
        geolocator: Arc<dyn Geolocator>,
        store: Arc<dyn KeyValueStore>,
        asset_dir: impl Into<String>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(WidgetState::default())),
            api,
            geolocator,
            store,
            asset_dir: asset_dir.into(),
        }
    }

    /// Wire the production collaborators described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api = WeatherProvider::new(&config.weather)?;
        let geolocator = location::from_config(&config.location)?;
        let store = FileStore::open(config.storage.effective_data_dir())?;

        Ok(Self::new(
            Arc::new(api),
            geolocator,
            Arc::new(store),
            config.weather.asset_dir.clone(),
        ))
    }

    /// Startup: load favorites, then try the device location.
    ///
    /// A located device gets an automatic fetch; otherwise the status line
    /// explains why and nothing is fetched.
    pub async fn mount(&self) {
        let favorites = Favorites::load(self.store.as_ref());
        tracing::info!("Widget mounted with {} favorites", favorites.len());
        self.state.lock().favorites = favorites;

        match self.geolocator.locate().await {
            Ok(coords) => {
                self.fetch_weather(WeatherQuery::Coordinates(coords)).await;
            }
            Err(LocationError::Unsupported) => {
                tracing::info!("Geolocation unavailable on this host");
                self.set_status(Status::location_unsupported());
            }
            Err(e) => {
                tracing::warn!("Failed to get location: {}", e);
                self.set_status(Status::location_denied());
            }
        }
    }

    /// Fetch current weather for a city or a position.
    pub async fn fetch_weather(&self, query: WeatherQuery) {
        let _loading = LoadingGuard::start(&self.state);

        let result = self.api.current(&query).await;

        let mut state = self.state.lock();
        match result {
            Ok(report) => {
                tracing::info!("Weather loaded for {}", report.name);
                state.apply_report(report);
            }
            Err(e) => {
                tracing::warn!("Weather fetch for {} failed: {}", query, e);
                state.status = Some(Status::fetch_failed());
                state.clear_weather();
            }
        }
    }

    /// Replace the text in the city input.
    pub fn set_city(&self, text: impl Into<String>) {
        self.state.lock().city = text.into();
    }

    /// Submit the city form.
    pub async fn submit(&self) {
        let city = {
            let mut state = self.state.lock();
            state.status = None;
            state.city.trim().to_string()
        };

        if city.is_empty() {
            self.set_status(Status::invalid_city());
            return;
        }

        self.fetch_weather(WeatherQuery::City(city)).await;
    }

    /// Fetch weather for the favorite at 1-based `position`.
    pub async fn fetch_favorite(&self, position: usize) {
        let city = {
            let mut state = self.state.lock();
            state.status = None;
            position
                .checked_sub(1)
                .and_then(|i| state.favorites.get(i))
                .map(str::to_string)
        };

        match city {
            Some(city) => self.fetch_weather(WeatherQuery::City(city)).await,
            None => self.set_status(Status::no_such_favorite(position)),
        }
    }

    /// Save the currently displayed city as a favorite.
    pub fn add_to_favorites(&self) {
        let mut state = self.state.lock();

        let Some(city) = state.weather.as_ref().map(|w| w.name.clone()) else {
            state.status = Some(Status::no_weather_data());
            return;
        };

        let status = match state.favorites.add(&city, self.store.as_ref()) {
            Ok(AddOutcome::Added) => Status::favorite_added(&city),
            Ok(AddOutcome::AlreadyPresent) => Status::already_favorite(),
            Err(e) => {
                tracing::error!("Failed to persist favorites: {}", e);
                Status::storage_failed(&e)
            }
        };
        state.status = Some(status);
    }

    fn set_status(&self, status: Status) {
        self.state.lock().status = Some(status);
    }

    /// Copy of the current state.
    pub fn state(&self) -> WidgetState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::from_state(&self.state.lock(), &self.asset_dir)
    }
}
