//! Weather widget for Cirrus
//!
//! Owns the widget state and its operations (startup, city search,
//! favorites) and exposes a render-ready [`WidgetView`].

pub mod state;
pub mod status;
pub mod view;
pub mod widget;

pub use state::WidgetState;
pub use status::{Status, StatusKind};
pub use view::{WeatherDetails, WidgetView};
pub use widget::WeatherWidget;
