//! Weather widget for Skycard
//!
//! City catalog loading, 7Timer! civil forecasts, preference and forecast
//! caching over a local key/value store, and card rendering into an
//! in-memory page model.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod preference;
pub mod provider;
pub mod render;
pub mod selector;
pub mod store;
pub mod types;
pub mod view;
pub mod widget;

pub use cache::WeatherCache;
pub use error::WidgetError;
pub use preference::PreferenceStore;
pub use provider::ForecastClient;
pub use render::{format_date, render, to_fahrenheit, RenderedForecast, WeatherCard};
pub use selector::{CityChoice, CitySelector, Key, SelectorInput, SelectorState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::*;
pub use view::{CurrentDay, ForecastView};
pub use widget::{FetchTicket, ForecastOutcome, ForecastSource, WeatherWidget, WidgetState};
