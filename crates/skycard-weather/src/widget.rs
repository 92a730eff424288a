//! Widget controller: wires catalog, preferences, cache, fetcher and view.

use chrono::Duration;
use skycard_core::WeatherConfig;
use std::sync::Arc;

use crate::cache::WeatherCache;
use crate::catalog::load_catalog;
use crate::error::WidgetError;
use crate::preference::PreferenceStore;
use crate::provider::ForecastClient;
use crate::render::render;
use crate::selector::{CitySelector, SelectorInput};
use crate::store::KeyValueStore;
use crate::types::{Coordinates, DailyRecord, TemperatureUnit};
use crate::view::ForecastView;

/// Application state owned by the widget
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub unit: TemperatureUnit,
    /// Selector label of the city on screen, e.g. "Paris, France"
    pub last_city: Option<String>,
    pub current: Option<Coordinates>,
    generation: u64,
}

impl WidgetState {
    /// Generation of the most recently started fetch
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    Cache,
    Network,
}

#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub records: Vec<DailyRecord>,
    pub source: ForecastSource,
}

/// Handle for one in-flight fetch. Only the newest ticket may update the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    coordinates: Coordinates,
    city: Option<String>,
}

impl FetchTicket {
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Label of the city being fetched, when it is known
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
}

pub struct WeatherWidget {
    client: ForecastClient,
    preferences: PreferenceStore,
    cache: Option<WeatherCache>,
    selector: CitySelector,
    view: ForecastView,
    state: WidgetState,
}

impl WeatherWidget {
    pub fn new(config: &WeatherConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, WidgetError> {
        let client = ForecastClient::new(config)?;
        let preferences = PreferenceStore::new(
            store.clone(),
            Duration::hours(i64::from(config.preference_ttl_hours)),
        );
        let cache = config.cache_enabled.then(|| {
            WeatherCache::new(store, Duration::minutes(i64::from(config.cache_ttl_minutes)))
        });

        Ok(Self {
            client,
            preferences,
            cache,
            selector: CitySelector::new(),
            view: ForecastView::new(),
            state: WidgetState::default(),
        })
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn view(&self) -> &ForecastView {
        &self.view
    }

    pub fn selector(&self) -> &CitySelector {
        &self.selector
    }

    /// Load the catalog, then show the saved city if its preference is fresh.
    ///
    /// A catalog failure is shown in the view and stops initialization.
    pub async fn start(&mut self, catalog_source: &str) -> Result<(), WidgetError> {
        let loaded = load_catalog(catalog_source, self.client.http()).await;
        let cities = match loaded {
            Ok(cities) => cities,
            Err(e) => {
                tracing::error!("Error loading cities: {}", e);
                self.view.show_error(e.user_message());
                return Err(e);
            }
        };
        self.selector.populate(&cities);

        match self.restore_preferences() {
            Some(coordinates) => self.show_forecast(coordinates).await,
            None => Ok(()),
        }
    }

    /// Apply a fresh stored preference to the state, selector and toggle.
    ///
    /// Unreadable preferences are reported in the view and treated as absent.
    pub fn restore_preferences(&mut self) -> Option<Coordinates> {
        let preference = match self.preferences.load() {
            Ok(preference) => preference?,
            Err(e) => {
                tracing::warn!("{}", e);
                self.view.show_error(e.user_message());
                return None;
            }
        };
        let coordinates = preference.coordinates;
        if coordinates.lat.is_empty() || coordinates.lon.is_empty() {
            return None;
        }

        tracing::info!("Restoring last city: {}", preference.last_city_visited);
        self.state.unit = preference.temperature_unit;
        self.view.apply_unit(preference.temperature_unit);
        self.selector.set_label(preference.last_city_visited.clone());
        self.state.last_city = Some(preference.last_city_visited);
        self.state.current = Some(coordinates.clone());
        Some(coordinates)
    }

    /// Feed a dropdown interaction; a chosen city is saved and fetched.
    pub async fn handle_selector(&mut self, input: SelectorInput) -> Result<(), WidgetError> {
        let Some(choice) = self.selector.handle(input) else {
            return Ok(());
        };

        self.state.last_city = Some(choice.label);
        self.state.current = Some(choice.coordinates.clone());
        self.save_preferences();
        self.show_forecast(choice.coordinates).await
    }

    /// Flip the displayed unit in place and persist it.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        let unit = self.state.unit.toggled();
        self.state.unit = unit;
        self.view.apply_unit(unit);
        self.save_preferences();
        unit
    }

    fn save_preferences(&mut self) {
        let (Some(city), Some(coordinates)) = (&self.state.last_city, &self.state.current) else {
            return;
        };
        if let Err(e) = self.preferences.save(city, coordinates, self.state.unit) {
            tracing::warn!("{}", e);
            self.view.show_error(e.user_message());
        }
    }

    pub async fn show_forecast(&mut self, coordinates: Coordinates) -> Result<(), WidgetError> {
        let ticket = self.begin_fetch(coordinates);
        let result = self.resolve(&ticket).await;
        self.complete_fetch(ticket, result)
    }

    /// Show the loader and supersede any fetch still in flight.
    pub fn begin_fetch(&mut self, coordinates: Coordinates) -> FetchTicket {
        self.state.generation += 1;
        self.view.show_loader();
        FetchTicket {
            generation: self.state.generation,
            city: self.city_label(&coordinates),
            coordinates,
        }
    }

    fn city_label(&self, coordinates: &Coordinates) -> Option<String> {
        if self.state.current.as_ref() == Some(coordinates) {
            if let Some(city) = &self.state.last_city {
                return Some(city.clone());
            }
        }
        self.selector
            .options()
            .iter()
            .find(|option| &option.coordinates == coordinates)
            .map(|option| option.label.clone())
    }

    /// Validate, consult the cache, then fall back to the network.
    pub async fn resolve(&self, ticket: &FetchTicket) -> Result<ForecastOutcome, WidgetError> {
        let (lat, lon) = ticket.coordinates.parse()?;

        if let Some(records) = self.cache.as_ref().and_then(|c| c.get(lat, lon)) {
            tracing::info!("Using cached weather data");
            return Ok(ForecastOutcome {
                records,
                source: ForecastSource::Cache,
            });
        }

        let records = self.client.fetch(lat, lon).await?;
        if let Some(cache) = &self.cache {
            cache.put(lat, lon, &records);
        }

        Ok(ForecastOutcome {
            records,
            source: ForecastSource::Network,
        })
    }

    /// Apply a fetch result. Results from superseded tickets are dropped
    /// without touching the view or the loader.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ForecastOutcome, WidgetError>,
    ) -> Result<(), WidgetError> {
        if ticket.generation != self.state.generation {
            tracing::debug!(
                "Dropping forecast for generation {} (current {})",
                ticket.generation,
                self.state.generation
            );
            return Ok(());
        }

        self.view.hide_loader();

        match result {
            Ok(outcome) => {
                if let Some(rendered) = render(&outcome.records, self.state.unit) {
                    self.view.show_forecast(rendered);
                }
                if outcome.source == ForecastSource::Cache {
                    let city = ticket.city().unwrap_or("the selected location");
                    self.view
                        .announce(format!("Weather forecast updated for {}", city));
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(retryable = e.is_retryable(), "Weather data unavailable: {}", e);
                self.view.show_error(e.user_message());
                Err(e)
            }
        }
    }
}
