//! Last-city and unit preference with a freshness window.

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::error::WidgetError;
use crate::store::KeyValueStore;
use crate::types::{Coordinates, TemperatureUnit, UserPreference};

pub const PREFERENCE_KEY: &str = "userPreferences";

pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Overwrite the stored preference, stamped with the current time.
    pub fn save(
        &self,
        city: &str,
        coordinates: &Coordinates,
        unit: TemperatureUnit,
    ) -> Result<UserPreference, WidgetError> {
        let preference = UserPreference {
            last_city_visited: city.to_string(),
            coordinates: coordinates.clone(),
            temperature_unit: unit,
            timestamp: Utc::now().timestamp_millis(),
        };

        let json = serde_json::to_string(&preference)
            .map_err(|e| WidgetError::PreferenceSave(e.into()))?;
        self.store
            .set(PREFERENCE_KEY, &json)
            .map_err(WidgetError::PreferenceSave)?;

        tracing::debug!("Saved preference for {} ({:?})", city, unit);
        Ok(preference)
    }

    /// Returns the stored preference if present and still fresh.
    ///
    /// Unreadable or malformed data is an error; a missing, expired or
    /// implausibly stamped entry is `Ok(None)`.
    pub fn load(&self) -> Result<Option<UserPreference>, WidgetError> {
        let Some(json) = self
            .store
            .get(PREFERENCE_KEY)
            .map_err(WidgetError::PreferenceLoad)?
        else {
            return Ok(None);
        };

        let preference: UserPreference =
            serde_json::from_str(&json).map_err(|e| WidgetError::PreferenceLoad(e.into()))?;

        match Utc::now().timestamp_millis().checked_sub(preference.timestamp) {
            Some(age) if age >= 0 && age < self.ttl.num_milliseconds() => Ok(Some(preference)),
            Some(age) if age >= 0 => {
                tracing::debug!("Ignoring preference saved {} ms ago", age);
                Ok(None)
            }
            _ => {
                tracing::warn!(
                    "Ignoring preference with invalid timestamp {}",
                    preference.timestamp
                );
                Ok(None)
            }
        }
    }
}
