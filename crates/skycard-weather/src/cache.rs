//! Forecast cache keyed by coordinate pair.

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::store::KeyValueStore;
use crate::types::{DailyRecord, WeatherCacheEntry};

pub struct WeatherCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Coordinates are fixed to 4 decimals so equivalent spellings share an entry.
    pub fn cache_key(lat: f64, lon: f64) -> String {
        format!("weather_{:.4}_{:.4}", lat, lon)
    }

    /// Fresh forecast for the pair, or `None` on miss, expiry or read error.
    pub fn get(&self, lat: f64, lon: f64) -> Option<Vec<DailyRecord>> {
        let key = Self::cache_key(lat, lon);
        let json = match self.store.get(&key) {
            Ok(json) => json?,
            Err(e) => {
                tracing::warn!("Error reading weather cache: {}", e);
                return None;
            }
        };

        let entry: WeatherCacheEntry = match serde_json::from_str(&json) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Error reading weather cache: {}", e);
                return None;
            }
        };

        match Utc::now().timestamp_millis().checked_sub(entry.timestamp) {
            Some(age) if age >= 0 && age < self.ttl.num_milliseconds() => Some(entry.forecast),
            Some(age) if age >= 0 => {
                tracing::debug!("Weather cache entry {} expired", key);
                None
            }
            _ => {
                tracing::warn!(
                    "Weather cache entry {} has invalid timestamp {}",
                    key,
                    entry.timestamp
                );
                None
            }
        }
    }

    /// Best-effort write; failures are logged only.
    pub fn put(&self, lat: f64, lon: f64, forecast: &[DailyRecord]) {
        let key = Self::cache_key(lat, lon);
        let entry = WeatherCacheEntry {
            forecast: forecast.to_vec(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let result = serde_json::to_string(&entry)
            .map_err(skycard_core::StorageError::from)
            .and_then(|json| self.store.set(&key, &json));

        if let Err(e) = result {
            tracing::warn!("Error saving weather cache: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Temp2m;

    fn forecast() -> Vec<DailyRecord> {
        vec![
            DailyRecord {
                date: 20250303,
                weather: "clear".into(),
                temp2m: Temp2m { min: 10, max: 20 },
            },
            DailyRecord {
                date: 20250304,
                weather: "cloudy".into(),
                temp2m: Temp2m { min: 8, max: 18 },
            },
        ]
    }

    #[test]
    fn test_put_then_get_hit() {
        let cache = WeatherCache::new(Arc::new(MemoryStore::new()), Duration::hours(3));
        cache.put(48.8566, 2.3522, &forecast());
        assert_eq!(cache.get(48.8566, 2.3522), Some(forecast()));
    }

    #[test]
    fn test_miss_for_other_coordinates() {
        let cache = WeatherCache::new(Arc::new(MemoryStore::new()), Duration::hours(3));
        cache.put(48.8566, 2.3522, &forecast());
        assert_eq!(cache.get(51.5074, -0.1278), None);
    }

    #[test]
    fn test_expired_entry_is_miss() {
        let memory = Arc::new(MemoryStore::new());
        let cache = WeatherCache::new(memory.clone(), Duration::hours(3));
        let entry = WeatherCacheEntry {
            forecast: forecast(),
            timestamp: Utc::now().timestamp_millis() - Duration::hours(3).num_milliseconds(),
        };
        memory
            .set(
                &WeatherCache::cache_key(48.8566, 2.3522),
                &serde_json::to_string(&entry).unwrap(),
            )
            .unwrap();

        assert_eq!(cache.get(48.8566, 2.3522), None);
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(WeatherCache::cache_key(48.8566, 2.3522), "weather_48.8566_2.3522");
        assert_eq!(
            WeatherCache::cache_key(48.85660, 2.35220001),
            WeatherCache::cache_key(48.8566, 2.3522)
        );
        assert_eq!(WeatherCache::cache_key(-33.9, 18.4), "weather_-33.9000_18.4000");
    }

    #[test]
    fn test_corrupt_entry_is_miss() {
        let memory = Arc::new(MemoryStore::new());
        let cache = WeatherCache::new(memory.clone(), Duration::hours(3));
        memory.set(&WeatherCache::cache_key(1.0, 2.0), "[]").unwrap();
        assert_eq!(cache.get(1.0, 2.0), None);
    }

    #[test]
    fn test_out_of_range_timestamp_is_miss() {
        let memory = Arc::new(MemoryStore::new());
        let cache = WeatherCache::new(memory.clone(), Duration::hours(3));
        let key = WeatherCache::cache_key(48.8566, 2.3522);

        for timestamp in [i64::MIN, i64::MAX] {
            let entry = WeatherCacheEntry {
                forecast: forecast(),
                timestamp,
            };
            memory.set(&key, &serde_json::to_string(&entry).unwrap()).unwrap();
            assert_eq!(cache.get(48.8566, 2.3522), None);
        }
    }
}
