use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
        }
    }
}

/// Weather condition categories mapped from 7Timer! civil product codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    Overcast,
    Humid,
    LightRain,
    OccasionalShowers,
    IsolatedShowers,
    LightSnow,
    Rain,
    Snow,
    RainSnow,
    Thunderstorm,
    Windy,
}

impl WeatherCondition {
    /// Convert a civil forecast code. Unknown codes yield `None`.
    /// See: https://www.7timer.info/doc.php?lang=en#civillight
    pub fn from_code(code: &str) -> Option<Self> {
        let condition = match code {
            "clear" => Self::Clear,
            "pcloudy" => Self::PartlyCloudy,
            "mcloudy" => Self::MostlyCloudy,
            "cloudy" => Self::Overcast,
            "humid" => Self::Humid,
            "lightrain" => Self::LightRain,
            "oshower" => Self::OccasionalShowers,
            "ishower" => Self::IsolatedShowers,
            "lightsnow" => Self::LightSnow,
            "rain" => Self::Rain,
            "snow" => Self::Snow,
            "rainsnow" => Self::RainSnow,
            "ts" => Self::Thunderstorm,
            "windy" => Self::Windy,
            _ => return None,
        };
        Some(condition)
    }

    /// Card label
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::PartlyCloudy => "PARTLY CLOUDY",
            Self::MostlyCloudy => "CLOUDY",
            Self::Overcast => "OVERCAST",
            Self::Humid => "MISTY",
            Self::LightRain => "LIGHT RAIN",
            Self::OccasionalShowers => "OCCASIONAL SHOWERS",
            Self::IsolatedShowers => "ISOLATED SHOWERS",
            Self::LightSnow => "LIGHT SNOW",
            Self::Rain => "RAIN",
            Self::Snow => "SNOW",
            Self::RainSnow => "SLEET",
            Self::Thunderstorm => "THUNDERSTORM",
            Self::Windy => "WINDY",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::MostlyCloudy => "🌥️",
            Self::Overcast => "☁️",
            Self::Humid => "🌫️",
            Self::LightRain => "🌦️",
            Self::OccasionalShowers | Self::IsolatedShowers | Self::Rain => "🌧️",
            Self::LightSnow => "🌨️",
            Self::Snow => "❄️",
            Self::RainSnow => "🌨️🌧️",
            Self::Thunderstorm => "⛈️",
            Self::Windy => "💨",
        }
    }
}

/// A city from the catalog. Coordinates keep the catalog's text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRecord {
    pub city: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl CityRecord {
    /// Label shown in the selector, e.g. "Paris, France"
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(&self.latitude, &self.longitude)
    }
}

/// Coordinate pair as supplied by the catalog or a stored preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: String,
    pub lon: String,
}

impl Coordinates {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Parse and range-check: lat in [-90, 90], lon in [-180, 180].
    pub fn parse(&self) -> Result<(f64, f64), WidgetError> {
        let lat: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| WidgetError::InvalidCoordinates)?;
        let lon: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| WidgetError::InvalidCoordinates)?;

        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(WidgetError::InvalidCoordinates);
        }
        Ok((lat, lon))
    }
}

/// Min/max 2 m temperature in whole degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temp2m {
    pub min: i32,
    pub max: i32,
}

/// One day of the civil forecast, as returned upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// YYYYMMDD
    pub date: i64,
    pub weather: String,
    pub temp2m: Temp2m,
}

/// Saved city and unit, restored on the next start while fresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    pub last_city_visited: String,
    pub coordinates: Coordinates,
    pub temperature_unit: TemperatureUnit,
    /// Epoch milliseconds of the write
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCacheEntry {
    pub forecast: Vec<DailyRecord>,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(WeatherCondition::from_code("clear"), Some(WeatherCondition::Clear));
        assert_eq!(WeatherCondition::from_code("ts"), Some(WeatherCondition::Thunderstorm));
        assert_eq!(WeatherCondition::from_code("cloudy"), Some(WeatherCondition::Overcast));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(WeatherCondition::from_code("hail"), None);
        assert_eq!(WeatherCondition::from_code("CLEAR"), None);
    }

    #[test]
    fn test_condition_labels_and_icons() {
        assert_eq!(WeatherCondition::RainSnow.description(), "SLEET");
        assert_eq!(WeatherCondition::Humid.description(), "MISTY");
        assert_eq!(WeatherCondition::Clear.icon(), "☀️");
        assert_eq!(WeatherCondition::IsolatedShowers.icon(), "🌧️");
    }

    #[test]
    fn test_unit_toggle() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggled(), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
    }

    #[test]
    fn test_coordinates_parse() {
        assert_eq!(
            Coordinates::new("48.8566", "2.3522").parse().unwrap(),
            (48.8566, 2.3522)
        );
        assert_eq!(Coordinates::new("-90", "180").parse().unwrap(), (-90.0, 180.0));
    }

    #[test]
    fn test_coordinates_out_of_range() {
        assert!(matches!(
            Coordinates::new("200", "0").parse(),
            Err(WidgetError::InvalidCoordinates)
        ));
        assert!(Coordinates::new("0", "-180.5").parse().is_err());
        assert!(Coordinates::new("abc", "0").parse().is_err());
        assert!(Coordinates::new("NaN", "0").parse().is_err());
    }

    #[test]
    fn test_preference_json_shape() {
        let pref = UserPreference {
            last_city_visited: "Paris, France".into(),
            coordinates: Coordinates::new("48.8566", "2.3522"),
            temperature_unit: TemperatureUnit::Fahrenheit,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&pref).unwrap();
        assert_eq!(json["lastCityVisited"], "Paris, France");
        assert_eq!(json["coordinates"]["lat"], "48.8566");
        assert_eq!(json["temperatureUnit"], "Fahrenheit");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_daily_record_ignores_extra_fields() {
        let record: DailyRecord = serde_json::from_str(
            r#"{"date":20250303,"weather":"clear","temp2m":{"max":20,"min":10},"wind10m_max":3}"#,
        )
        .unwrap();
        assert_eq!(record.date, 20250303);
        assert_eq!(record.temp2m, Temp2m { min: 10, max: 20 });
    }
}
