//! Forecast cards: date/unit formatting and card markup.

use chrono::NaiveDate;

use crate::types::{DailyRecord, TemperatureUnit, WeatherCondition};

/// Cards shown after the today card.
pub const UPCOMING_DAYS: usize = 6;

const FALLBACK_ICON: &str = "🌍";

/// Whole-degree conversion, rounding halves up.
pub fn to_fahrenheit(celsius: i32) -> i32 {
    (f64::from(celsius) * 9.0 / 5.0 + 32.0 + 0.5).floor() as i32
}

/// Format a YYYYMMDD value as e.g. "Wednesday, January 1".
pub fn format_date(date: i64) -> String {
    let year = date / 10_000;
    let month = (date / 100) % 100;
    let day = date % 100;

    let parsed = i32::try_from(year).ok().and_then(|y| {
        NaiveDate::from_ymd_opt(y, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
    });

    match parsed {
        Some(d) if date > 0 => d.format("%A, %B %-d").to_string(),
        _ => {
            tracing::error!("Error formatting date: {}", date);
            "Invalid date".to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    fn label(self) -> &'static str {
        match self {
            Self::Min => "Min",
            Self::Max => "Max",
        }
    }

    fn spoken(self) -> &'static str {
        match self {
            Self::Min => "Minimum",
            Self::Max => "Maximum",
        }
    }
}

/// One rendered temperature holding both unit values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureReading {
    pub bound: Bound,
    pub celsius: i32,
    pub fahrenheit: i32,
    unit: TemperatureUnit,
}

impl TemperatureReading {
    pub fn new(bound: Bound, celsius: i32, unit: TemperatureUnit) -> Self {
        Self {
            bound,
            celsius,
            fahrenheit: to_fahrenheit(celsius),
            unit,
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Switch the visible unit. Values are never recomputed.
    pub fn show(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    fn value(&self) -> i32 {
        match self.unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }

    pub fn text(&self) -> String {
        format!("{}{}", self.value(), self.unit.symbol())
    }

    pub fn aria_label(&self) -> String {
        format!(
            "{} temperature: {} degrees {}",
            self.bound.spoken(),
            self.value(),
            self.unit.name()
        )
    }

    fn to_html(&self) -> String {
        format!(
            r#"<p>{}: <span class="temp" data-celsius="{}" data-fahrenheit="{}" aria-label="{}">{}</span></p>"#,
            self.bound.label(),
            self.celsius,
            self.fahrenheit,
            self.aria_label(),
            self.text()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub date: i64,
    pub date_label: String,
    pub icon: &'static str,
    pub description: String,
    pub is_today: bool,
    pub min: TemperatureReading,
    pub max: TemperatureReading,
}

impl WeatherCard {
    pub fn new(day: &DailyRecord, is_today: bool, unit: TemperatureUnit) -> Self {
        let condition = WeatherCondition::from_code(&day.weather);
        Self {
            date: day.date,
            date_label: format_date(day.date),
            icon: condition.map(|c| c.icon()).unwrap_or(FALLBACK_ICON),
            description: condition
                .map(|c| c.description().to_string())
                .unwrap_or_else(|| day.weather.clone()),
            is_today,
            min: TemperatureReading::new(Bound::Min, day.temp2m.min, unit),
            max: TemperatureReading::new(Bound::Max, day.temp2m.max, unit),
        }
    }

    pub fn aria_label(&self) -> String {
        let suffix = if self.is_today { ", today" } else { "" };
        format!("Weather forecast for {}{}", self.date_label, suffix)
    }

    pub fn readings_mut(&mut self) -> [&mut TemperatureReading; 2] {
        [&mut self.min, &mut self.max]
    }

    pub fn to_html(&self) -> String {
        let class = if self.is_today {
            "weather-card highlight"
        } else {
            "weather-card"
        };
        format!(
            concat!(
                r#"<div class="{}" aria-label="{}">"#,
                r#"<h3 class="weather-date">{}</h3>"#,
                r#"<p class="weather-icon" aria-hidden="true">{}</p>"#,
                r#"<p class="weather-description">{}</p>"#,
                "<h4>Temperatures</h4>{}{}</div>"
            ),
            class,
            escape_html(&self.aria_label()),
            escape_html(&self.date_label),
            self.icon,
            escape_html(&self.description),
            self.min.to_html(),
            self.max.to_html(),
        )
    }
}

/// Cards for the two display regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForecast {
    pub today: WeatherCard,
    pub upcoming: Vec<WeatherCard>,
}

/// Build the today card and up to six upcoming cards, keeping API order.
pub fn render(forecast: &[DailyRecord], unit: TemperatureUnit) -> Option<RenderedForecast> {
    let Some((first, rest)) = forecast.split_first() else {
        tracing::warn!("No weather data available.");
        return None;
    };

    Some(RenderedForecast {
        today: WeatherCard::new(first, true, unit),
        upcoming: rest
            .iter()
            .take(UPCOMING_DAYS)
            .map(|day| WeatherCard::new(day, false, unit))
            .collect(),
    })
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
