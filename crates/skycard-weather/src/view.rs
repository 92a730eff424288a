//! In-memory page model: display regions, loader, announcer and unit toggle.

use crate::render::{escape_html, RenderedForecast, TemperatureReading, WeatherCard};
use crate::types::TemperatureUnit;

/// Content of the primary (current-day) region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CurrentDay {
    #[default]
    Empty,
    Forecast(WeatherCard),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ForecastView {
    loading: bool,
    current_day: CurrentDay,
    next_days: Vec<WeatherCard>,
    announcement: String,
    unit: TemperatureUnit,
}

impl ForecastView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_loader(&mut self) {
        self.loading = true;
    }

    pub fn hide_loader(&mut self) {
        self.loading = false;
    }

    pub fn current_day(&self) -> &CurrentDay {
        &self.current_day
    }

    pub fn next_days(&self) -> &[WeatherCard] {
        &self.next_days
    }

    /// Latest text of the screen-reader live region
    pub fn announcement(&self) -> &str {
        &self.announcement
    }

    pub fn announce(&mut self, message: impl Into<String>) {
        self.announcement = message.into();
    }

    pub fn show_forecast(&mut self, rendered: RenderedForecast) {
        self.current_day = CurrentDay::Forecast(rendered.today);
        self.next_days = rendered.upcoming;
    }

    /// Replace the primary region with an error and a retry action.
    pub fn show_error(&mut self, message: &str) {
        self.current_day = CurrentDay::Error(message.to_string());
        self.announce(format!("Error: {}", message));
    }

    /// Every temperature currently on screen, today first.
    pub fn temperatures(&self) -> Vec<&TemperatureReading> {
        let today = match &self.current_day {
            CurrentDay::Forecast(card) => Some(card),
            _ => None,
        };
        today
            .into_iter()
            .chain(self.next_days.iter())
            .flat_map(|card| [&card.min, &card.max])
            .collect()
    }

    /// Flip every rendered reading and the toggle button to `unit`.
    pub fn apply_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
        let today = match &mut self.current_day {
            CurrentDay::Forecast(card) => Some(card),
            _ => None,
        };
        for card in today.into_iter().chain(self.next_days.iter_mut()) {
            for reading in card.readings_mut() {
                reading.show(unit);
            }
        }
    }

    /// Button text offers the unit not currently shown
    pub fn toggle_label(&self) -> String {
        format!("Show in {}", self.unit.toggled().symbol())
    }

    pub fn toggle_pressed(&self) -> bool {
        self.unit == TemperatureUnit::Fahrenheit
    }

    pub fn current_day_html(&self) -> String {
        match &self.current_day {
            CurrentDay::Empty => String::new(),
            CurrentDay::Forecast(card) => card.to_html(),
            CurrentDay::Error(message) => format!(
                concat!(
                    r#"<div class="error-container" role="alert">"#,
                    r#"<p class="error-message">{}</p>"#,
                    r#"<button class="retry-button">Try Again</button></div>"#
                ),
                escape_html(message)
            ),
        }
    }

    pub fn next_days_html(&self) -> String {
        self.next_days.iter().map(WeatherCard::to_html).collect()
    }

    pub fn toggle_html(&self) -> String {
        format!(
            r#"<button id="toggle-temp" aria-pressed="{}">{}</button>"#,
            self.toggle_pressed(),
            self.toggle_label()
        )
    }
}
