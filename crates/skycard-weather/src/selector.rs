//! City dropdown state machine.

use crate::types::{CityRecord, Coordinates};

const PLACEHOLDER: &str = "Select a city";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// User interaction with the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorInput {
    /// Click on the closed/open control itself
    ActivateControl,
    /// Pointer click on option `i`
    PickOption(usize),
    /// Key pressed while option `i` has focus
    Key(usize, Key),
    Blur,
    ClickOutside,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub id: String,
    pub label: String,
    pub coordinates: Coordinates,
}

/// Emitted when the user picks a city
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityChoice {
    pub label: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone)]
pub struct CitySelector {
    state: SelectorState,
    label: String,
    options: Vec<SelectorOption>,
}

impl Default for CitySelector {
    fn default() -> Self {
        Self {
            state: SelectorState::Closed,
            label: PLACEHOLDER.to_string(),
            options: Vec::new(),
        }
    }
}

impl CitySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(&mut self, cities: &[CityRecord]) {
        self.options = cities
            .iter()
            .enumerate()
            .map(|(index, city)| SelectorOption {
                id: format!("city-option-{}", index),
                label: city.label(),
                coordinates: city.coordinates(),
            })
            .collect();
    }

    pub fn options(&self) -> &[SelectorOption] {
        &self.options
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn aria_expanded(&self) -> bool {
        self.state == SelectorState::Open
    }

    /// Text of the control
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn handle(&mut self, input: SelectorInput) -> Option<CityChoice> {
        match input {
            SelectorInput::ActivateControl => {
                self.state = match self.state {
                    SelectorState::Closed => SelectorState::Open,
                    SelectorState::Open => SelectorState::Closed,
                };
                None
            }
            SelectorInput::PickOption(index)
            | SelectorInput::Key(index, Key::Enter | Key::Space) => self.pick(index),
            SelectorInput::Key(_, Key::Escape) | SelectorInput::Blur | SelectorInput::ClickOutside => {
                self.state = SelectorState::Closed;
                None
            }
            SelectorInput::Key(_, Key::Other) => None,
        }
    }

    fn pick(&mut self, index: usize) -> Option<CityChoice> {
        if self.state != SelectorState::Open {
            return None;
        }
        let option = self.options.get(index)?;
        let choice = CityChoice {
            label: option.label.clone(),
            coordinates: option.coordinates.clone(),
        };

        self.label = choice.label.clone();
        self.state = SelectorState::Closed;
        tracing::debug!("Selected {}", choice.label);
        Some(choice)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn selector() -> CitySelector {
        let mut selector = CitySelector::new();
        selector.populate(&[
            CityRecord {
                city: "Paris".into(),
                country: "France".into(),
                latitude: "48.8566".into(),
                longitude: "2.3522".into(),
            },
            CityRecord {
                city: "Lima".into(),
                country: "Peru".into(),
                latitude: "-12.0464".into(),
                longitude: "-77.0428".into(),
            },
        ]);
        selector
    }

    #[test]
    fn test_populate_assigns_ids_and_labels() {
        let s = selector();
        assert_eq!(s.options()[1].id, "city-option-1");
        assert_eq!(s.options()[1].label, "Lima, Peru");
        assert_eq!(s.label(), "Select a city");
    }

    #[test]
    fn test_activate_toggles_open() {
        let mut s = selector();
        s.handle(SelectorInput::ActivateControl);
        assert_eq!(s.state(), SelectorState::Open);
        assert!(s.aria_expanded());
        s.handle(SelectorInput::ActivateControl);
        assert_eq!(s.state(), SelectorState::Closed);
    }

    #[test]
    fn test_pick_emits_choice_and_closes() {
        let mut s = selector();
        s.handle(SelectorInput::ActivateControl);
        let choice = s.handle(SelectorInput::PickOption(0)).unwrap();

        assert_eq!(choice.label, "Paris, France");
        assert_eq!(choice.coordinates, Coordinates::new("48.8566", "2.3522"));
        assert_eq!(s.label(), "Paris, France");
        assert_eq!(s.state(), SelectorState::Closed);
    }

    #[test]
    fn test_keyboard_matches_pointer() {
        for key in [Key::Enter, Key::Space] {
            let mut s = selector();
            s.handle(SelectorInput::ActivateControl);
            let choice = s.handle(SelectorInput::Key(1, key)).unwrap();
            assert_eq!(choice.label, "Lima, Peru");
            assert_eq!(s.state(), SelectorState::Closed);
        }
    }

    #[test]
    fn test_close_inputs() {
        for input in [
            SelectorInput::Key(0, Key::Escape),
            SelectorInput::Blur,
            SelectorInput::ClickOutside,
        ] {
            let mut s = selector();
            s.handle(SelectorInput::ActivateControl);
            assert!(s.handle(input).is_none());
            assert_eq!(s.state(), SelectorState::Closed);
            assert_eq!(s.label(), "Select a city");
        }
    }

    #[test]
    fn test_pick_ignored_when_closed_or_out_of_range() {
        let mut s = selector();
        assert!(s.handle(SelectorInput::PickOption(0)).is_none());

        s.handle(SelectorInput::ActivateControl);
        assert!(s.handle(SelectorInput::PickOption(9)).is_none());
        assert_eq!(s.state(), SelectorState::Open);
        assert!(s.handle(SelectorInput::Key(0, Key::Other)).is_none());
        assert_eq!(s.state(), SelectorState::Open);
    }
}
