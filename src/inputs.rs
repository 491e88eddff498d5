//! The two physical inputs, modeled as explicit little state machines so the
//! "emit once per transition" contract is visible and testable.

use std::fmt::{Display, Formatter};

use log::trace;

use crate::errors::Error;
use crate::hardware::DigitalSense;

/// Event records reported to the host, one line each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The water button was pressed (one event per press, not per sample).
    WaterButton,
    /// The sit/stand switch changed position (`true` = standing).
    Stand(bool),
}

impl InputEvent {
    /// Exact wire rendering, without the line terminator.
    pub fn to_line(self) -> String {
        match self {
            InputEvent::WaterButton => String::from("B,WATER"),
            InputEvent::Stand(stand) => format!("S,{}", u8::from(stand)),
        }
    }
}

impl Display for InputEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_line())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonState {
    Released,
    Pressed,
}

/// Momentary pull-up button: pressed = grounded. Emits on the press edge
/// only - holding the button down never repeats the event.
#[derive(Debug)]
pub struct Button {
    pin: Box<dyn DigitalSense>,
    state: ButtonState,
}

impl Button {
    pub fn new(pin: Box<dyn DigitalSense>) -> Self {
        Self {
            pin,
            state: ButtonState::Released,
        }
    }

    /// Samples the pin once; returns an event on the release-to-press edge.
    pub fn sample(&mut self) -> Result<Option<InputEvent>, Error> {
        let grounded = self.pin.is_grounded()?;
        let event = match (self.state, grounded) {
            (ButtonState::Released, true) => {
                self.state = ButtonState::Pressed;
                trace!("button pressed");
                Some(InputEvent::WaterButton)
            }
            (ButtonState::Pressed, false) => {
                self.state = ButtonState::Released;
                None
            }
            _ => None,
        };
        Ok(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchState {
    Sit,
    Stand,
}

impl SwitchState {
    fn from_level(grounded: bool) -> Self {
        match grounded {
            true => SwitchState::Stand,
            false => SwitchState::Sit,
        }
    }
}

/// Two-position sit/stand switch: stand = grounded. Emits on every change;
/// the state is unknown until the first sample.
#[derive(Debug)]
pub struct StandSwitch {
    pin: Box<dyn DigitalSense>,
    state: Option<SwitchState>,
}

impl StandSwitch {
    pub fn new(pin: Box<dyn DigitalSense>) -> Self {
        Self { pin, state: None }
    }

    /// Startup read: always reports, establishing the host's baseline.
    pub fn initial_report(&mut self) -> Result<InputEvent, Error> {
        let grounded = self.pin.is_grounded()?;
        self.state = Some(SwitchState::from_level(grounded));
        Ok(InputEvent::Stand(grounded))
    }

    /// Samples the pin once; returns an event only when the position changed
    /// since the last known state.
    pub fn sample(&mut self) -> Result<Option<InputEvent>, Error> {
        let grounded = self.pin.is_grounded()?;
        let next = SwitchState::from_level(grounded);
        if self.state == Some(next) {
            return Ok(None);
        }
        self.state = Some(next);
        trace!("switch changed: {:?}", next);
        Ok(Some(InputEvent::Stand(grounded)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockSense;

    #[test]
    fn test_event_rendering() {
        assert_eq!(InputEvent::WaterButton.to_line(), "B,WATER");
        assert_eq!(InputEvent::Stand(true).to_line(), "S,1");
        assert_eq!(InputEvent::Stand(false).to_line(), "S,0");
        assert_eq!(format!("{}", InputEvent::WaterButton), "B,WATER");
    }

    #[test]
    fn test_button_emits_once_per_press() {
        let pin = MockSense::grounded(false);
        let mut button = Button::new(Box::new(pin.clone()));

        // Idle: no event, however often sampled.
        assert_eq!(button.sample().unwrap(), None);
        assert_eq!(button.sample().unwrap(), None);

        // Press: one event on the edge, none while held.
        pin.set_grounded(true);
        assert_eq!(button.sample().unwrap(), Some(InputEvent::WaterButton));
        assert_eq!(button.sample().unwrap(), None);
        assert_eq!(button.sample().unwrap(), None);

        // Release: no event.
        pin.set_grounded(false);
        assert_eq!(button.sample().unwrap(), None);

        // A second full press cycle emits again.
        pin.set_grounded(true);
        assert_eq!(button.sample().unwrap(), Some(InputEvent::WaterButton));
    }

    #[test]
    fn test_switch_initial_report_unconditional() {
        let pin = MockSense::grounded(true);
        let mut switch = StandSwitch::new(Box::new(pin.clone()));

        assert_eq!(switch.initial_report().unwrap(), InputEvent::Stand(true));
        // An unchanged level after the baseline emits nothing.
        assert_eq!(switch.sample().unwrap(), None);

        let pin = MockSense::grounded(false);
        let mut switch = StandSwitch::new(Box::new(pin));
        assert_eq!(switch.initial_report().unwrap(), InputEvent::Stand(false));
    }

    #[test]
    fn test_switch_emits_once_per_transition() {
        let pin = MockSense::grounded(false);
        let mut switch = StandSwitch::new(Box::new(pin.clone()));
        switch.initial_report().unwrap();

        pin.set_grounded(true);
        assert_eq!(switch.sample().unwrap(), Some(InputEvent::Stand(true)));
        assert_eq!(switch.sample().unwrap(), None);
        assert_eq!(switch.sample().unwrap(), None);

        pin.set_grounded(false);
        assert_eq!(switch.sample().unwrap(), Some(InputEvent::Stand(false)));
        assert_eq!(switch.sample().unwrap(), None);
    }
}
