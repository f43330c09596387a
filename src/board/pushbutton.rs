//! Debounced user pushbutton.
//!
//! The button sits on a pulled-up input and shorts to ground when pressed,
//! so the raw read is inverting. [`Pushbutton::poll`] is meant to run from
//! the main loop at a steady cadence; the raw level only becomes the
//! debounced level after [`DEBOUNCE_POLL_COUNT`] consecutive agreeing
//! reads, so contact bounce shorter than that never reaches the caller.
//!
//! Each poll classifies the debounced edge relative to the previous poll,
//! so a press/release cycle reads as `JustPressed`, `Pressed`...,
//! `JustReleased`, `NotPressed`....

use embedded_hal::digital::InputPin;

/// Consecutive agreeing raw reads required before the debounced level
/// follows the pin.
pub const DEBOUNCE_POLL_COUNT: u8 = 5;

/// The debounced button level and its edge relative to the previous poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Down now, up at the previous poll.
    JustPressed,
    /// Down now and at the previous poll.
    Pressed,
    /// Up now, down at the previous poll.
    JustReleased,
    /// Up now and at the previous poll.
    NotPressed,
}

/// Debounced driver for one active-low pushbutton.
pub struct Pushbutton<PIN> {
    pin: PIN,
    /// Raw level of the previous poll, pressed = true.
    last_raw: bool,
    /// Polls in a row that read `last_raw`.
    streak: u8,
    debounced: bool,
}

impl<PIN: InputPin> Pushbutton<PIN> {
    /// Take ownership of the button pin, assuming it starts released.
    pub fn new(pin: PIN) -> Self {
        Pushbutton {
            pin,
            last_raw: false,
            streak: 0,
            debounced: false,
        }
    }

    /// Sample the pin once and classify the debounced edge.
    pub fn poll(&mut self) -> Result<ButtonState, PIN::Error> {
        // pull-up wiring: pressing the switch shorts the pin to ground
        let raw = self.pin.is_low()?;

        if raw == self.last_raw {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.last_raw = raw;
            self.streak = 1;
        }

        let previous = self.debounced;
        if self.streak >= DEBOUNCE_POLL_COUNT {
            self.debounced = raw;
        }

        Ok(match (previous, self.debounced) {
            (false, true) => ButtonState::JustPressed,
            (true, true) => ButtonState::Pressed,
            (true, false) => ButtonState::JustReleased,
            (false, false) => ButtonState::NotPressed,
        })
    }

    /// The current debounced level, pressed = true.
    pub fn is_pressed(&self) -> bool {
        self.debounced
    }

    /// Consume the driver and return the pin.
    pub fn release(self) -> PIN {
        self.pin
    }
}
