//! Status LED control.
//!
//! The board carries one red, one green, and one blue indicator LED, each on
//! its own GPIO. Firmware uses them as coarse state signals: blue while
//! initializing, green while recording, red blinking in an error handler.
//!
//! The driver tracks the last commanded level per LED so [`toggle`]
//! (StatusLeds::toggle) works without reading the pin back.

use embedded_hal::digital::OutputPin;

/// The three status LED positions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Red,
    Green,
    Blue,
}

/// Error driving a status LED pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPinError;

/// Driver for the three status LEDs.
pub struct StatusLeds<R, G, B> {
    red: R,
    green: G,
    blue: B,
    /// Last commanded level per LED, indexed red/green/blue.
    levels: [bool; 3],
}

impl<R, G, B> StatusLeds<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Take ownership of the three LED pins, assuming all are off.
    ///
    /// Call [`all_off`](Self::all_off) right after construction if the pins
    /// may carry leftover state from a bootloader.
    pub fn new(red: R, green: G, blue: B) -> Self {
        StatusLeds {
            red,
            green,
            blue,
            levels: [false; 3],
        }
    }

    /// Drive `color` on or off.
    pub fn set(&mut self, color: LedColor, on: bool) -> Result<(), LedPinError> {
        match color {
            LedColor::Red => self.red.set_state(on.into()).map_err(|_| LedPinError),
            LedColor::Green => self.green.set_state(on.into()).map_err(|_| LedPinError),
            LedColor::Blue => self.blue.set_state(on.into()).map_err(|_| LedPinError),
        }?;
        self.levels[led_index(color)] = on;
        Ok(())
    }

    /// Invert `color` relative to its last commanded level.
    pub fn toggle(&mut self, color: LedColor) -> Result<(), LedPinError> {
        self.set(color, !self.levels[led_index(color)])
    }

    /// Whether `color` was last commanded on.
    pub fn is_on(&self, color: LedColor) -> bool {
        self.levels[led_index(color)]
    }

    /// Turn all three LEDs off.
    pub fn all_off(&mut self) -> Result<(), LedPinError> {
        self.set(LedColor::Red, false)?;
        self.set(LedColor::Green, false)?;
        self.set(LedColor::Blue, false)
    }

    /// Consume the driver and return the pins.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn led_index(color: LedColor) -> usize {
    match color {
        LedColor::Red => 0,
        LedColor::Green => 1,
        LedColor::Blue => 2,
    }
}
