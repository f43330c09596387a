//! Board-level drivers for the Magpie main board.
//!
//! Thin drivers over [`embedded_hal`] digital pins:
//!
//! | Item | Description |
//! |------|-------------|
//! | [`StatusLeds`] | Red/green/blue status LED control |
//! | [`Pushbutton`] | Debounced user button with edge classification |

pub mod pushbutton;
pub mod status_led;

pub use pushbutton::{ButtonState, Pushbutton};
pub use status_led::{LedColor, StatusLeds};
