//! Analog front end control.
//!
//! Each audio channel has a MAX14662 analog switch selecting one of eight
//! gain taps and a share of a TPS22994 quad load switch gating its power
//! rails, all on one I2C bus, plus a GPIO line enabling the opamp/common
//! mode reference supplies.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] and two
//! [`embedded_hal::digital::OutputPin`] implementations (one enable line
//! per channel).
//!
//! # Example
//!
//! ```ignore
//! let mut afe = AfeControl::new(i2c, ch0_en_pin, ch1_en_pin);
//! afe.init()?;                                  // claim I2C control, all off
//! afe.enable(Channel::Channel0)?;
//! afe.set_gain(Channel::Channel0, Gain::Db20)?;
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::types::{Channel, Gain};

// ── Device constants ───────────────────────────────────────────────────────

const MAX14662_CH0_ADDRESS: u8 = 0x4F;
const MAX14662_CH1_ADDRESS: u8 = 0x4E;

/// The MAX14662 write format is [dummy register, switch byte].
const MAX14662_DUMMY_REGISTER: u8 = 0x00;

const TPS22994_ADDRESS: u8 = 0x71;
const TPS22994_CTL_REGISTER: u8 = 0x05;

/// Upper nibble of CTL selects I2C control (instead of GPIO) for all four
/// load switches; held set in every control write.
const TPS22994_I2C_CTL_MASK: u8 = 0xF0;

// ── Errors ─────────────────────────────────────────────────────────────────

/// Failures surfaced by the AFE driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfeError<E> {
    /// The I2C bus reported an error.
    Bus(E),
    /// A channel enable line could not be driven.
    Pin,
    /// The operation needs the channel powered, call
    /// [`enable`](AfeControl::enable) first.
    ChannelDisabled,
}

impl<E> From<E> for AfeError<E> {
    fn from(err: E) -> Self {
        AfeError::Bus(err)
    }
}

// ── Driver struct ──────────────────────────────────────────────────────────

/// Two-channel analog front end driver.
///
/// Tracks which channels are powered so gain operations on a dark channel
/// fail without touching the bus, and so each TPS22994 control write
/// carries the union of both channels' state.
pub struct AfeControl<I2C, EN0, EN1> {
    i2c: I2C,
    channel_0_enable: EN0,
    channel_1_enable: EN1,
    enabled: [bool; Channel::COUNT],
}

impl<I2C, EN0, EN1> AfeControl<I2C, EN0, EN1>
where
    I2C: I2c,
    EN0: OutputPin,
    EN1: OutputPin,
{
    /// Create the driver with both channels marked disabled.
    ///
    /// No bus traffic happens here; call [`init`](Self::init) once the bus
    /// is up.
    pub fn new(i2c: I2C, channel_0_enable: EN0, channel_1_enable: EN1) -> Self {
        AfeControl {
            i2c,
            channel_0_enable,
            channel_1_enable,
            enabled: [false; Channel::COUNT],
        }
    }

    /// Claim I2C control of the load switches and power both channels down.
    pub fn init(&mut self) -> Result<(), AfeError<I2C::Error>> {
        self.i2c.write(
            TPS22994_ADDRESS,
            &[TPS22994_CTL_REGISTER, TPS22994_I2C_CTL_MASK],
        )?;
        self.disable(Channel::Channel0)?;
        self.disable(Channel::Channel1)
    }

    /// Power `channel` up: drive its enable line high, then switch its
    /// rails on over I2C.
    ///
    /// The opamps and common mode reference come up on the GPIO line first
    /// so the rails never feed an unpowered input stage.
    pub fn enable(&mut self, channel: Channel) -> Result<(), AfeError<I2C::Error>> {
        self.enabled[channel.index()] = true;
        self.set_enable_pin(channel, true)?;
        self.write_load_switches()
    }

    /// Power `channel` down: switch its rails off over I2C, then drop its
    /// enable line. Inverse ordering of [`enable`](Self::enable).
    pub fn disable(&mut self, channel: Channel) -> Result<(), AfeError<I2C::Error>> {
        self.enabled[channel.index()] = false;
        self.write_load_switches()?;
        self.set_enable_pin(channel, false)
    }

    /// Whether `channel` is currently powered.
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.enabled[channel.index()]
    }

    /// Close the analog switch for `gain` on `channel`.
    ///
    /// Fails with [`AfeError::ChannelDisabled`] before any bus traffic if
    /// the channel is not powered.
    pub fn set_gain(&mut self, channel: Channel, gain: Gain) -> Result<(), AfeError<I2C::Error>> {
        if !self.is_enabled(channel) {
            return Err(AfeError::ChannelDisabled);
        }
        self.i2c.write(
            max14662_address(channel),
            &[MAX14662_DUMMY_REGISTER, gain_to_switch_byte(gain)],
        )?;
        Ok(())
    }

    /// Read back `channel`'s switch position and decode it.
    ///
    /// A switch byte that is not one of the eight defined positions (for
    /// example after power-up, before any [`set_gain`](Self::set_gain))
    /// decodes to `None`.
    pub fn gain(&mut self, channel: Channel) -> Result<Option<Gain>, AfeError<I2C::Error>> {
        if !self.is_enabled(channel) {
            return Err(AfeError::ChannelDisabled);
        }
        let mut switch_byte = [0u8; 1];
        self.i2c.read(max14662_address(channel), &mut switch_byte)?;
        Ok(switch_byte_to_gain(switch_byte[0]))
    }

    /// Consume the driver and return the bus and enable pins.
    pub fn release(self) -> (I2C, EN0, EN1) {
        (self.i2c, self.channel_0_enable, self.channel_1_enable)
    }

    // ── Private helpers ────────────────────────────────────────────────

    /// Write the TPS22994 CTL register from the current enable flags.
    ///
    /// Channel rails sit on switch bits 0/1, the shared preamps on bits
    /// 2/3; each channel's preamp bit follows its rail bit.
    fn write_load_switches(&mut self) -> Result<(), AfeError<I2C::Error>> {
        let ch0 = self.enabled[Channel::Channel0.index()] as u8;
        let ch1 = self.enabled[Channel::Channel1.index()] as u8;
        let ctl = TPS22994_I2C_CTL_MASK | ch0 | (ch1 << 1) | (ch0 << 2) | (ch1 << 3);
        self.i2c
            .write(TPS22994_ADDRESS, &[TPS22994_CTL_REGISTER, ctl])?;
        Ok(())
    }

    fn set_enable_pin(&mut self, channel: Channel, high: bool) -> Result<(), AfeError<I2C::Error>> {
        match channel {
            Channel::Channel0 => self
                .channel_0_enable
                .set_state(high.into())
                .map_err(|_| AfeError::Pin),
            Channel::Channel1 => self
                .channel_1_enable
                .set_state(high.into())
                .map_err(|_| AfeError::Pin),
        }
    }
}

// ── Gain/switch mapping ────────────────────────────────────────────────────

/// The one-hot MAX14662 switch byte for `gain`.
///
/// Bit positions come from the PCB routing of switches U4 and U6: the
/// lowest gain tap sits on the highest bit. Inverse of
/// [`switch_byte_to_gain`].
fn gain_to_switch_byte(gain: Gain) -> u8 {
    match gain {
        Gain::Db5 => 1 << 7,
        Gain::Db10 => 1 << 6,
        Gain::Db15 => 1 << 5,
        Gain::Db20 => 1 << 4,
        Gain::Db25 => 1 << 3,
        Gain::Db30 => 1 << 2,
        Gain::Db35 => 1 << 1,
        Gain::Db40 => 1 << 0,
    }
}

/// Decode a MAX14662 switch byte, `None` for anything that is not exactly
/// one defined position. Inverse of [`gain_to_switch_byte`].
fn switch_byte_to_gain(switch_byte: u8) -> Option<Gain> {
    match switch_byte {
        0b1000_0000 => Some(Gain::Db5),
        0b0100_0000 => Some(Gain::Db10),
        0b0010_0000 => Some(Gain::Db15),
        0b0001_0000 => Some(Gain::Db20),
        0b0000_1000 => Some(Gain::Db25),
        0b0000_0100 => Some(Gain::Db30),
        0b0000_0010 => Some(Gain::Db35),
        0b0000_0001 => Some(Gain::Db40),
        _ => None,
    }
}

fn max14662_address(channel: Channel) -> u8 {
    match channel {
        Channel::Channel0 => MAX14662_CH0_ADDRESS,
        Channel::Channel1 => MAX14662_CH1_ADDRESS,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
