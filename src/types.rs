//! Core enumerated types shared across the audio pipeline.
//!
//! All of these are closed sets: the board has exactly two input channels,
//! the decimation cascades exist for exactly five output rates, and the
//! analog front end exposes eight gain taps. Exhaustive matches keep the
//! dispatch total.

use crate::constants::BASE_SAMPLE_RATE_HZ;

/// An independent, non-interleaved audio input channel.
///
/// Channels share buffer layout but never share filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Channel0,
    Channel1,
}

impl Channel {
    /// Number of audio channels on the board.
    pub const COUNT: usize = 2;

    /// Both channels, in index order.
    pub const ALL: [Channel; Channel::COUNT] = [Channel::Channel0, Channel::Channel1];

    /// Index of this channel into per-channel state arrays.
    pub const fn index(self) -> usize {
        match self {
            Channel::Channel0 => 0,
            Channel::Channel1 => 1,
        }
    }
}

/// Output sample rates supported by the decimation pipeline.
///
/// Every rate divides the 384 kHz base rate exactly, so each maps to an
/// integer decimation factor. Arbitrary integer rates are rejected at the
/// [`try_from_hz`](SampleRate::try_from_hz) boundary; once a `SampleRate`
/// value exists it is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRate {
    Khz24,
    Khz48,
    Khz96,
    Khz192,
    /// The base rate itself: no decimation, identity pass-through.
    Khz384,
}

/// Error returned by [`SampleRate::try_from_hz`] for a rate outside the
/// supported set (equivalently, one that does not evenly divide the 384 kHz
/// base rate). Carries the rejected rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSampleRate(pub u32);

impl SampleRate {
    /// The rate in Hz.
    pub const fn hz(self) -> u32 {
        match self {
            SampleRate::Khz24 => 24_000,
            SampleRate::Khz48 => 48_000,
            SampleRate::Khz96 => 96_000,
            SampleRate::Khz192 => 192_000,
            SampleRate::Khz384 => 384_000,
        }
    }

    /// How many base-rate samples collapse into one output sample.
    ///
    /// Exact by construction: every supported rate divides the base rate.
    pub const fn decimation_factor(self) -> usize {
        (BASE_SAMPLE_RATE_HZ / self.hz()) as usize
    }

    /// Convert an integer rate in Hz into a supported [`SampleRate`].
    ///
    /// Rejects anything outside the supported set, including rates that do
    /// not divide the base rate (44.1 kHz and friends).
    pub const fn try_from_hz(hz: u32) -> Result<SampleRate, InvalidSampleRate> {
        match hz {
            24_000 => Ok(SampleRate::Khz24),
            48_000 => Ok(SampleRate::Khz48),
            96_000 => Ok(SampleRate::Khz96),
            192_000 => Ok(SampleRate::Khz192),
            384_000 => Ok(SampleRate::Khz384),
            _ => Err(InvalidSampleRate(hz)),
        }
    }
}

/// Bit depths the downstream consumers store.
///
/// Selects between the [`convert`](crate::convert) paths: 24-bit keeps the
/// full ADC word, 16-bit truncates to the top half of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Bits16,
    Bits24,
}

impl BitDepth {
    /// Bits per stored sample.
    pub const fn bits(self) -> u32 {
        match self {
            BitDepth::Bits16 => 16,
            BitDepth::Bits24 => 24,
        }
    }

    /// Bytes per stored sample.
    pub const fn bytes_per_sample(self) -> usize {
        (self.bits() / 8) as usize
    }
}

/// Analog front end gain settings.
///
/// Each step maps to one tap of the MAX14662 gain switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    Db5,
    Db10,
    Db15,
    Db20,
    Db25,
    Db30,
    Db35,
    Db40,
}

impl Gain {
    /// The gain in decibels.
    pub const fn db(self) -> u8 {
        match self {
            Gain::Db5 => 5,
            Gain::Db10 => 10,
            Gain::Db15 => 15,
            Gain::Db20 => 20,
            Gain::Db25 => 25,
            Gain::Db30 => 30,
            Gain::Db35 => 35,
            Gain::Db40 => 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_indices_are_distinct() {
        assert_eq!(Channel::Channel0.index(), 0);
        assert_eq!(Channel::Channel1.index(), 1);
        assert_eq!(Channel::ALL.len(), Channel::COUNT);
    }

    #[test]
    fn decimation_factors_divide_base_rate_exactly() {
        let expected = [
            (SampleRate::Khz384, 1),
            (SampleRate::Khz192, 2),
            (SampleRate::Khz96, 4),
            (SampleRate::Khz48, 8),
            (SampleRate::Khz24, 16),
        ];
        for (rate, factor) in expected {
            assert_eq!(rate.decimation_factor(), factor, "{rate:?}");
            assert_eq!(rate.hz() * factor as u32, BASE_SAMPLE_RATE_HZ, "{rate:?}");
        }
    }

    #[test]
    fn try_from_hz_accepts_supported_rates() {
        assert_eq!(SampleRate::try_from_hz(24_000), Ok(SampleRate::Khz24));
        assert_eq!(SampleRate::try_from_hz(48_000), Ok(SampleRate::Khz48));
        assert_eq!(SampleRate::try_from_hz(96_000), Ok(SampleRate::Khz96));
        assert_eq!(SampleRate::try_from_hz(192_000), Ok(SampleRate::Khz192));
        assert_eq!(SampleRate::try_from_hz(384_000), Ok(SampleRate::Khz384));
    }

    #[test]
    fn try_from_hz_rejects_rates_that_do_not_divide_the_base_rate() {
        for hz in [0, 1, 22_050, 44_100, 128_000, 383_999, 768_000] {
            assert_eq!(SampleRate::try_from_hz(hz), Err(InvalidSampleRate(hz)));
        }
    }

    #[test]
    fn bit_depths_are_whole_bytes() {
        assert_eq!(BitDepth::Bits16.bytes_per_sample(), 2);
        assert_eq!(BitDepth::Bits24.bytes_per_sample(), 3);
    }

    #[test]
    fn gain_steps_cover_5_to_40_db() {
        let all = [
            Gain::Db5,
            Gain::Db10,
            Gain::Db15,
            Gain::Db20,
            Gain::Db25,
            Gain::Db30,
            Gain::Db35,
            Gain::Db40,
        ];
        for (i, gain) in all.iter().enumerate() {
            assert_eq!(gain.db() as usize, (i + 1) * 5);
        }
    }
}
