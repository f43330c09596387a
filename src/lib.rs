//! # magpie-audio
//!
//! `no_std`, zero-allocation firmware modules for the Magpie audio
//! acquisition device. The ADC front end delivers 24-bit samples at a fixed
//! 384 kHz over DMA; this crate provides everything between that stream and
//! the storage/transport collaborators: the multi-rate decimation filter,
//! sample format conversion, DMA chunk bookkeeping, and the board's analog
//! front end and panel drivers. All DSP runs identically on the target and
//! on the host, so the full pipeline is covered by software unit tests.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Model | [`constants`] / [`types`] | Buffer geometry, channels, rates, gains |
//! | DSP | [`dsp`] | Multi-rate decimation filter, Q31 arithmetic |
//! | Format | [`convert`] | i24 wire format ↔ Q31 ↔ Q15, stereo interleave |
//! | Acquisition | [`dma`] | Circular DMA chunk accounting, overrun detect |
//! | Analog | [`afe`] | MAX14662/TPS22994 gain and power control (feature-gated) |
//! | Board | [`board`] | Status LEDs and debounced pushbutton (feature-gated) |
//! | Bring-up | [`mock_audio`] | DDS sine source standing in for the ADC |
//!
//! ## Quick start
//!
//! ```ignore
//! use magpie_audio::convert;
//! use magpie_audio::dsp::DecimationFilter;
//! use magpie_audio::types::{Channel, SampleRate};
//!
//! let mut filter = DecimationFilter::new(SampleRate::Khz96);
//!
//! // In your DMA-complete handler, per channel:
//! convert::i24_to_q31(&dma_bytes, &mut q31_chunk);
//! let written = filter.downsample(&q31_chunk, &mut out, Channel::Channel0);
//! // hand out[..written] to the SD card / USB collaborator
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `dsp` | yes | Decimation filter, Q31 intrinsics, mock audio source |
//! | `afe` | yes | Analog front end driver (requires `embedded-hal`) |
//! | `board` | yes | LED and pushbutton drivers (requires `embedded-hal`) |
//!
//! ## Audio parameters
//!
//! - **Base rate:** 384 kHz ([`constants::BASE_SAMPLE_RATE_HZ`])
//! - **DMA chunk:** 8192 samples ([`constants::AUDIO_DMA_BUFF_LEN_IN_SAMPS`])
//! - **Sample format:** 24-bit in a Q31 `i32` container, low byte zero
//! - **Output rates:** 24 / 48 / 96 / 192 / 384 kHz ([`types::SampleRate`])

#![no_std]

pub mod constants;
pub mod convert;
pub mod dma;
pub mod types;

#[cfg(feature = "afe")]
pub mod afe;

#[cfg(feature = "board")]
pub mod board;

#[cfg(feature = "dsp")]
pub mod dsp;

#[cfg(feature = "dsp")]
pub mod mock_audio;
