//! Mock audio source for bring-up without an ADC.
//!
//! A sine wave generated with basic Direct Digital Synthesis: a 24-bit
//! phase accumulator ramps at the configured frequency, and the upper bits
//! of the ramp index a sine lookup table. The table holds 16-bit values at
//! half of full scale (so a misrouted test signal never blasts speakers at
//! 0 dBFS) which are widened into the Q31 sample container on the way out.
//!
//! Frequency and sample rate are fixed at construction; firmware that wants
//! a different tone builds a new generator.

use libm::sinf;

use crate::types::SampleRate;

const PHASE_ACCUM_NUM_BITS: u32 = 24;
const PHASE_ACCUM_MODULUS: u32 = 1 << PHASE_ACCUM_NUM_BITS;

const SINE_LUT_NUM_INDEX_BITS: u32 = 10;
const SINE_LUT_SIZE: usize = 1 << SINE_LUT_NUM_INDEX_BITS;

/// Half of i16 full scale.
const SINE_LUT_MAX_VAL: f32 = (i16::MAX / 2) as f32;

/// DDS sine generator producing Q31 samples at a fixed rate and frequency.
///
/// Carries its own 2 KiB lookup table, built once at construction.
pub struct MockAudioSine {
    sine_lut: [i16; SINE_LUT_SIZE],
    phase_accumulator: u32,
    accum_increment: u32,
}

impl MockAudioSine {
    /// Build the lookup table and compute the phase step for one tick of
    /// `freq_hz` at `sample_rate`.
    pub fn new(sample_rate: SampleRate, freq_hz: u32) -> Self {
        let mut sine_lut = [0i16; SINE_LUT_SIZE];
        for (i, entry) in sine_lut.iter_mut().enumerate() {
            let angle = 2.0 * core::f32::consts::PI * (i as f32 / SINE_LUT_SIZE as f32);
            *entry = (sinf(angle) * SINE_LUT_MAX_VAL) as i16;
        }

        // dividing first keeps the product inside u32 for any audio frequency
        let accum_increment = (PHASE_ACCUM_MODULUS / sample_rate.hz()) * freq_hz;

        MockAudioSine {
            sine_lut,
            phase_accumulator: 0,
            accum_increment,
        }
    }

    /// Advance one sample period and return the sine value there.
    pub fn tick(&mut self) -> i32 {
        self.phase_accumulator = self.phase_accumulator.wrapping_add(self.accum_increment)
            & (PHASE_ACCUM_MODULUS - 1);

        let lut_index =
            (self.phase_accumulator >> (PHASE_ACCUM_NUM_BITS - SINE_LUT_NUM_INDEX_BITS)) as usize;
        (self.sine_lut[lut_index] as i32) << 16
    }

    /// Fill `buffer` with consecutive samples, one tick per element.
    pub fn fill(&mut self, buffer: &mut [i32]) {
        for sample in buffer {
            *sample = self.tick();
        }
    }
}
