//! Multi-rate decimation filter.
//!
//! Downsamples the fixed 384 kHz ADC stream to one of the supported output
//! rates by running a cascade of anti-aliasing FIR stages, each of which
//! low-passes and then keeps every second sample. The cascade for each rate
//! lives in [`coefficients`](super::coefficients); the base rate itself is a
//! pass-through with no filter math.
//!
//! Every channel carries its own delay lines, so interleaving calls for
//! different channels never cross-contaminates their histories, and history
//! persists across calls so a stream split over many DMA chunks filters
//! identically to one long buffer.
//!
//! ## Usage
//!
//! ```ignore
//! use magpie_audio::dsp::DecimationFilter;
//! use magpie_audio::types::{Channel, SampleRate};
//!
//! let mut filter = DecimationFilter::new(SampleRate::Khz96);
//!
//! // once per DMA chunk:
//! let written = filter.downsample(&chunk, &mut out, Channel::Channel0);
//! assert_eq!(written, chunk.len() / 4);
//! ```

use crate::constants::AUDIO_DMA_BUFF_LEN_IN_SAMPS;
use crate::types::{Channel, SampleRate};

use super::coefficients::{
    FIR_192K_0, FIR_24K_0, FIR_24K_1, FIR_24K_2, FIR_24K_3, FIR_48K_0, FIR_48K_1, FIR_48K_2,
    FIR_96K_0, FIR_96K_1, MAX_FIR_TAPS,
};
use super::intrinsics::{multiply_accumulate_32x32_64, saturate32};

/// Most stages any cascade uses (the 24 kHz chain).
const MAX_STAGES: usize = 4;

/// One anti-aliasing stage: a Q31 coefficient table and how many input
/// samples collapse into one output sample.
#[derive(Clone, Copy)]
struct Stage {
    coeffs: &'static [i32],
    factor: usize,
}

/// The fixed cascade for a given output rate. An empty plan means bypass.
fn stage_plan(rate: SampleRate) -> &'static [Stage] {
    match rate {
        SampleRate::Khz384 => &[],
        SampleRate::Khz192 => &[Stage {
            coeffs: &FIR_192K_0,
            factor: 2,
        }],
        SampleRate::Khz96 => &[
            Stage {
                coeffs: &FIR_96K_0,
                factor: 2,
            },
            Stage {
                coeffs: &FIR_96K_1,
                factor: 2,
            },
        ],
        SampleRate::Khz48 => &[
            Stage {
                coeffs: &FIR_48K_0,
                factor: 2,
            },
            Stage {
                coeffs: &FIR_48K_1,
                factor: 2,
            },
            Stage {
                coeffs: &FIR_48K_2,
                factor: 2,
            },
        ],
        SampleRate::Khz24 => &[
            Stage {
                coeffs: &FIR_24K_0,
                factor: 2,
            },
            Stage {
                coeffs: &FIR_24K_1,
                factor: 2,
            },
            Stage {
                coeffs: &FIR_24K_2,
                factor: 2,
            },
            Stage {
                coeffs: &FIR_24K_3,
                factor: 2,
            },
        ],
    }
}

/// Delay lines for one channel, one per cascade stage.
///
/// Each line holds the last `taps - 1` inputs its stage saw; lines are
/// sized for the longest table and shorter stages use a prefix.
struct ChannelState {
    histories: [[i32; MAX_FIR_TAPS - 1]; MAX_STAGES],
}

const ZEROED_CHANNEL: ChannelState = ChannelState {
    histories: [[0; MAX_FIR_TAPS - 1]; MAX_STAGES],
};

/// Per-channel multi-stage decimator with caller-owned buffers.
///
/// Holds the per-channel delay lines plus the ping-pong scratch the cascade
/// bounces intermediate results through, so the value is large (roughly
/// 25 KiB); firmware typically places it in a `static`. Scratch is shared
/// across channels, which is safe because calls are serialized; delay lines
/// are strictly per channel.
pub struct DecimationFilter {
    sample_rate: SampleRate,
    channels: [ChannelState; Channel::COUNT],
    /// Holds first-stage output, and third-stage output in 4-stage chains.
    scratch_a: [i32; AUDIO_DMA_BUFF_LEN_IN_SAMPS / 2],
    /// Holds second-stage output.
    scratch_b: [i32; AUDIO_DMA_BUFF_LEN_IN_SAMPS / 4],
}

impl DecimationFilter {
    /// Create a filter configured for `rate`, with zeroed delay lines.
    ///
    /// Taking the initial rate here means an unconfigured filter cannot
    /// exist, so `downsample` never runs without a valid stage selection.
    pub const fn new(rate: SampleRate) -> Self {
        DecimationFilter {
            sample_rate: rate,
            channels: [ZEROED_CHANNEL; Channel::COUNT],
            scratch_a: [0; AUDIO_DMA_BUFF_LEN_IN_SAMPS / 2],
            scratch_b: [0; AUDIO_DMA_BUFF_LEN_IN_SAMPS / 4],
        }
    }

    /// The configured output rate.
    pub const fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// How many input samples collapse into one output sample.
    pub const fn decimation_factor(&self) -> usize {
        self.sample_rate.decimation_factor()
    }

    /// Select a new output rate and reset every channel's delay lines.
    ///
    /// The reset happens even when `rate` equals the current rate; carried
    /// history never outlives a reconfigure.
    pub fn set_sample_rate(&mut self, rate: SampleRate) {
        self.sample_rate = rate;
        for channel in &mut self.channels {
            for history in &mut channel.histories {
                history.fill(0);
            }
        }
    }

    /// Filter and shrink one buffer of base-rate samples for `channel`.
    ///
    /// Writes exactly `src.len() / factor` samples into the front of `dest`
    /// and returns that count. At the base rate this is an identity copy.
    ///
    /// `src.len()` must be a multiple of the decimation factor and at most
    /// [`AUDIO_DMA_BUFF_LEN_IN_SAMPS`], and `dest` must have room for the
    /// output; all three are debug-asserted.
    pub fn downsample(&mut self, src: &[i32], dest: &mut [i32], channel: Channel) -> usize {
        debug_assert_eq!(src.len() % self.decimation_factor(), 0);
        debug_assert!(dest.len() >= src.len() / self.decimation_factor());
        debug_assert!(src.len() <= AUDIO_DMA_BUFF_LEN_IN_SAMPS);

        let DecimationFilter {
            sample_rate,
            channels,
            scratch_a,
            scratch_b,
        } = self;
        let histories = &mut channels[channel.index()].histories;

        match stage_plan(*sample_rate) {
            [] => {
                dest[..src.len()].copy_from_slice(src);
                src.len()
            }
            [s0] => fir_decimate(s0, &mut histories[0], src, dest),
            [s0, s1] => {
                let n = fir_decimate(s0, &mut histories[0], src, scratch_a);
                fir_decimate(s1, &mut histories[1], &scratch_a[..n], dest)
            }
            [s0, s1, s2] => {
                let n = fir_decimate(s0, &mut histories[0], src, scratch_a);
                let n = fir_decimate(s1, &mut histories[1], &scratch_a[..n], scratch_b);
                fir_decimate(s2, &mut histories[2], &scratch_b[..n], dest)
            }
            [s0, s1, s2, s3] => {
                let n = fir_decimate(s0, &mut histories[0], src, scratch_a);
                let n = fir_decimate(s1, &mut histories[1], &scratch_a[..n], scratch_b);
                let n = fir_decimate(s2, &mut histories[2], &scratch_b[..n], scratch_a);
                fir_decimate(s3, &mut histories[3], &scratch_a[..n], dest)
            }
            _ => unreachable!("cascades are at most four stages"),
        }
    }
}

/// Run one FIR decimation stage over a block.
///
/// Output `j` is the dot product of `coeffs` with the window starting at
/// input offset `j * factor` in the virtual stream `history ++ src`, so the
/// retained sample of each group is the first. Products accumulate in 64
/// bits and narrow with a `>> 31` plus saturation, matching Q31 fixed-point
/// convolution. The trailing `taps - 1` inputs are carried into `history`
/// for the next block.
fn fir_decimate(
    stage: &Stage,
    history: &mut [i32; MAX_FIR_TAPS - 1],
    src: &[i32],
    dest: &mut [i32],
) -> usize {
    let coeffs = stage.coeffs;
    let taps = coeffs.len();
    let hist_len = taps - 1;
    let history = &mut history[..hist_len];
    let n_out = src.len() / stage.factor;
    debug_assert_eq!(src.len() % stage.factor, 0);
    debug_assert!(dest.len() >= n_out);

    for (j, out) in dest[..n_out].iter_mut().enumerate() {
        let base = j * stage.factor;
        let mut acc = 0i64;
        if base >= hist_len {
            // window lies entirely inside src
            let window = &src[base - hist_len..=base];
            for (&x, &c) in window.iter().zip(coeffs) {
                acc = multiply_accumulate_32x32_64(acc, x, c);
            }
        } else {
            // window straddles the carried history
            for (k, &c) in coeffs.iter().enumerate() {
                let i = base + k;
                let x = if i < hist_len {
                    history[i]
                } else {
                    src[i - hist_len]
                };
                acc = multiply_accumulate_32x32_64(acc, x, c);
            }
        }
        *out = saturate32(acc >> 31);
    }

    if src.len() >= hist_len {
        history.copy_from_slice(&src[src.len() - hist_len..]);
    } else {
        // block shorter than the delay line: shift and append
        history.copy_within(src.len().., 0);
        history[hist_len - src.len()..].copy_from_slice(src);
    }

    n_out
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: i32 = 1 << 30; // 0.5 in Q31
    const QUARTER: i32 = 1 << 29; // 0.25 in Q31

    fn zeroed_history() -> [i32; MAX_FIR_TAPS - 1] {
        [0; MAX_FIR_TAPS - 1]
    }

    #[test]
    fn two_tap_average_halves_the_rate() {
        let stage = Stage {
            coeffs: &[HALF, HALF],
            factor: 2,
        };
        let mut history = zeroed_history();
        let src = [2, 4, 6, 8];
        let mut dest = [0i32; 2];

        let n = fir_decimate(&stage, &mut history, &src, &mut dest);

        assert_eq!(n, 2);
        // out[0] averages the zero history with src[0], out[1] averages
        // src[1] and src[2]
        assert_eq!(dest, [1, 5]);
        assert_eq!(history[0], 8);
    }

    #[test]
    fn history_carries_across_blocks() {
        let stage = Stage {
            coeffs: &[HALF, HALF],
            factor: 2,
        };
        let mut history = zeroed_history();
        let mut dest = [0i32; 2];

        fir_decimate(&stage, &mut history, &[2, 4, 6, 8], &mut dest);
        let n = fir_decimate(&stage, &mut history, &[10, 12], &mut dest);

        assert_eq!(n, 1);
        // first output of the second block averages 8 (carried) and 10
        assert_eq!(dest[0], 9);
    }

    #[test]
    fn impulse_walks_the_taps_oldest_first() {
        // coefficient k multiplies the k-th oldest sample in the window,
        // so an impulse surfaces the taps back to front
        let taps: &[i32] = &[1 << 15, 2 << 15, 3 << 15];
        let stage = Stage {
            coeffs: taps,
            factor: 2,
        };
        let mut history = zeroed_history();
        let src = [1 << 20, 0, 0, 0, 0, 0];
        let mut dest = [0i32; 3];

        fir_decimate(&stage, &mut history, &src, &mut dest);

        // (1<<20 * k<<15) >> 31 == 16 * k
        assert_eq!(dest, [48, 16, 0]);
    }

    #[test]
    fn accumulator_saturates_instead_of_wrapping() {
        let stage = Stage {
            coeffs: &[i32::MAX, i32::MAX],
            factor: 2,
        };

        let mut history = [i32::MAX; MAX_FIR_TAPS - 1];
        let mut dest = [0i32; 1];
        fir_decimate(&stage, &mut history, &[i32::MAX, i32::MAX], &mut dest);
        assert_eq!(dest[0], i32::MAX);

        let mut history = [i32::MIN; MAX_FIR_TAPS - 1];
        let mut dest = [0i32; 1];
        fir_decimate(&stage, &mut history, &[i32::MIN, i32::MIN], &mut dest);
        assert_eq!(dest[0], i32::MIN);
    }

    #[test]
    fn short_blocks_match_one_long_block() {
        // blocks shorter than the delay line exercise the shift-and-append
        // history path
        let taps: &[i32] = &[QUARTER, QUARTER, QUARTER, QUARTER, QUARTER];
        let src: [i32; 8] = [4, 8, 12, 16, 20, 24, 28, 32];

        let mut one_history = zeroed_history();
        let mut one_dest = [0i32; 4];
        let stage = Stage {
            coeffs: taps,
            factor: 2,
        };
        fir_decimate(&stage, &mut one_history, &src, &mut one_dest);

        let mut split_history = zeroed_history();
        let mut split_dest = [0i32; 4];
        for (block, out) in src.chunks_exact(2).zip(split_dest.chunks_exact_mut(1)) {
            fir_decimate(&stage, &mut split_history, block, out);
        }

        assert_eq!(one_dest, split_dest);
        assert_eq!(one_history[..4], split_history[..4]);
    }

    #[test]
    fn stage_plans_multiply_out_to_the_rate_factor() {
        for rate in [
            SampleRate::Khz384,
            SampleRate::Khz192,
            SampleRate::Khz96,
            SampleRate::Khz48,
            SampleRate::Khz24,
        ] {
            let plan = stage_plan(rate);
            assert!(plan.len() <= MAX_STAGES);
            let product: usize = plan.iter().map(|s| s.factor).product();
            assert_eq!(product, rate.decimation_factor(), "{rate:?}");
            for stage in plan {
                assert!(stage.coeffs.len() <= MAX_FIR_TAPS);
                assert!(stage.coeffs.len() > stage.factor);
            }
        }
    }
}
