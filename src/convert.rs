//! Sample format conversions between the ADC wire format, the DSP
//! container, and file/storage formats.
//!
//! ## Sample Formats
//!
//! - **i24**: raw 24-bit sample, 3 bytes. The ADC DMA stream delivers these
//!   most significant byte first; WAV files store them least significant
//!   byte first.
//! - **Q31**: a 24-bit sample widened into the top three bytes of an `i32`
//!   with the low byte zero. All DSP runs on this container.
//! - **Q15**: the top 16 bits of the Q31 container, for 16-bit captures.
//!
//! The interleave variants merge both channels into one frame-ordered
//! buffer for stereo storage.

/// Expand big-endian 24-bit wire samples into Q31 containers.
///
/// Each 3-byte group `[ms, mid, ls]` becomes `(ms << 24) | (mid << 16) | (ls << 8)`.
///
/// # Panics
///
/// Debug-asserts that `src` is a whole number of samples and that `dest`
/// holds exactly that many.
pub fn i24_to_q31(src: &[u8], dest: &mut [i32]) {
    debug_assert_eq!(src.len() % 3, 0);
    debug_assert_eq!(dest.len(), src.len() / 3);

    for (bytes, out) in src.chunks_exact(3).zip(dest) {
        *out = ((bytes[0] as i32) << 24) | ((bytes[1] as i32) << 16) | ((bytes[2] as i32) << 8);
    }
}

/// Pack Q31 containers into little-endian 24-bit samples, dropping the
/// low byte.
///
/// Each sample becomes the 3-byte group `[s >> 8, s >> 16, s >> 24]`, the
/// order WAV data chunks use.
///
/// # Panics
///
/// Debug-asserts that `dest` holds exactly 3 bytes per source sample.
pub fn q31_to_i24(src: &[i32], dest: &mut [u8]) {
    debug_assert_eq!(dest.len(), src.len() * 3);

    for (&sample, bytes) in src.iter().zip(dest.chunks_exact_mut(3)) {
        bytes[0] = (sample >> 8) as u8;
        bytes[1] = (sample >> 16) as u8;
        bytes[2] = (sample >> 24) as u8;
    }
}

/// Truncate Q31 containers to Q15 by keeping the top 16 bits.
///
/// # Panics
///
/// Debug-asserts that both slices have the same length.
pub fn q31_to_q15(src: &[i32], dest: &mut [i16]) {
    debug_assert_eq!(dest.len(), src.len());

    for (&sample, out) in src.iter().zip(dest) {
        *out = (sample >> 16) as i16;
    }
}

/// Interleave two mono Q31 buffers into one stereo Q15 buffer.
///
/// Frame `i` is `[src0[i] >> 16, src1[i] >> 16]`.
///
/// # Panics
///
/// Debug-asserts that the sources match and `dest` holds two samples per
/// frame.
pub fn interleave_q31_to_q15(src0: &[i32], src1: &[i32], dest: &mut [i16]) {
    debug_assert_eq!(src0.len(), src1.len());
    debug_assert_eq!(dest.len(), src0.len() * 2);

    for i in 0..src0.len() {
        dest[i * 2] = (src0[i] >> 16) as i16;
        dest[i * 2 + 1] = (src1[i] >> 16) as i16;
    }
}

/// Interleave two mono Q31 buffers into one stereo little-endian 24-bit
/// buffer.
///
/// Frame `i` is the 6-byte group `[src0 ls, src0 mid, src0 ms, src1 ls,
/// src1 mid, src1 ms]`.
///
/// # Panics
///
/// Debug-asserts that the sources match and `dest` holds 6 bytes per frame.
pub fn interleave_q31_to_i24(src0: &[i32], src1: &[i32], dest: &mut [u8]) {
    debug_assert_eq!(src0.len(), src1.len());
    debug_assert_eq!(dest.len(), src0.len() * 6);

    for (i, frame) in dest.chunks_exact_mut(6).enumerate() {
        frame[0] = (src0[i] >> 8) as u8;
        frame[1] = (src0[i] >> 16) as u8;
        frame[2] = (src0[i] >> 24) as u8;
        frame[3] = (src1[i] >> 8) as u8;
        frame[4] = (src1[i] >> 16) as u8;
        frame[5] = (src1[i] >> 24) as u8;
    }
}
