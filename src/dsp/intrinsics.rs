//! ARM DSP instruction wrappers with pure-Rust fallbacks.
//!
//! On `thumbv7em` targets (Cortex-M4/F with DSP extension), these compile to
//! single ARM instructions. On other targets (host tests), equivalent
//! pure-Rust implementations are used.
//!
//! The decimation filter accumulates Q31 × Q31 products in 64 bits and
//! narrows back to Q31 once per output sample, so the hot path is a wide
//! multiply-accumulate plus one final saturate.

/// Multiply two 32-bit values and accumulate the full 64-bit product.
///
/// Computes `sum + (a as i64) * (b as i64)` with no truncation.
/// Maps to ARM `SMLAL`.
#[inline(always)]
pub fn multiply_accumulate_32x32_64(sum: i64, a: i32, b: i32) -> i64 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let mut lo = sum as u32;
        let mut hi = (sum >> 32) as u32;
        unsafe {
            core::arch::asm!(
                "smlal {lo}, {hi}, {a}, {b}",
                lo = inout(reg) lo,
                hi = inout(reg) hi,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        (((hi as u64) << 32) | lo as u64) as i64
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        sum + (a as i64) * (b as i64)
    }
}

/// Saturate an `i64` to `i32` range.
///
/// Values beyond `i32::MIN..=i32::MAX` clamp to the nearest bound. Used to
/// narrow a shifted Q63 accumulator back into the Q31 sample container; no
/// single ARM instruction covers the 64-to-32 case, so this is plain Rust
/// on every target.
#[inline(always)]
pub fn saturate32(val: i64) -> i32 {
    if val > i32::MAX as i64 {
        i32::MAX
    } else if val < i32::MIN as i64 {
        i32::MIN
    } else {
        val as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate32() {
        assert_eq!(saturate32(0), 0);
        assert_eq!(saturate32(i32::MAX as i64), i32::MAX);
        assert_eq!(saturate32(i32::MAX as i64 + 1), i32::MAX);
        assert_eq!(saturate32(i32::MIN as i64), i32::MIN);
        assert_eq!(saturate32(i32::MIN as i64 - 1), i32::MIN);
        assert_eq!(saturate32(i64::MAX), i32::MAX);
        assert_eq!(saturate32(i64::MIN), i32::MIN);
    }

    #[test]
    #[allow(arithmetic_overflow)]
    fn test_multiply_accumulate_32x32_64() {
        // (0x40000000)^2 = 2^60, exactly representable in the wide accumulator
        assert_eq!(
            multiply_accumulate_32x32_64(0, 0x40000000, 0x40000000),
            1i64 << 60
        );
        // signs
        assert_eq!(multiply_accumulate_32x32_64(5, -2, 3), -1);
        // accumulation carries across the low 32 bits
        assert_eq!(
            multiply_accumulate_32x32_64(0xFFFF_FFFF, 1, 1),
            0x1_0000_0000
        );
        // repeated accumulation
        let mut acc = 0i64;
        for _ in 0..4 {
            acc = multiply_accumulate_32x32_64(acc, i32::MAX, i32::MAX);
        }
        assert_eq!(acc, 4 * (i32::MAX as i64) * (i32::MAX as i64));
    }
}
