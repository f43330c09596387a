//! Q31 low-pass coefficient tables for the decimation cascades.
//!
//! Each table is one anti-aliasing FIR stage of a decimate-by-2 cascade.
//! Values are Q31 fixed point (unity is `1 << 31`) and every table is
//! symmetric (linear phase). Early stages run at high input rates where a
//! wide transition band is acceptable, so they stay short; the final stage
//! of each cascade defines the output band edge and carries the most taps.
//!
//! | Output rate | Cascade                                   |
//! |-------------|-------------------------------------------|
//! | 192 kHz     | [`FIR_192K_0`]                            |
//! | 96 kHz      | [`FIR_96K_0`] → [`FIR_96K_1`]             |
//! | 48 kHz      | [`FIR_48K_0`] → [`FIR_48K_1`] → [`FIR_48K_2`] |
//! | 24 kHz      | [`FIR_24K_0`] → [`FIR_24K_1`] → [`FIR_24K_2`] → [`FIR_24K_3`] |

/// Longest table in any cascade; sizes the per-stage delay lines.
pub const MAX_FIR_TAPS: usize = 33;

/// Single stage for 192 kHz output, 15 taps, 40 dB stopband.
pub const FIR_192K_0: [i32; 15] = [
    -23215316, 15943290, 69341217, -4194368, -136036336, 11320770, 476387342, 749653914,
    476387342, 11320770, -136036336, -4194368, 69341217, 15943290, -23215316,
];

/// First stage for 96 kHz output, 9 taps.
pub const FIR_96K_0: [i32; 9] = [
    -20749647, -66609278, 51582801, 442242045, 691682165, 442242045, 51582801, -66609278,
    -20749647,
];

/// Second stage for 96 kHz output, 33 taps.
pub const FIR_96K_1: [i32; 33] = [
    -3229201, 1658598, 16721610, 16330065, -12855261, -23661054, 18450717, 41258441, -22628821,
    -68277309, 26456118, 114386501, -29451143, -213892037, 31368109, 678814008, 1041713732,
    678814008, 31368109, -213892037, -29451143, 114386501, 26456118, -68277309, -22628821,
    41258441, 18450717, -23661054, -12855261, 16330065, 16721610, 1658598, -3229201,
];

/// First stage for 48 kHz output, 7 taps.
pub const FIR_48K_0: [i32; 7] = [
    -42201666, 18023525, 423595866, 727113801, 423595866, 18023525, -42201666,
];

/// Second stage for 48 kHz output, 9 taps.
pub const FIR_48K_1: [i32; 9] = [
    -35829136, -93392547, 90204797, 624894336, 955274946, 624894336, 90204797, -93392547,
    -35829136,
];

/// Third stage for 48 kHz output, 33 taps.
pub const FIR_48K_2: [i32; 33] = [
    -2823963, 804105, 13756249, 13832557, -12099816, -21810016, 17681236, 39284877, -22118934,
    -66381589, 26258540, 112809109, -29540929, -212849373, 31655722, 678451831, 1041361918,
    678451831, 31655722, -212849373, -29540929, 112809109, 26258540, -66381589, -22118934,
    39284877, 17681236, -21810016, -12099816, 13832557, 13756249, 804105, -2823963,
];

/// First stage for 24 kHz output, 5 taps.
pub const FIR_24K_0: [i32; 5] = [87026071, 382177371, 589816446, 382177371, 87026071];

/// Second stage for 24 kHz output, 7 taps.
pub const FIR_24K_1: [i32; 7] = [
    -59682168, 25489114, 599055019, 1028294198, 599055019, 25489114, -59682168,
];

/// Third stage for 24 kHz output, 9 taps. Same design point as [`FIR_48K_1`].
pub const FIR_24K_2: [i32; 9] = [
    -35829136, -93392547, 90204797, 624894336, 955274946, 624894336, 90204797, -93392547,
    -35829136,
];

/// Fourth stage for 24 kHz output, 33 taps. Same design point as [`FIR_48K_2`].
pub const FIR_24K_3: [i32; 33] = [
    -2823963, 804105, 13756249, 13832557, -12099816, -21810016, 17681236, 39284877, -22118934,
    -66381589, 26258540, 112809109, -29540929, -212849373, 31655722, 678451831, 1041361918,
    678451831, 31655722, -212849373, -29540929, 112809109, 26258540, -66381589, -22118934,
    39284877, 17681236, -21810016, -12099816, 13832557, 13756249, 804105, -2823963,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(coeffs: &[i32]) {
        for i in 0..coeffs.len() / 2 {
            assert_eq!(coeffs[i], coeffs[coeffs.len() - 1 - i], "tap {i}");
        }
    }

    #[test]
    fn all_tables_are_symmetric() {
        assert_symmetric(&FIR_192K_0);
        assert_symmetric(&FIR_96K_0);
        assert_symmetric(&FIR_96K_1);
        assert_symmetric(&FIR_48K_0);
        assert_symmetric(&FIR_48K_1);
        assert_symmetric(&FIR_48K_2);
        assert_symmetric(&FIR_24K_0);
        assert_symmetric(&FIR_24K_1);
        assert_symmetric(&FIR_24K_2);
        assert_symmetric(&FIR_24K_3);
    }

    #[test]
    fn no_table_exceeds_the_delay_line_bound() {
        for taps in [
            FIR_192K_0.len(),
            FIR_96K_0.len(),
            FIR_96K_1.len(),
            FIR_48K_0.len(),
            FIR_48K_1.len(),
            FIR_48K_2.len(),
            FIR_24K_0.len(),
            FIR_24K_1.len(),
            FIR_24K_2.len(),
            FIR_24K_3.len(),
        ] {
            assert!(taps <= MAX_FIR_TAPS);
        }
    }

    #[test]
    fn dc_gain_stays_in_q31_headroom() {
        // the per-stage DC gain (coefficient sum) must stay below 2.0 so a
        // constant full-scale input cannot wrap the wide accumulator shift
        for coeffs in [
            &FIR_192K_0[..],
            &FIR_96K_0[..],
            &FIR_96K_1[..],
            &FIR_48K_0[..],
            &FIR_48K_1[..],
            &FIR_48K_2[..],
            &FIR_24K_0[..],
            &FIR_24K_1[..],
            &FIR_24K_2[..],
            &FIR_24K_3[..],
        ] {
            let sum: i64 = coeffs.iter().map(|&c| c as i64).sum();
            assert!(sum > 0, "low-pass stage must pass DC");
            assert!(sum < 2 * (1i64 << 31), "DC gain above 2.0");
        }
    }
}
