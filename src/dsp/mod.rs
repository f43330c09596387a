//! Fixed-point signal processing for the acquisition pipeline.
//!
//! Everything here operates on Q31 samples (24-bit audio widened into the
//! upper bytes of an `i32`) and runs identically on the target and on the
//! host, so the whole pipeline is testable in software.
//!
//! ## Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`DecimationFilter`] | Multi-rate FIR decimator, 384 kHz in |
//! | [`coefficients`] | Q31 anti-aliasing filter tables per rate |
//! | [`intrinsics`] | Saturating/widening arithmetic with ARM DSP fast paths |

pub mod coefficients;
pub mod decimation;
pub mod intrinsics;

pub use decimation::DecimationFilter;
