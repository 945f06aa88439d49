// SPDX-License-Identifier: MPL-2.0
//! Shared test helpers for float comparisons.
//!
//! Re-exports the `approx` assertion macros so tests can compare coordinates
//! and zoom factors without tripping over floating-point precision.

pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne};

/// Default epsilon for f32 comparisons in coordinate math.
pub const F32_EPSILON: f32 = 1e-5;

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;
