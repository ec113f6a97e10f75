//! Shared test utilities for the soil-wms workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Capabilities XML fixtures modelled on the BGS soil service
//! - Query-string helpers for asserting on built WMS URLs
//! - Float comparison macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_close, fixtures};
//! ```

pub mod fixtures;
pub mod urls;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use urls::*;

/// Assert two `f64`s differ by at most `tolerance` (default `1e-9`).
///
/// ```ignore
/// assert_close!(x, -14204.41924, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {
        $crate::assert_close!($actual, $expected, 1e-9)
    };
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance): (f64, f64, f64) = ($actual, $expected, $tolerance);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{} = {} is not within {} of {}",
            stringify!($actual),
            actual,
            tolerance,
            expected
        );
    }};
}

/// [`assert_close!`] for `(x, y)` tuples such as converter output.
#[macro_export]
macro_rules! assert_point_close {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual: (f64, f64) = $actual;
        let expected: (f64, f64) = $expected;
        $crate::assert_close!(actual.0, expected.0, $tolerance);
        $crate::assert_close!(actual.1, expected.1, $tolerance);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_close_values_pass() {
        assert_close!(51.50741, 51.5074, 1e-4);
        assert_close!(0.1 + 0.2, 0.3);
    }

    #[test]
    #[should_panic(expected = "is not within")]
    fn test_distant_values_fail() {
        assert_close!(5733798.6, 5733726.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "is not within")]
    fn test_point_checks_both_axes() {
        assert_point_close!((1.0, 2.5), (1.0, 2.0), 0.1);
    }
}
