// ============================================================================
// bigfixed Library
// Arbitrary-precision binary fixed-point arithmetic
// ============================================================================

//! # bigfixed
//!
//! Arbitrary-precision fixed-point arithmetic: a real number stored as an
//! arbitrary-precision integer scaled by a configurable count of fractional
//! bits (Q). Intended for callers that need far more precision than native
//! floating point (e.g. iterative bisection computing roots to thousands of
//! digits) with no rounding error anywhere in the pipeline.
//!
//! ## Features
//!
//! - **Unbounded precision**: magnitude backed by [`num_bigint::BigInt`],
//!   scale chosen per value at runtime
//! - **Explicit precision protocol**: `rescale` widens losslessly and
//!   narrows by truncation, never rounding
//! - **Full operator set**: `+ - * /` against fixed-point and native-integer
//!   operands in both orders, raw-magnitude shifts and bitwise ops, total
//!   ordering and exact `(magnitude, scale)` equality usable as a map key
//! - **Exact decimal rendering** with a caller-chosen digit count
//!
//! ## Example
//!
//! ```rust
//! use bigfixed::FixedPoint;
//!
//! let mut x = FixedPoint::new(1, 10) / FixedPoint::new(4, 10);
//! assert_eq!(x.to_decimal_string(2), "0.25");
//!
//! x += 1;
//! x *= 2;
//! assert_eq!(x.to_decimal_string(2), "2.50");
//!
//! x -= 1;
//! assert_eq!(x.to_decimal_string(2), "1.50");
//! ```

pub mod errors;
pub mod fixed_point;

// Re-exports for convenience
pub use errors::{NumericError, NumericResult};
pub use fixed_point::FixedPoint;
