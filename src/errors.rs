// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision fixed-point operations
// ============================================================================

use std::fmt;

/// Errors that can occur during fixed-point operations.
///
/// With an arbitrary-precision backing integer, ordinary arithmetic cannot
/// overflow; only division and the API-boundary conversions are fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Attempted division by a zero-magnitude divisor
    DivisionByZero,
    /// Conversion target cannot hold the value
    Overflow,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string or value is invalid
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::Overflow => {
                write!(f, "conversion overflow: target type cannot hold the value")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
