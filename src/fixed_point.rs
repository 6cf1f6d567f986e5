// ============================================================================
// Fixed-Point Number
// Arbitrary-precision fixed-point arithmetic with runtime-configurable scale
// ============================================================================

use crate::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

/// Arbitrary-precision fixed-point number.
///
/// Internally stores `value × 2^scale` as a [`BigInt`], where `scale` is the
/// number of fractional bits (Q). Arithmetic never overflows; precision is
/// bounded only by memory.
///
/// # Scale alignment
/// Binary operators between two `FixedPoint` values align the right-hand
/// operand to the **left-hand** operand's scale before combining, and the
/// result carries the left-hand scale. Alignment truncates (floor) when it
/// narrows; it never rounds.
///
/// # Equality
/// Equality is exact over `(magnitude, scale)`: two values representing the
/// same quantity at different scales compare unequal until rescaled to a
/// common scale. This makes the type usable as a hash-map key with
/// representation identity. Ordering, by contrast, aligns scales first (see
/// the [`Ord`] impl for the cross-scale caveat).
///
/// # Example
/// ```
/// use bigfixed::FixedPoint;
///
/// let a = FixedPoint::new(1, 10);
/// let b = FixedPoint::new(4, 10);
/// let q = a / b;
/// assert_eq!(q.to_decimal_string(2), "0.25");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPoint {
    /// The scaled value: `logical_value × 2^scale`, floored.
    magnitude: BigInt,
    /// Number of fractional bits.
    scale: u32,
}

impl FixedPoint {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from an integer seed: `magnitude = value << scale`.
    ///
    /// Accepts native integers and [`BigInt`] through [`Into`]; any other
    /// operand type is rejected at compile time.
    #[inline]
    pub fn new(value: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            magnitude: value.into() << scale,
            scale,
        }
    }

    /// Adopt an already-scaled magnitude.
    ///
    /// Use this when you have computed `value × 2^scale` yourself.
    #[inline]
    pub fn from_raw(magnitude: BigInt, scale: u32) -> Self {
        Self { magnitude, scale }
    }

    /// Zero at the given scale.
    #[inline]
    pub fn zero(scale: u32) -> Self {
        Self {
            magnitude: BigInt::zero(),
            scale,
        }
    }

    /// One (1.0) at the given scale.
    #[inline]
    pub fn one(scale: u32) -> Self {
        Self {
            magnitude: BigInt::one() << scale,
            scale,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The raw scaled magnitude.
    #[inline]
    pub fn raw_magnitude(&self) -> &BigInt {
        &self.magnitude
    }

    /// Consume and return the raw scaled magnitude.
    #[inline]
    pub fn into_raw(self) -> BigInt {
        self.magnitude
    }

    /// Number of fractional bits (Q).
    #[inline]
    pub fn fractional_bits(&self) -> u32 {
        self.scale
    }

    /// The smallest positive value representable at this scale: magnitude 1,
    /// i.e. `2^-scale`.
    #[inline]
    pub fn resolution(&self) -> Self {
        Self {
            magnitude: BigInt::one(),
            scale: self.scale,
        }
    }

    /// Check if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Check if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.magnitude.is_positive()
    }

    /// Check if the value is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.magnitude.is_negative()
    }

    /// Absolute value. Total: an arbitrary-precision magnitude has no
    /// `MIN`-negation edge case.
    #[inline]
    pub fn abs(&self) -> Self {
        Self {
            magnitude: self.magnitude.abs(),
            scale: self.scale,
        }
    }

    // ========================================================================
    // Precision Conversion
    // ========================================================================

    /// Change the number of fractional bits in place.
    ///
    /// Widening (`new_scale > scale`) is lossless. Narrowing discards the
    /// low-order fractional bits with an arithmetic right shift, which floors
    /// toward negative infinity on negative magnitudes; it does not round
    /// and does not truncate toward zero. No-op when the scale is unchanged.
    pub fn rescale(&mut self, new_scale: u32) {
        match new_scale.cmp(&self.scale) {
            Ordering::Equal => return,
            Ordering::Greater => self.magnitude <<= new_scale - self.scale,
            Ordering::Less => self.magnitude >>= self.scale - new_scale,
        }
        self.scale = new_scale;
    }

    /// Consuming variant of [`rescale`](Self::rescale), for chaining.
    #[inline]
    pub fn rescaled(mut self, new_scale: u32) -> Self {
        self.rescale(new_scale);
        self
    }

    /// The magnitude this value would have at `scale`, borrowing when no
    /// shift is needed.
    fn aligned_to(&self, scale: u32) -> Cow<'_, BigInt> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Cow::Borrowed(&self.magnitude),
            Ordering::Greater => Cow::Owned(&self.magnitude << (scale - self.scale)),
            Ordering::Less => Cow::Owned(&self.magnitude >> (self.scale - scale)),
        }
    }

    // ========================================================================
    // Fallible Arithmetic
    // ========================================================================

    /// Checked division by another fixed-point value.
    ///
    /// The divisor is aligned to `self`'s scale first; the dividend magnitude
    /// is pre-shifted by `scale` so the quotient keeps `scale` fractional
    /// bits. The underlying integer division truncates toward zero.
    ///
    /// # Errors
    /// `DivisionByZero` if the aligned divisor magnitude is zero, including
    /// a tiny divisor whose magnitude truncates to zero when narrowed to
    /// `self`'s scale.
    pub fn checked_div(&self, rhs: &FixedPoint) -> NumericResult<FixedPoint> {
        let divisor = rhs.aligned_to(self.scale);
        if divisor.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(FixedPoint {
            magnitude: (&self.magnitude << self.scale) / divisor.as_ref(),
            scale: self.scale,
        })
    }

    /// Checked division by a native integer.
    ///
    /// The integer divides the raw magnitude directly; no rescale step is
    /// needed because an integer operand carries no scale of its own.
    ///
    /// # Errors
    /// `DivisionByZero` if `rhs` is zero.
    pub fn checked_div_int(&self, rhs: i64) -> NumericResult<FixedPoint> {
        if rhs == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(FixedPoint {
            magnitude: self.magnitude.clone() / rhs,
            scale: self.scale,
        })
    }

    // ========================================================================
    // Decimal Formatting
    // ========================================================================

    /// Format with exactly `decimal_digits` digits after the decimal point.
    ///
    /// Computes `(magnitude × 10^decimal_digits) >> scale` (floor) and splits
    /// the base-10 digit string. Digits beyond `decimal_digits` are
    /// truncated, never rounded. With `decimal_digits == 0` the output ends
    /// in a bare `'.'`.
    pub fn to_decimal_string(&self, decimal_digits: u32) -> String {
        let shifted = (&self.magnitude * BigInt::from(10).pow(decimal_digits)) >> self.scale;
        let negative = shifted.is_negative();
        let digits = shifted.magnitude().to_str_radix(10);

        let d = decimal_digits as usize;
        let unsigned = if digits.len() <= d {
            format!("0.{:0>width$}", digits, width = d)
        } else {
            let split = digits.len() - d;
            format!("{}.{}", &digits[..split], &digits[split..])
        };

        if negative {
            format!("-{}", unsigned)
        } else {
            unsigned
        }
    }

    // ========================================================================
    // Conversion from rust_decimal (for API boundaries)
    // ========================================================================

    /// Convert from [`rust_decimal::Decimal`], flooring to `scale` fractional
    /// bits.
    ///
    /// Intended for API boundaries (parsing user input). Exact in `BigInt`
    /// arithmetic; cannot fail.
    pub fn from_decimal(value: rust_decimal::Decimal, scale: u32) -> Self {
        let mantissa = BigInt::from(value.mantissa());
        let denom = BigInt::from(10).pow(value.scale());
        Self {
            magnitude: (mantissa << scale).div_floor(&denom),
            scale,
        }
    }

    /// Convert to [`rust_decimal::Decimal`], exactly.
    ///
    /// A scale of `n` fractional bits needs exactly `n` decimal digits
    /// (`2^-n = 5^n / 10^n`), so the conversion is lossless when it fits.
    ///
    /// # Errors
    /// - `PrecisionLoss` if `scale` exceeds `Decimal`'s 28-digit ceiling
    /// - `Overflow` if the decimal mantissa exceeds `Decimal`'s range
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        if self.scale > 28 {
            return Err(NumericError::PrecisionLoss);
        }
        let mantissa = (&self.magnitude * BigInt::from(5).pow(self.scale))
            .to_i128()
            .ok_or(NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, self.scale)
            .map_err(|_| NumericError::Overflow)
    }

    /// Parse a plain decimal string (`"123"`, `"-0.001"`, `"2.5"`) at the
    /// given scale, without going through floating point.
    ///
    /// Floors toward negative infinity when the fraction does not fit in
    /// `scale` bits, matching [`rescale`](Self::rescale) semantics.
    ///
    /// # Errors
    /// `InvalidInput` on empty or non-numeric text.
    pub fn from_decimal_str(s: &str, scale: u32) -> NumericResult<Self> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_str, frac_str) = match s.find('.') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s, ""),
        };

        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if !int_str.bytes().all(|b| b.is_ascii_digit())
            || !frac_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(NumericError::InvalidInput);
        }

        // value = digits / 10^frac_len; magnitude = floor(value × 2^scale)
        let mut digits: BigInt = format!("{}{}", int_str, frac_str)
            .parse()
            .map_err(|_| NumericError::InvalidInput)?;
        if negative {
            digits = -digits;
        }
        let denom = BigInt::from(10).pow(frac_str.len() as u32);
        Ok(Self {
            magnitude: (digits << scale).div_floor(&denom),
            scale,
        })
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl Ord for FixedPoint {
    /// Align the right operand to the left operand's scale, compare
    /// magnitudes, then tie-break on scale so the order stays consistent
    /// with exact equality.
    ///
    /// Cross-scale comparison truncates the finer operand's extra fractional
    /// bits; two values within one resolution of each other at different
    /// scales are ordered by scale, not by the truncated difference.
    fn cmp(&self, other: &Self) -> Ordering {
        let rhs = other.aligned_to(self.scale);
        self.magnitude
            .cmp(rhs.as_ref())
            .then_with(|| self.scale.cmp(&other.scale))
    }
}

impl PartialOrd for FixedPoint {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<i64> for FixedPoint {
    /// `magnitude == int << scale`: the integer is treated as scale 0 and
    /// widened, so this is value equality against whole numbers.
    #[inline]
    fn eq(&self, other: &i64) -> bool {
        self.magnitude == BigInt::from(*other) << self.scale
    }
}

impl PartialOrd<i64> for FixedPoint {
    #[inline]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.magnitude.cmp(&(BigInt::from(*other) << self.scale)))
    }
}

// ============================================================================
// Unary Operators
// ============================================================================

impl Neg for FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn neg(mut self) -> FixedPoint {
        self.magnitude = -mem::take(&mut self.magnitude);
        self
    }
}

impl Neg for &FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn neg(self) -> FixedPoint {
        -self.clone()
    }
}

impl Not for FixedPoint {
    type Output = FixedPoint;

    /// Bitwise complement of the raw magnitude (`!x == -x - 1` in two's
    /// complement), keeping the scale. This is a representation-level
    /// complement: in value terms it is `-x` minus one resolution, not a
    /// logical negation.
    #[inline]
    fn not(mut self) -> FixedPoint {
        let m = mem::take(&mut self.magnitude);
        self.magnitude = -(m + BigInt::one());
        self
    }
}

impl Not for &FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn not(self) -> FixedPoint {
        !self.clone()
    }
}

// ============================================================================
// Compound Assignment - FixedPoint operands
// ============================================================================
//
// These carry the actual arithmetic; the binary operators below clone the
// left operand and delegate here. The right operand is aligned to the left
// operand's scale, so the result always keeps the receiver's scale.

impl AddAssign<&FixedPoint> for FixedPoint {
    fn add_assign(&mut self, rhs: &FixedPoint) {
        let m = rhs.aligned_to(self.scale);
        self.magnitude += m.as_ref();
    }
}

impl SubAssign<&FixedPoint> for FixedPoint {
    fn sub_assign(&mut self, rhs: &FixedPoint) {
        let m = rhs.aligned_to(self.scale);
        self.magnitude -= m.as_ref();
    }
}

impl MulAssign<&FixedPoint> for FixedPoint {
    /// Multiply raw magnitudes, then shift the doubled scale factor back out
    /// (floor).
    fn mul_assign(&mut self, rhs: &FixedPoint) {
        let m = rhs.aligned_to(self.scale);
        self.magnitude *= m.as_ref();
        self.magnitude >>= self.scale;
    }
}

impl DivAssign<&FixedPoint> for FixedPoint {
    /// Panics on a zero divisor - use [`FixedPoint::checked_div`] in
    /// production code.
    fn div_assign(&mut self, rhs: &FixedPoint) {
        *self = self.checked_div(rhs).expect("FixedPoint division by zero");
    }
}

impl AddAssign for FixedPoint {
    #[inline]
    fn add_assign(&mut self, rhs: FixedPoint) {
        *self += &rhs;
    }
}

impl SubAssign for FixedPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: FixedPoint) {
        *self -= &rhs;
    }
}

impl MulAssign for FixedPoint {
    #[inline]
    fn mul_assign(&mut self, rhs: FixedPoint) {
        *self *= &rhs;
    }
}

impl DivAssign for FixedPoint {
    #[inline]
    fn div_assign(&mut self, rhs: FixedPoint) {
        *self /= &rhs;
    }
}

// ============================================================================
// Compound Assignment - native integer operands
// ============================================================================
//
// An integer operand has implicit scale 0. Addition and subtraction widen it
// to the receiver's scale; multiplication and division act on the raw
// magnitude directly, since scaling commutes with them.

impl AddAssign<i64> for FixedPoint {
    fn add_assign(&mut self, rhs: i64) {
        self.magnitude += BigInt::from(rhs) << self.scale;
    }
}

impl SubAssign<i64> for FixedPoint {
    fn sub_assign(&mut self, rhs: i64) {
        self.magnitude -= BigInt::from(rhs) << self.scale;
    }
}

impl MulAssign<i64> for FixedPoint {
    fn mul_assign(&mut self, rhs: i64) {
        self.magnitude *= rhs;
    }
}

impl DivAssign<i64> for FixedPoint {
    /// Panics on a zero divisor - use [`FixedPoint::checked_div_int`] in
    /// production code.
    fn div_assign(&mut self, rhs: i64) {
        *self = self
            .checked_div_int(rhs)
            .expect("FixedPoint division by zero");
    }
}

// ============================================================================
// Binary Operators
// ============================================================================

// Non-mutating forms: clone the left operand, apply the compound assignment.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_method:ident, $rhs:ty) => {
        impl $imp<$rhs> for FixedPoint {
            type Output = FixedPoint;

            #[inline]
            fn $method(mut self, rhs: $rhs) -> FixedPoint {
                self.$assign_method(rhs);
                self
            }
        }

        impl $imp<$rhs> for &FixedPoint {
            type Output = FixedPoint;

            #[inline]
            fn $method(self, rhs: $rhs) -> FixedPoint {
                let mut lhs = self.clone();
                lhs.$assign_method(rhs);
                lhs
            }
        }
    };
}

forward_binop!(Add, add, add_assign, FixedPoint);
forward_binop!(Add, add, add_assign, &FixedPoint);
forward_binop!(Add, add, add_assign, i64);
forward_binop!(Sub, sub, sub_assign, FixedPoint);
forward_binop!(Sub, sub, sub_assign, &FixedPoint);
forward_binop!(Sub, sub, sub_assign, i64);
forward_binop!(Mul, mul, mul_assign, FixedPoint);
forward_binop!(Mul, mul, mul_assign, &FixedPoint);
forward_binop!(Mul, mul, mul_assign, i64);
forward_binop!(Div, div, div_assign, FixedPoint);
forward_binop!(Div, div, div_assign, &FixedPoint);
forward_binop!(Div, div, div_assign, i64);

// Integer left-operand forms. `+`, `*` and the bitwise operators commute;
// `-` and `/` promote the integer to a FixedPoint at the right operand's
// scale so operand order is preserved.
impl Add<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn add(self, rhs: FixedPoint) -> FixedPoint {
        rhs + self
    }
}

impl Mul<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn mul(self, rhs: FixedPoint) -> FixedPoint {
        rhs * self
    }
}

impl Sub<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn sub(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint::new(self, rhs.scale) - rhs
    }
}

impl Div<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn div(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint::new(self, rhs.scale) / rhs
    }
}

// ============================================================================
// Shift Operators
// ============================================================================
//
// Shifts act on the raw magnitude only and leave the scale untouched: the
// logical value is multiplied or divided by a power of two while still being
// displayed at the same precision.

impl ShlAssign<u32> for FixedPoint {
    #[inline]
    fn shl_assign(&mut self, rhs: u32) {
        self.magnitude <<= rhs;
    }
}

impl ShrAssign<u32> for FixedPoint {
    /// Arithmetic shift: floors toward negative infinity on negative values.
    #[inline]
    fn shr_assign(&mut self, rhs: u32) {
        self.magnitude >>= rhs;
    }
}

forward_binop!(Shl, shl, shl_assign, u32);
forward_binop!(Shr, shr, shr_assign, u32);

// ============================================================================
// Bitwise Operators
// ============================================================================
//
// Representation-level by design: these combine raw magnitude bit patterns
// (two's complement for negatives) without any rescaling. Combining operands
// at mismatched scales therefore gives representation results, not value
// results. The result keeps the left operand's scale.

impl BitOrAssign<&FixedPoint> for FixedPoint {
    #[inline]
    fn bitor_assign(&mut self, rhs: &FixedPoint) {
        self.magnitude |= &rhs.magnitude;
    }
}

impl BitAndAssign<&FixedPoint> for FixedPoint {
    #[inline]
    fn bitand_assign(&mut self, rhs: &FixedPoint) {
        self.magnitude &= &rhs.magnitude;
    }
}

impl BitXorAssign<&FixedPoint> for FixedPoint {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &FixedPoint) {
        self.magnitude ^= &rhs.magnitude;
    }
}

impl BitOrAssign for FixedPoint {
    #[inline]
    fn bitor_assign(&mut self, rhs: FixedPoint) {
        *self |= &rhs;
    }
}

impl BitAndAssign for FixedPoint {
    #[inline]
    fn bitand_assign(&mut self, rhs: FixedPoint) {
        *self &= &rhs;
    }
}

impl BitXorAssign for FixedPoint {
    #[inline]
    fn bitxor_assign(&mut self, rhs: FixedPoint) {
        *self ^= &rhs;
    }
}

impl BitOrAssign<BigInt> for FixedPoint {
    #[inline]
    fn bitor_assign(&mut self, rhs: BigInt) {
        self.magnitude |= rhs;
    }
}

impl BitAndAssign<BigInt> for FixedPoint {
    #[inline]
    fn bitand_assign(&mut self, rhs: BigInt) {
        self.magnitude &= rhs;
    }
}

impl BitXorAssign<BigInt> for FixedPoint {
    #[inline]
    fn bitxor_assign(&mut self, rhs: BigInt) {
        self.magnitude ^= rhs;
    }
}

impl BitOrAssign<i64> for FixedPoint {
    #[inline]
    fn bitor_assign(&mut self, rhs: i64) {
        self.magnitude |= BigInt::from(rhs);
    }
}

impl BitAndAssign<i64> for FixedPoint {
    #[inline]
    fn bitand_assign(&mut self, rhs: i64) {
        self.magnitude &= BigInt::from(rhs);
    }
}

impl BitXorAssign<i64> for FixedPoint {
    #[inline]
    fn bitxor_assign(&mut self, rhs: i64) {
        self.magnitude ^= BigInt::from(rhs);
    }
}

forward_binop!(BitOr, bitor, bitor_assign, FixedPoint);
forward_binop!(BitOr, bitor, bitor_assign, &FixedPoint);
forward_binop!(BitOr, bitor, bitor_assign, BigInt);
forward_binop!(BitOr, bitor, bitor_assign, i64);
forward_binop!(BitAnd, bitand, bitand_assign, FixedPoint);
forward_binop!(BitAnd, bitand, bitand_assign, &FixedPoint);
forward_binop!(BitAnd, bitand, bitand_assign, BigInt);
forward_binop!(BitAnd, bitand, bitand_assign, i64);
forward_binop!(BitXor, bitxor, bitxor_assign, FixedPoint);
forward_binop!(BitXor, bitxor, bitxor_assign, &FixedPoint);
forward_binop!(BitXor, bitxor, bitxor_assign, BigInt);
forward_binop!(BitXor, bitxor, bitxor_assign, i64);

impl BitOr<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn bitor(self, rhs: FixedPoint) -> FixedPoint {
        rhs | self
    }
}

impl BitAnd<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn bitand(self, rhs: FixedPoint) -> FixedPoint {
        rhs & self
    }
}

impl BitXor<FixedPoint> for i64 {
    type Output = FixedPoint;

    #[inline]
    fn bitxor(self, rhs: FixedPoint) -> FixedPoint {
        rhs ^ self
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint(raw={}, scale={})", self.magnitude, self.scale)
    }
}

impl fmt::Display for FixedPoint {
    /// Formats with `scale` decimal digits, which renders the stored value
    /// exactly: `2^-n` terminates after exactly `n` decimal digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(self.scale))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_construction() {
        let x = FixedPoint::new(5, 10);
        assert_eq!(*x.raw_magnitude(), BigInt::from(5) << 10);
        assert_eq!(x.fractional_bits(), 10);

        let big = FixedPoint::new(BigInt::from(7), 3);
        assert_eq!(*big.raw_magnitude(), BigInt::from(56));

        let raw = FixedPoint::from_raw(BigInt::from(56), 3);
        assert_eq!(big, raw);

        assert!(FixedPoint::zero(8).is_zero());
        assert_eq!(FixedPoint::one(8), FixedPoint::new(1, 8));
    }

    #[test]
    fn test_rescale_noop() {
        let x = FixedPoint::new(42, 16);
        assert_eq!(x.clone().rescaled(16), x);
    }

    #[test]
    fn test_rescale_widen_narrow_roundtrip() {
        let x = FixedPoint::new(-37, 8);
        let roundtrip = x.clone().rescaled(40).rescaled(8);
        assert_eq!(roundtrip, x);
    }

    #[test]
    fn test_rescale_narrow_truncates() {
        // 1.5 at scale 1 narrows to 1 at scale 0
        let x = FixedPoint::from_raw(BigInt::from(3), 1).rescaled(0);
        assert_eq!(*x.raw_magnitude(), BigInt::from(1));
    }

    #[test]
    fn test_rescale_floors_negative() {
        // -1.5 at scale 1 must floor to -2, not truncate to -1; this pins
        // the backing integer's arithmetic-shift behavior on negatives.
        let x = FixedPoint::from_raw(BigInt::from(-3), 1).rescaled(0);
        assert_eq!(*x.raw_magnitude(), BigInt::from(-2));

        assert_eq!(BigInt::from(-1) >> 1u32, BigInt::from(-1));
    }

    #[test]
    fn test_resolution() {
        assert_eq!(
            FixedPoint::new(0, 1).resolution().to_decimal_string(1),
            "0.5"
        );
        assert_eq!(
            FixedPoint::new(100, 3).resolution().to_decimal_string(3),
            "0.125"
        );

        let r = FixedPoint::new(9, 12).resolution();
        assert_eq!(*r.raw_magnitude(), BigInt::one());
        assert_eq!(r.fractional_bits(), 12);
    }

    #[test]
    fn test_alignment_keeps_left_scale() {
        let a = FixedPoint::new(1, 10);
        let b = FixedPoint::new(1, 5);
        assert_eq!((a.clone() + &b).fractional_bits(), 10);
        assert_eq!((b + &a).fractional_bits(), 5);
    }

    #[test]
    fn test_add_sub() {
        let a = FixedPoint::new(3, 8);
        let b = FixedPoint::new(2, 8);
        assert_eq!(a.clone() + &b, FixedPoint::new(5, 8));
        assert_eq!(a.clone() - &b, FixedPoint::new(1, 8));
        assert_eq!(b.clone() - &a, FixedPoint::new(-1, 8));

        let mut c = a;
        c += b.clone();
        c -= b;
        assert_eq!(c, FixedPoint::new(3, 8));
    }

    #[test]
    fn test_mul() {
        // 1.5 * 1.5 = 2.25
        let x = FixedPoint::from_raw(BigInt::from(3), 1);
        let sq = x.clone() * &x;
        assert_eq!(*sq.raw_magnitude(), BigInt::from(4)); // 4/2 = 2, floor of 2.25 at Q1
        assert_eq!(sq.to_decimal_string(1), "2.0");

        // At a wider scale the product is exact
        let y = FixedPoint::from_raw(BigInt::from(3) << 7, 8); // 1.5
        assert_eq!((y.clone() * &y).to_decimal_string(2), "2.25");
    }

    #[test]
    fn test_div() {
        let q = FixedPoint::new(1, 10) / FixedPoint::new(4, 10);
        assert_eq!(*q.raw_magnitude(), BigInt::from(256));
        assert_eq!(q.to_decimal_string(2), "0.25");
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        // -1/3 at Q1: (-2 << 1) / 6 = -4/6 truncates to 0, where floor
        // division would give -1.
        let q = FixedPoint::new(-1, 1) / FixedPoint::new(3, 1);
        assert_eq!(*q.raw_magnitude(), BigInt::zero());
    }

    #[test]
    fn test_div_by_zero() {
        let x = FixedPoint::new(1, 10);
        assert_eq!(
            x.checked_div(&FixedPoint::zero(10)),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(x.checked_div_int(0), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_div_by_divisor_truncated_to_zero() {
        // A divisor of one resolution at a finer scale truncates to zero
        // magnitude when aligned down to the dividend's scale.
        let tiny = FixedPoint::from_raw(BigInt::one(), 20);
        let x = FixedPoint::new(1, 4);
        assert_eq!(x.checked_div(&tiny), Err(NumericError::DivisionByZero));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_operator_panics_on_zero() {
        let _ = FixedPoint::new(1, 4) / FixedPoint::zero(4);
    }

    #[test]
    fn test_int_arithmetic() {
        let x = FixedPoint::new(2, 6);
        assert_eq!(x.clone() + 3, FixedPoint::new(5, 6));
        assert_eq!(x.clone() - 3, FixedPoint::new(-1, 6));
        assert_eq!(x.clone() * 4, FixedPoint::new(8, 6));
        assert_eq!(x.clone() / 2, FixedPoint::new(1, 6));

        // Integer on the left
        assert_eq!(3 + x.clone(), FixedPoint::new(5, 6));
        assert_eq!(3 * x.clone(), FixedPoint::new(6, 6));
        assert_eq!(3 - x.clone(), FixedPoint::new(1, 6));
        assert_eq!(8 / x.clone(), FixedPoint::new(4, 6));

        // 0.5 + 1 = 1.5: the integer is widened to the receiver's scale
        let half = FixedPoint::new(1, 4) / FixedPoint::new(2, 4);
        assert_eq!((half + 1).to_decimal_string(1), "1.5");
    }

    #[test]
    fn test_shift_leaves_scale() {
        let x = FixedPoint::new(3, 5);
        let doubled = x.clone() << 1;
        assert_eq!(doubled.fractional_bits(), 5);
        assert_eq!(doubled.to_decimal_string(0), "6.");

        let halved = x >> 1;
        assert_eq!(halved.to_decimal_string(1), "1.5");
    }

    #[test]
    fn test_bitwise_is_representation_level() {
        let a = FixedPoint::from_raw(BigInt::from(0b1100), 2);
        let b = FixedPoint::from_raw(BigInt::from(0b1010), 2);
        assert_eq!(*(a.clone() | &b).raw_magnitude(), BigInt::from(0b1110));
        assert_eq!(*(a.clone() & &b).raw_magnitude(), BigInt::from(0b1000));
        assert_eq!(*(a.clone() ^ &b).raw_magnitude(), BigInt::from(0b0110));

        // Mismatched scales combine raw bits without alignment
        let c = FixedPoint::from_raw(BigInt::from(0b1), 7);
        let mixed = a.clone() | &c;
        assert_eq!(*mixed.raw_magnitude(), BigInt::from(0b1101));
        assert_eq!(mixed.fractional_bits(), 2);

        // Native integers and raw BigInts as right operands
        assert_eq!(*(a.clone() | 1).raw_magnitude(), BigInt::from(0b1101));
        assert_eq!(
            *(a.clone() & BigInt::from(0b0100)).raw_magnitude(),
            BigInt::from(0b0100)
        );
        assert_eq!(*(1 | a).raw_magnitude(), BigInt::from(0b1101));
    }

    #[test]
    fn test_not_complements_raw_magnitude() {
        let a = FixedPoint::from_raw(BigInt::from(0b1100), 2);
        assert_eq!(*(!a.clone()).raw_magnitude(), BigInt::from(-0b1101));
        assert_eq!(*(!&a).raw_magnitude(), BigInt::from(-0b1101));
        assert_eq!((!a.clone()).fractional_bits(), 2);

        // In value terms the complement is -x minus one resolution
        assert_eq!(!a.clone(), -&a - a.resolution());
        assert_eq!(*(!FixedPoint::zero(3)).raw_magnitude(), BigInt::from(-1));
        let neg = FixedPoint::from_raw(BigInt::from(-5), 4);
        assert_eq!(*(!neg).raw_magnitude(), BigInt::from(4));
    }

    #[test]
    fn test_neg_and_not() {
        let x = FixedPoint::new(3, 4);
        assert_eq!(-x.clone(), FixedPoint::new(-3, 4));
        assert_eq!(-(-x.clone()), x);

        // !x is -x minus one resolution
        let complement = !x.clone();
        assert_eq!(complement, -x.clone() - x.resolution());
        assert_eq!(!(!x.clone()), x);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = FixedPoint::new(5, 10);
        let b = FixedPoint::new(5, 5);
        assert_ne!(a, b);
        assert_eq!(a, b.clone().rescaled(10));
        assert_eq!(a.clone().rescaled(5), b);
    }

    #[test]
    fn test_ordering() {
        let a = FixedPoint::new(5, 8);
        let b = FixedPoint::new(6, 8);
        assert!(a < b);
        assert!(b > a);

        // Cross-scale: value order wins where it is representable
        let half = FixedPoint::new(1, 4) / FixedPoint::new(2, 4); // 0.5 @ Q4
        let one = FixedPoint::new(1, 9);
        assert!(half < one);
        assert!(one > half);

        // Equal values at different scales order by scale, never Equal
        let five_q5 = FixedPoint::new(5, 5);
        let five_q10 = FixedPoint::new(5, 10);
        assert_ne!(five_q5.cmp(&five_q10), Ordering::Equal);
        assert_eq!(
            five_q5.cmp(&five_q10),
            five_q10.cmp(&five_q5).reverse()
        );
    }

    #[test]
    fn test_ordering_against_integers() {
        let x = FixedPoint::new(7, 12);
        assert_eq!(x, 7);
        assert!(x < 8);
        assert!(x > 6);

        let half = FixedPoint::new(1, 4) / FixedPoint::new(2, 4);
        assert!(half < 1);
        assert!(half > 0);
        assert_ne!(half, 0);
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        let mut map = HashMap::new();
        map.insert(FixedPoint::new(5, 10), "q10");
        map.insert(FixedPoint::new(5, 5), "q5");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&FixedPoint::new(5, 10)), Some(&"q10"));
        assert_eq!(map.get(&FixedPoint::new(5, 5)), Some(&"q5"));
    }

    #[test]
    fn test_to_decimal_string_padding() {
        let x = FixedPoint::new(1, 10) / FixedPoint::new(4, 10);
        assert_eq!(x.to_decimal_string(2), "0.25");
        assert_eq!(x.to_decimal_string(5), "0.25000");

        assert_eq!(FixedPoint::zero(4).to_decimal_string(3), "0.000");
        assert_eq!(FixedPoint::new(5, 2).to_decimal_string(0), "5.");
    }

    #[test]
    fn test_to_decimal_string_negative() {
        let x = FixedPoint::new(-1, 10) / FixedPoint::new(2, 10);
        assert_eq!(x.to_decimal_string(1), "-0.5");

        let y = FixedPoint::new(-3, 8);
        assert_eq!(y.to_decimal_string(2), "-3.00");

        // Floor shift: -0.5 at one digit past its precision stays -0.5,
        // but -0.5 printed with zero digits floors to -1.
        assert_eq!(x.to_decimal_string(0), "-1.");
    }

    #[test]
    fn test_display() {
        let x = FixedPoint::from_raw(BigInt::from(3), 1);
        assert_eq!(x.to_string(), "1.5");
        assert_eq!(FixedPoint::new(2, 3).to_string(), "2.000");
    }

    #[test]
    fn test_from_decimal_str() {
        let x = FixedPoint::from_decimal_str("2.5", 8).unwrap();
        assert_eq!(*x.raw_magnitude(), BigInt::from(640));

        let y = FixedPoint::from_decimal_str("42", 4).unwrap();
        assert_eq!(y, FixedPoint::new(42, 4));

        // -0.3 at Q1 floors to -0.5
        let z = FixedPoint::from_decimal_str("-0.3", 1).unwrap();
        assert_eq!(*z.raw_magnitude(), BigInt::from(-1));

        assert_eq!(
            FixedPoint::from_decimal_str("", 4),
            Err(NumericError::InvalidInput)
        );
        assert_eq!(
            FixedPoint::from_decimal_str("1.2.3", 4),
            Err(NumericError::InvalidInput)
        );
        assert_eq!(
            FixedPoint::from_decimal_str("abc", 4),
            Err(NumericError::InvalidInput)
        );
    }

    #[test]
    fn test_decimal_conversions() {
        use rust_decimal::Decimal;

        let d = Decimal::new(25, 1); // 2.5
        let x = FixedPoint::from_decimal(d, 8);
        assert_eq!(*x.raw_magnitude(), BigInt::from(640));
        assert_eq!(x.to_decimal().unwrap(), d);

        // Not representable in 2 fractional bits: floors
        let tenth = FixedPoint::from_decimal(Decimal::new(1, 1), 2); // 0.1 -> 0.00
        assert_eq!(*tenth.raw_magnitude(), BigInt::zero());

        let too_fine = FixedPoint::new(1, 64);
        assert_eq!(too_fine.to_decimal(), Err(NumericError::PrecisionLoss));

        let too_big = FixedPoint::new(BigInt::from(1) << 200, 0);
        assert_eq!(too_big.to_decimal(), Err(NumericError::Overflow));
    }
}
