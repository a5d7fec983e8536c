//! Fixed-point number with 8 fractional bits
//!
//! [`FixedPoint`] stores a real number as an `i32` scaled by 256. The raw
//! value is the only state: any bit pattern is valid, and equality is
//! bit-exact on it. Conversions to `i32` and `f32` are derived on demand and
//! may lose precision.
//!
//! Example: 5.25 is stored as (5 << 8) + 64 = 1344

use std::fmt;
use std::str::FromStr;

use crate::{FixedPointError, Result};

/// Fixed-point number with 8-bit fractional part (Q24.8)
///
/// Integer part lives in the high 24 bits, the fraction in 1/256ths in the
/// low 8 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FixedPoint {
    raw: i32,
}

impl FixedPoint {
    /// Number of fractional bits
    pub const FRACTIONAL_BITS: u32 = 8;
    const FRAC_MASK: i32 = (1 << Self::FRACTIONAL_BITS) - 1;
    const SCALE: f32 = (1 << Self::FRACTIONAL_BITS) as f32;

    /// 0.0
    pub const ZERO: Self = Self::from_raw_bits(0);
    /// 1.0
    pub const ONE: Self = Self::from_raw_bits(1 << Self::FRACTIONAL_BITS);
    /// Smallest positive value (1/256)
    pub const EPSILON: Self = Self::from_raw_bits(1);
    /// Most negative representable value (-8388608.0)
    pub const MIN: Self = Self::from_raw_bits(i32::MIN);
    /// Largest representable value (8388607.99609375)
    pub const MAX: Self = Self::from_raw_bits(i32::MAX);

    /// Smallest integer accepted by [`FixedPoint::checked_from_int`]
    pub const INT_MIN: i32 = i32::MIN >> Self::FRACTIONAL_BITS;
    /// Largest integer accepted by [`FixedPoint::checked_from_int`]
    pub const INT_MAX: i32 = i32::MAX >> Self::FRACTIONAL_BITS;

    /// Create a zero value
    #[inline]
    pub fn new() -> Self {
        log::trace!("FixedPoint: default constructor");
        Self::ZERO
    }

    /// Create from integer value
    ///
    /// Integers outside [`INT_MIN`](Self::INT_MIN)..=[`INT_MAX`](Self::INT_MAX)
    /// lose their top bits in the shift and wrap around. Use
    /// [`checked_from_int`](Self::checked_from_int) to reject them instead.
    #[inline]
    pub fn from_int(value: i32) -> Self {
        Self {
            raw: value << Self::FRACTIONAL_BITS,
        }
    }

    /// Create from a float, rounding to the nearest 1/256
    ///
    /// Ties round away from zero. Results beyond the `i32` range saturate
    /// and NaN becomes zero.
    #[inline]
    pub fn from_float(value: f32) -> Self {
        Self {
            raw: (value * Self::SCALE).round() as i32,
        }
    }

    /// Create from raw value, bypassing any scaling
    #[inline]
    pub const fn from_raw_bits(raw: i32) -> Self {
        Self { raw }
    }

    /// Create from integer value, rejecting integers that would wrap
    pub fn checked_from_int(value: i32) -> Result<Self> {
        if !(Self::INT_MIN..=Self::INT_MAX).contains(&value) {
            return Err(FixedPointError::IntOverflow { value });
        }
        Ok(Self::from_int(value))
    }

    /// Create from a float, rejecting NaN, infinities and values whose
    /// rounded scaled form does not fit in an `i32`
    pub fn checked_from_float(value: f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite { value });
        }
        // i32::MAX is not representable as f32; 2^31 is the first value past it.
        let scaled = (value * Self::SCALE).round();
        if scaled < i32::MIN as f32 || scaled >= -(i32::MIN as f32) {
            return Err(FixedPointError::FloatOverflow { value });
        }
        Ok(Self::from_float(value))
    }

    /// Get raw value
    #[inline]
    pub fn raw_bits(&self) -> i32 {
        log::trace!("FixedPoint: raw_bits read");
        self.raw
    }

    /// Overwrite the raw value; the caller supplies an already-scaled integer
    #[inline]
    pub fn set_raw_bits(&mut self, raw: i32) {
        log::trace!("FixedPoint: raw_bits set ({raw})");
        self.raw = raw;
    }

    /// Integer part, rounded toward negative infinity
    #[inline]
    pub fn to_int(&self) -> i32 {
        self.raw >> Self::FRACTIONAL_BITS
    }

    /// Closest `f32` to the stored value
    #[inline]
    pub fn to_float(&self) -> f32 {
        self.raw as f32 / Self::SCALE
    }

    /// Get fractional part (0-255)
    #[inline]
    pub fn frac_part(&self) -> u8 {
        (self.raw & Self::FRAC_MASK) as u8
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_float(), f)
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedPoint")
            .field("raw", &self.raw)
            .field("value", &self.to_float())
            .finish()
    }
}

impl FromStr for FixedPoint {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|e| FixedPointError::Parse(format!("{s:?}: {e}")))?;
        Self::checked_from_float(value)
    }
}

impl From<i32> for FixedPoint {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl From<f32> for FixedPoint {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_float(value)
    }
}

impl From<FixedPoint> for i32 {
    #[inline]
    fn from(value: FixedPoint) -> Self {
        value.to_int()
    }
}

impl From<FixedPoint> for f32 {
    #[inline]
    fn from(value: FixedPoint) -> Self {
        value.to_float()
    }
}
