//! Q24.8 Fixed-Point Numbers
//!
//! A small value type that stores a real number as a signed 32-bit integer
//! scaled by 2^8. The raw bit pattern is exposed directly so callers can
//! assert on exact state, while the integer and float views are derived and
//! lossy.
//!
//! # Crate feature flags
//! - `cli` (default): the `fixed8` inspection binary (`clap`, `env_logger`, `anyhow`)
//! - `serde` (opt-in): serializes a [`FixedPoint`] as its raw `i32`
//!
//! # Quick start
//! ```
//! use fixed8::FixedPoint;
//!
//! let a = FixedPoint::from_float(5.05);
//! assert_eq!(a.raw_bits(), 1293); // 5.05 * 256 = 1292.8, rounded
//! assert_eq!(a.to_int(), 5);
//!
//! let b = FixedPoint::from_int(10);
//! assert_eq!(b.to_float(), 10.0);
//! assert_eq!(b.to_string(), "10");
//! ```
//!
//! ## Rejecting overflow
//! ```
//! use fixed8::{FixedPoint, FixedPointError};
//!
//! assert!(FixedPoint::checked_from_int(8_388_607).is_ok());
//! assert!(matches!(
//!     FixedPoint::checked_from_int(8_388_608),
//!     Err(FixedPointError::IntOverflow { .. })
//! ));
//! ```

#![warn(missing_docs)]

pub mod fixed_point;

/// Error types for fixed-point construction and parsing
///
/// The plain constructors never fail; only the `checked_*` constructors and
/// [`std::str::FromStr`] report these.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FixedPointError {
    /// Integer does not fit in the 24 integer bits
    #[error("Integer overflow: {value} is outside -8388608..=8388607")]
    IntOverflow {
        /// Rejected input
        value: i32,
    },

    /// Scaled float does not fit in the raw i32
    #[error("Float overflow: {value} cannot be represented with 8 fractional bits in 32 bits")]
    FloatOverflow {
        /// Rejected input
        value: f32,
    },

    /// NaN or infinity
    #[error("Not a finite number: {value}")]
    NotFinite {
        /// Rejected input
        value: f32,
    },

    /// Malformed numeric text
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for checked fixed-point operations
pub type Result<T> = std::result::Result<T, FixedPointError>;

// Public API exports
pub use fixed_point::FixedPoint;
