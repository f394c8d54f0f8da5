//! # Money Module
//!
//! Provides the `Money` type for the rounded amounts of a seller report.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ACCUMULATE IN f64, REPORT IN CENTS                                     │
//! │                                                                         │
//! │  Line items ──► revenue/profit (f64) ──► running totals (f64)           │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                  Money::from_amount ← ONCE, at the end  │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                              SellerReport { revenue, profit, bonus }    │
//! │                                                                         │
//! │  Rounding per line would drift from the per-seller total, so the        │
//! │  fractional parts are carried until the report is projected.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sales_core::money::Money;
//!
//! let bonus = Money::from_amount(80.0 * 0.15);
//! assert_eq!(bonus.cents(), 1200);
//! assert_eq!(bonus.to_string(), "12.00");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value stored in the smallest currency unit (cents).
///
/// ## Serialization
/// Serialized as a plain number with two decimals of precision
/// (`8000` cents → `80.0`), which is the shape report consumers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use sales_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an accumulated amount to the nearest cent.
    ///
    /// ## Rounding Rule
    /// Round half away from zero, applied to `amount * 100` as an `f64`:
    /// `0.125 → 0.13`, `-0.125 → -0.13`. Values whose binary representation
    /// falls just below the half (`1.005` is stored as `1.00499…`) round down.
    /// `NaN` maps to zero and infinities saturate at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use sales_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(0.125).cents(), 13);
    /// assert_eq!(Money::from_amount(-0.125).cents(), -13);
    /// assert_eq!(Money::from_amount(199.994).cents(), 19999);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount (`1099` cents → `10.99`).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Fixed two-decimal rendering, no currency symbol or grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.amount())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
