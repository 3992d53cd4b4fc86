//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  At session close that drift becomes a phantom variance:                │
//! │    counted 350.50 - expected 350.50 = -0.0000000001 → "shortage"        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    35050 - 35050 = 0, exactly. A balanced drawer reconciles to zero.    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use registra_core::money::Money;
//!
//! // Create from cents (preferred)
//! let opening = Money::from_cents(10_000); // S/ 100.00
//!
//! // Parse the store's two-decimal wire format exactly
//! let counted = Money::parse_decimal("350.50").unwrap();
//! assert_eq!(counted.cents(), 35_050);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(100.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: variance can be negative (a shortage)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// CashSession.opening ──► expected = opening + SalesSummary.total
///                                       │
/// counted (operator input) ─────────────┴──► variance = counted - expected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use registra_core::money::Money;
    ///
    /// let opening = Money::from_cents(10_000); // Represents S/ 100.00
    /// assert_eq!(opening.cents(), 10_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (soles and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-50, 50)` = -S/ 50.50, not -S/ 49.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Parses a decimal string in the store's wire format into exact cents.
    ///
    /// The backing store serializes all amounts as decimal strings with at
    /// most two fraction digits (`"100.00"`, `"-50.5"`, `"0"`). Parsing goes
    /// digit-by-digit; the value never passes through binary floating point.
    ///
    /// ## Example
    /// ```rust
    /// use registra_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("100.00").unwrap().cents(), 10_000);
    /// assert_eq!(Money::parse_decimal("-50.5").unwrap().cents(), -5_050);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert!(Money::parse_decimal("10.005").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, ParseMoneyError> {
        let s = input.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        if fraction.len() > 2 {
            return Err(ParseMoneyError::TooManyFractionDigits {
                input: input.to_string(),
            });
        }

        let mut cents: i64 = 0;
        for c in whole.chars() {
            let digit = c.to_digit(10).ok_or_else(|| ParseMoneyError::InvalidDigit {
                input: input.to_string(),
            })? as i64;
            cents = cents
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| ParseMoneyError::Overflow {
                    input: input.to_string(),
                })?;
        }
        cents = cents
            .checked_mul(100)
            .ok_or_else(|| ParseMoneyError::Overflow {
                input: input.to_string(),
            })?;

        // Right-pad the fraction: "5" means 50 cents, "50" means 50 cents
        let mut fraction_cents: i64 = 0;
        for c in fraction.chars() {
            let digit = c.to_digit(10).ok_or_else(|| ParseMoneyError::InvalidDigit {
                input: input.to_string(),
            })? as i64;
            fraction_cents = fraction_cents * 10 + digit;
        }
        if fraction.len() == 1 {
            fraction_cents *= 10;
        }
        cents = cents
            .checked_add(fraction_cents)
            .ok_or_else(|| ParseMoneyError::Overflow {
                input: input.to_string(),
            })?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Formats the value in the store's wire format: two fraction digits,
    /// no currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use registra_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(10_000).to_decimal_string(), "100.00");
    /// assert_eq!(Money::from_cents(-5_050).to_decimal_string(), "-50.50");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Errors from [`Money::parse_decimal`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseMoneyError {
    /// Input was empty or only a sign.
    #[error("empty amount")]
    Empty,

    /// Input contained a non-digit character.
    #[error("invalid digit in amount '{input}'")]
    InvalidDigit { input: String },

    /// More than two fraction digits; the store never sends these and
    /// accepting them would silently round.
    #[error("amount '{input}' has more than two fraction digits")]
    TooManyFractionDigits { input: String },

    /// Amount does not fit in i64 cents.
    #[error("amount '{input}' is out of range")]
    Overflow { input: String },
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log lines. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}S/ {}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation (for flipping a variance).
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Summing an iterator of Money values (per-method sales totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
