//! # Validation Module
//!
//! Input validation for session open and close.
//!
//! Validation runs before any store round-trip so malformed input is
//! surfaced as a field-level message without touching the network. The
//! store enforces the same rules again on its side; these checks fail fast,
//! they are not the only line of defense.

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_CLOSING_NOTES_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates the starting amount of a new session.
///
/// ## Rules
/// - Zero is legal (a drawer can start empty)
/// - Negative is not
///
/// ## Example
/// ```rust
/// use registra_core::money::Money;
/// use registra_core::validation::validate_opening_amount;
///
/// assert!(validate_opening_amount(Money::from_cents(0)).is_ok());
/// assert!(validate_opening_amount(Money::from_cents(-1_000)).is_err());
/// ```
pub fn validate_opening_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: "openingAmount".to_string(),
        });
    }
    Ok(())
}

/// Validates the counted drawer amount submitted at close.
///
/// Amounts arrive as [`Money`], so non-finite values cannot exist by
/// construction; the only illegal input left is a negative count.
pub fn validate_counted_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: "countedAmount".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Notes Validator
// =============================================================================

/// Validates the free-text closing notes.
pub fn validate_closing_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > MAX_CLOSING_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_CLOSING_NOTES_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
