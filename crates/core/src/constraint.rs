//! Numeric invariants checked at construction time.
//!
//! Models in this workspace reject invalid parameters before any integration
//! is attempted. The marker types here express the common invariants:
//!
//! - [`Finite`]: Neither infinite nor NaN
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`PositiveFraction`]: Greater than zero and at most one
//!
//! Each marker implements [`Constraint<T>`] for every `T` with the required
//! numeric traits, so they work with plain floats and integers alike.
//!
//! # Example
//!
//! ```
//! use crema_core::constraint::{Constraint, ConstraintError, StrictlyPositive};
//!
//! assert!(StrictlyPositive::check(&0.25).is_ok());
//! assert_eq!(StrictlyPositive::check(&0.0), Err(ConstraintError::Zero));
//! ```

use std::cmp::Ordering;

use num_traits::{Float, One, Zero};
use thiserror::Error;

/// A trait for enforcing numeric invariants.
///
/// Implement this trait for any marker type representing a numeric constraint.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    Infinite,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// Marker type enforcing that a floating-point value is finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finite;

impl<T: Float> Constraint<T> for Finite {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::Infinite)
        } else {
            Ok(())
        }
    }
}

/// Marker type enforcing that a value is zero or greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing that a value is strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing the left-open unit interval: `0 < x ≤ 1`.
///
/// Solubility ceilings are fractions of this kind: a compound that cannot
/// dissolve at all has no place in a profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveFraction;

impl<T: PartialOrd + Zero + One> Constraint<T> for PositiveFraction {
    fn check(value: &T) -> Result<(), ConstraintError> {
        StrictlyPositive::check(value)?;
        if *value > T::one() {
            Err(ConstraintError::AboveMaximum)
        } else {
            Ok(())
        }
    }
}
