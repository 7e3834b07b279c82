use std::time::Duration;

use crema_core::constraint::{Constraint, Finite, StrictlyPositive};
use thiserror::Error;

/// Default absolute and relative tolerance.
///
/// Matches the long-standing LSODA defaults so results line up with the
/// classic adaptive solvers.
const DEFAULT_TOL: f64 = 1.490_116_119_384_765_6e-8;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    abs_tol: f64,
    rel_tol: f64,
    time_budget: Option<Duration>,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("abs_tol must be finite and strictly positive")]
    AbsTol,

    #[error("rel_tol must be finite and strictly positive")]
    RelTol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            abs_tol: DEFAULT_TOL,
            rel_tol: DEFAULT_TOL,
            time_budget: None,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances and no time budget.
    ///
    /// # Errors
    ///
    /// Returns an error if either tolerance is non-positive or non-finite.
    pub fn new(abs_tol: f64, rel_tol: f64) -> Result<Self, ConfigError> {
        if Finite::check(&abs_tol).is_err() || StrictlyPositive::check(&abs_tol).is_err() {
            return Err(ConfigError::AbsTol);
        }
        if Finite::check(&rel_tol).is_err() || StrictlyPositive::check(&rel_tol).is_err() {
            return Err(ConfigError::RelTol);
        }

        Ok(Self {
            abs_tol,
            rel_tol,
            time_budget: None,
        })
    }

    /// Returns a copy of this config with a wall-clock budget for one solve.
    ///
    /// The budget is checked after every accepted internal step, so a solve
    /// that exceeds it is interrupted mid-interval.
    #[must_use]
    pub fn with_time_budget(self, budget: Duration) -> Self {
        Self {
            time_budget: Some(budget),
            ..self
        }
    }

    /// Returns the absolute tolerance for the local error estimate.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the relative tolerance for the local error estimate.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the wall-clock budget, if any.
    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget
    }
}
