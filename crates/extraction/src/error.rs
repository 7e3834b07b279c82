use std::time::Duration;

use crema_core::constraint::ConstraintError;
use crema_solvers::transient::dopri5;
use thiserror::Error;

/// Errors produced by the extraction engine.
///
/// Invalid parameters are rejected before any integration starts, so an
/// [`Error::NumericalInstability`] always means the inputs looked valid but the
/// model or integrator broke down.
#[derive(Debug, Error)]
pub enum Error {
    /// A brew parameter violates its numeric invariant.
    ///
    /// Besides sign and finiteness checks, a contact time at or below the
    /// 0.01 s start of the output grid is rejected with
    /// [`ConstraintError::BelowMinimum`].
    #[error("invalid parameter `{parameter}`: {source}")]
    InvalidParameter {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The rate law or integrator produced non-finite values or failed to converge.
    #[error("numerical instability: {reason}")]
    NumericalInstability { reason: String },

    /// The requested compound is not in the profile table.
    #[error("unknown compound `{0}`")]
    UnknownCompound(String),

    /// The run exceeded its wall-clock budget and was abandoned.
    #[error("simulation cancelled at t = {time} s after exceeding its {budget:?} budget")]
    Cancelled { time: f64, budget: Duration },

    /// A compound run did not share the time grid of the composition.
    #[error("compound `{compound}` was simulated on a different time grid")]
    GridMismatch { compound: String },

    /// A derived quantity needs more points than were supplied.
    #[error("at least {required} points are required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// Paired sequences have different lengths.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl From<dopri5::Error> for Error {
    fn from(err: dopri5::Error) -> Self {
        match err {
            dopri5::Error::TimeBudgetExceeded { time, budget } => Self::Cancelled { time, budget },
            dopri5::Error::Model(source) => match source.downcast::<Self>() {
                Ok(inner) => *inner,
                Err(other) => Self::NumericalInstability {
                    reason: other.to_string(),
                },
            },
            other => Self::NumericalInstability {
                reason: other.to_string(),
            },
        }
    }
}
