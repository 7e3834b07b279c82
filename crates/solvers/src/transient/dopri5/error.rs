use std::{error::Error as StdError, time::Duration};

/// Errors that can occur during Dormand–Prince integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("time grid is empty")]
    EmptyGrid,

    #[error("time grid is not finite and strictly increasing at index {index}")]
    UnorderedGrid { index: usize },

    #[error("integration failed before t = {time}: {reason}")]
    Integration { time: f64, reason: String },

    #[error("state or derivative became non-finite at t = {time}")]
    NonFinite { time: f64 },

    #[error("time budget of {budget:?} exceeded at t = {time}")]
    TimeBudgetExceeded { time: f64, budget: Duration },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}
