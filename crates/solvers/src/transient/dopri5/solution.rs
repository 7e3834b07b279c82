use crema_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the last grid time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a Dormand–Prince integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// Grid times that were reached, aligned with `history`.
    pub times: Vec<f64>,

    /// Snapshots at each reached grid time (including the initial state).
    pub history: Vec<Snapshot<I, O>>,

    /// Number of grid intervals integrated.
    pub steps: usize,

    /// Total number of derivative evaluations made by the integrator.
    pub evaluations: u32,
}
