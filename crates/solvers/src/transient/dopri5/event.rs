use crema_core::Snapshot;

/// Event emitted by the Dormand–Prince solver at each output grid point.
///
/// Step 0 is the initial state at the first grid time.
/// Steps 1..N are emitted after the interval ending at grid point N is integrated.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    /// The grid index (0 for the initial state).
    pub step: usize,

    /// The grid time of this snapshot.
    pub time: f64,

    /// Snapshot of the model input and output at this grid point.
    pub snapshot: Snapshot<I, O>,
}
