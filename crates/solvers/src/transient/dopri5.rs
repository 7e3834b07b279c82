//! Adaptive Dormand–Prince 5(4) solver for ODE problems.
//!
//! This module integrates an [`OdeProblem`] across a caller-supplied grid of
//! output times. Between consecutive grid times the state is advanced by the
//! embedded Dormand–Prince pair from `ode_solvers`, which adapts its internal
//! step size to keep the local error estimate within
//!
//! ```text
//! |err_i| <= abs_tol + rel_tol * |y_i|
//! ```
//!
//! Each interval ends exactly on its grid time, so the returned history is
//! aligned with the grid no matter how many internal steps were taken.
//!
//! # When to Use
//!
//! Dormand–Prince suits smooth, low-dimensional systems that are at most
//! mildly stiff. Output grids may be arbitrarily coarse or non-uniform.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per grid point, starting with step 0 for the
//! initial state. Observers can return [`Action::StopEarly`] to halt.
//!
//! # Example
//!
//! ```ignore
//! use crema_solvers::transient::dopri5;
//!
//! let times = [0.0, 0.5, 1.0];
//! let solution = dopri5::solve_unobserved(&model, &problem, initial, &times, &Config::default())?;
//!
//! for (t, snapshot) in solution.times.iter().zip(&solution.history) {
//!     println!("t={t}: {:?}", snapshot.output);
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;
mod stepper;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use crema_core::{Model, Observer, OdeProblem, Snapshot};
use ode_solvers::{Dopri5, SVector};
use tracing::{debug, trace};

use stepper::{Budget, IntervalLog, Stepper};

/// Relative tolerance for deciding that an interval ended on its grid time.
const GRID_TIME_TOL: f64 = 1e-9;

/// Integrates an ODE problem across a grid of output times.
///
/// `initial` is the model input at `times[0]`. Every later grid point is
/// reached by integrating the previous interval, rebuilding the model input
/// from the integrated state, and calling the model once more so the history
/// holds a full snapshot.
///
/// # Algorithm
///
/// 1. Validate that the grid is non-empty, finite, and strictly increasing.
/// 2. Call the model at the initial input and check the state and derivative
///    are finite.
/// 3. For each grid interval:
///    - Integrate from the current state with adaptive Dormand–Prince steps.
///    - Build the next input at the interval's end time.
///    - Call the model to get the next snapshot and emit an [`Event`].
///    - If the observer returns `StopEarly`, terminate.
/// 4. Return the solution with the full history.
///
/// # Errors
///
/// Returns an error if the grid is invalid, if the model or problem fails at
/// any evaluation, if the state or derivative becomes non-finite, if the
/// integrator cannot complete an interval, or if the configured time budget
/// is exceeded.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    times: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let t0 = validate_grid(times)?;
    let budget = config.time_budget().map(Budget::start);

    // Evaluate initial state.
    let initial_output = model.call(&initial).map_err(Error::model)?;
    let mut state = problem.state(&initial).map_err(Error::problem)?;
    let derivative = problem
        .derivative(&initial, &initial_output)
        .map_err(Error::problem)?;
    if !state.iter().chain(&derivative).all(|v| v.is_finite()) {
        return Err(Error::NonFinite { time: t0 });
    }

    let mut solution = Solution {
        status: Status::Complete,
        times: Vec::with_capacity(times.len()),
        history: Vec::with_capacity(times.len()),
        steps: 0,
        evaluations: 0,
    };

    let initial_snapshot = Snapshot::new(initial.clone(), initial_output);
    solution.times.push(t0);
    solution.history.push(initial_snapshot.clone());

    // Emit initial event.
    let event = Event {
        step: 0,
        time: t0,
        snapshot: initial_snapshot,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        solution.status = Status::StoppedByObserver;
        return Ok(solution);
    }

    for (step, window) in (1..).zip(times.windows(2)) {
        let (t_start, t_end) = (window[0], window[1]);

        let log = IntervalLog::new();
        let stepper = Stepper::new(model, problem, &initial, budget, &log);
        let (next_state, evaluations) =
            integrate_interval(stepper, &log, state, t_start, t_end, config)?;
        solution.evaluations += evaluations;
        state = next_state;

        // Evaluate model at the grid point.
        let next_input = problem
            .build_input(&initial, t_end, &state)
            .map_err(Error::problem)?;
        let next_output = model.call(&next_input).map_err(Error::model)?;
        let snapshot = Snapshot::new(next_input, next_output);

        solution.times.push(t_end);
        solution.history.push(snapshot.clone());
        solution.steps = step;

        // Emit event to observer.
        let event = Event {
            step,
            time: t_end,
            snapshot,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            solution.status = Status::StoppedByObserver;
            return Ok(solution);
        }
    }

    debug!(
        points = solution.times.len(),
        evaluations = solution.evaluations,
        "dopri5 integration complete"
    );

    Ok(solution)
}

/// Integrates an ODE problem across a grid of output times without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    times: &[f64],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, initial, times, config, ())
}

/// Checks the grid and returns its first time.
fn validate_grid(times: &[f64]) -> Result<f64, Error> {
    let Some(&first) = times.first() else {
        return Err(Error::EmptyGrid);
    };
    if !first.is_finite() {
        return Err(Error::UnorderedGrid { index: 0 });
    }

    for (index, window) in (1..).zip(times.windows(2)) {
        if !window[1].is_finite() || window[1] <= window[0] {
            return Err(Error::UnorderedGrid { index });
        }
    }

    Ok(first)
}

/// Advances `start` from `t_start` to `t_end`.
///
/// Returns the state at `t_end` and the number of derivative evaluations.
fn integrate_interval<M, P, const N: usize>(
    stepper: Stepper<'_, M, P, N>,
    log: &IntervalLog<N>,
    start: [f64; N],
    t_start: f64,
    t_end: f64,
    config: &Config,
) -> Result<([f64; N], u32), Error>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    // One dense output increment spans the whole interval.
    let mut integrator = Dopri5::new(
        stepper,
        t_start,
        t_end,
        t_end - t_start,
        SVector::from(start),
        config.rel_tol(),
        config.abs_tol(),
    );

    let outcome = integrator.integrate();
    if let Some(err) = log.take_failure() {
        return Err(err);
    }
    let stats = outcome.map_err(|err| Error::Integration {
        time: t_end,
        reason: format!("{err:?}"),
    })?;

    let reached = |time: f64| (time - t_end).abs() <= GRID_TIME_TOL * t_end.abs().max(1.0);
    let dense_end = integrator
        .x_out()
        .last()
        .zip(integrator.y_out().last())
        .map(|(&time, y)| (time, <[f64; N]>::from(*y)));

    let end = log
        .last_accepted()
        .into_iter()
        .chain(dense_end)
        .find(|&(time, _)| reached(time))
        .map(|(_, state)| state)
        .ok_or_else(|| Error::Integration {
            time: t_end,
            reason: "integrator stopped short of the grid time".to_owned(),
        })?;

    if !end.iter().all(|v| v.is_finite()) {
        return Err(Error::NonFinite { time: t_end });
    }

    trace!(
        t_start,
        t_end,
        evaluations = stats.num_eval,
        "interval integrated"
    );

    Ok((end, stats.num_eval))
}
